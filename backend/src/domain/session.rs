//! Session grants issued at login.
//!
//! A grant binds a user id to an absolute expiry. The HTTP adapter stores it
//! in the signed session cookie and re-checks it on every request.

use chrono::{DateTime, Duration, Utc};

use super::UserId;

/// Lifetime of a session when the caller did not ask to be remembered.
pub const SESSION_TTL_HOURS: i64 = 12;
/// Lifetime of a remembered session.
pub const REMEMBER_TTL_DAYS: i64 = 30;

/// Proof of authentication carried by the client.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use inventory_backend::domain::{SessionGrant, UserId};
///
/// let now = Utc::now();
/// let grant = SessionGrant::issue(UserId::new(1), false, now);
/// assert!(!grant.is_expired(now));
/// assert!(grant.is_expired(now + Duration::hours(13)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionGrant {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

impl SessionGrant {
    /// Issue a grant for `user_id` starting at `now`.
    #[must_use]
    pub fn issue(user_id: UserId, remember: bool, now: DateTime<Utc>) -> Self {
        let ttl = if remember {
            Duration::days(REMEMBER_TTL_DAYS)
        } else {
            Duration::hours(SESSION_TTL_HOURS)
        };
        Self {
            user_id,
            expires_at: now + ttl,
        }
    }

    /// Rebuild a grant from stored parts.
    #[must_use]
    pub fn from_parts(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            expires_at,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True once `now` has reached the expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Seconds left before expiry, floored at zero.
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
