//! Session helpers and the authentication gate.
//!
//! The signed cookie carries the user id and the expiry instant. Every
//! protected request reloads the account behind that id; a grant that has
//! expired or whose user no longer exists is purged and the caller is
//! treated as anonymous.

use actix_session::{Session, SessionGetError};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::ports::AccountQuery;
use crate::domain::{Error, SessionGrant, UserAccount, UserId};

use super::state::HttpState;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EXPIRES_AT_KEY: &str = "expires_at";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist a grant in the session cookie, replacing any previous one.
    pub fn establish(&self, grant: &SessionGrant) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, grant.user_id().get())
            .and_then(|()| self.0.insert(EXPIRES_AT_KEY, grant.expires_at().timestamp()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Read the stored grant. Tampered or partial values read as no grant.
    pub fn grant(&self) -> Option<SessionGrant> {
        let user_id = self.read_i64(USER_ID_KEY)?;
        let expires_at = self.read_i64(EXPIRES_AT_KEY)?;
        let Some(expires_at) = DateTime::<Utc>::from_timestamp(expires_at, 0) else {
            warn!(expires_at, "invalid session expiry in cookie");
            return None;
        };
        Some(SessionGrant::from_parts(UserId::new(user_id), expires_at))
    }

    fn read_i64(&self, key: &'static str) -> Option<i64> {
        self.0.get::<i64>(key).unwrap_or_else(|error: SessionGetError| {
            warn!(key, %error, "unreadable session value");
            None
        })
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Resolve the session into a live account or fail with `unauthorized`.
pub async fn require_session(
    session: &SessionContext,
    accounts: &dyn AccountQuery,
    now: DateTime<Utc>,
) -> Result<UserAccount, Error> {
    let Some(grant) = session.grant() else {
        return Err(Error::unauthorized("login required"));
    };
    if grant.is_expired(now) {
        debug!(user_id = %grant.user_id(), "session expired");
        session.clear();
        return Err(Error::unauthorized("session expired"));
    }
    match accounts.find_account(grant.user_id()).await? {
        Some(account) => Ok(account),
        None => {
            warn!(user_id = %grant.user_id(), "session refers to a missing user");
            session.clear();
            Err(Error::unauthorized("login required"))
        }
    }
}

/// Extractor for handlers behind the authentication gate.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserAccount);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = SessionContext::new(session.await?);
            let state = state.ok_or_else(|| Error::internal("http state is not configured"))?;
            let now = state.clock.utc();
            require_session(&session, state.accounts.as_ref(), now)
                .await
                .map(CurrentUser)
        })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
