//! Driving ports for authentication use-cases.
//!
//! Inbound adapters call these to register, authenticate and reload users
//! without importing the credential store or the password hasher.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, UserAccount, UserId};

/// Credential verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the matching account.
    ///
    /// Unknown emails, missing hashes and wrong passwords all fail with the
    /// same `unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserAccount, Error>;
}

/// Account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Store a new credential. Fails with `conflict` when the email is taken.
    /// Does not authenticate the caller.
    async fn register(&self, registration: &Registration) -> Result<UserAccount, Error>;
}

/// Session reload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Resolve a session's user id; `None` when the user no longer exists.
    async fn find_account(&self, id: UserId) -> Result<Option<UserAccount>, Error>;
}
