//! Port abstraction for the credential store and its errors.

use async_trait::async_trait;

use crate::domain::{Credential, Email, NewCredential, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by credential store adapters.
    pub enum CredentialRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "credential store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "credential store query failed: {message}",
    }
}

/// Relational table of user credentials.
///
/// Email uniqueness is a convention upheld by the registration service, not a
/// storage constraint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Fetch the first credential registered under `email`.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Credential>, CredentialRepositoryError>;

    /// Fetch a credential by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<Credential>, CredentialRepositoryError>;

    /// Store a new credential and return it with its generated id.
    async fn insert(
        &self,
        credential: &NewCredential,
    ) -> Result<Credential, CredentialRepositoryError>;
}
