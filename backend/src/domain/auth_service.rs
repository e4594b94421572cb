//! Authentication domain service.
//!
//! Registers credentials, verifies logins and reloads session users. Password
//! hashing is CPU bound and runs on the blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountQuery, CredentialRepository, CredentialRepositoryError, LoginService, PasswordHasher,
    PasswordHasherError, RegistrationService,
};
use crate::domain::{
    Credential, Email, Error, LoginCredentials, NewCredential, PasswordHash, Registration,
    UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Authentication service implementing [`LoginService`],
/// [`RegistrationService`] and [`AccountQuery`].
#[derive(Clone)]
pub struct AuthService<C, H> {
    credentials: Arc<C>,
    hasher: Arc<H>,
}

impl<C, H> AuthService<C, H> {
    pub fn new(credentials: Arc<C>, hasher: Arc<H>) -> Self {
        Self {
            credentials,
            hasher,
        }
    }
}

fn map_credential_error(error: CredentialRepositoryError) -> Error {
    match error {
        CredentialRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("credential store unavailable: {message}"))
        }
        CredentialRepositoryError::Query { message } => {
            Error::internal(format!("credential store error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

impl<C, H> AuthService<C, H>
where
    C: CredentialRepository,
    H: PasswordHasher + 'static,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<C, H> RegistrationService for AuthService<C, H>
where
    C: CredentialRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: &Registration) -> Result<UserAccount, Error> {
        let existing = self
            .credentials
            .find_by_email(registration.email())
            .await
            .map_err(map_credential_error)?;
        if existing.is_some() {
            return Err(Error::conflict("email already registered"));
        }
        let password_hash = self.hash_password(registration.password()).await?;
        let credential = self
            .credentials
            .insert(&NewCredential {
                name: registration.name().to_owned(),
                email: registration.email().clone(),
                password_hash,
            })
            .await
            .map_err(map_credential_error)?;
        info!(user_id = %credential.id, "user registered");
        Ok(credential.account())
    }
}

#[async_trait]
impl<C, H> LoginService for AuthService<C, H>
where
    C: CredentialRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserAccount, Error> {
        let email = Email::from_stored(credentials.email().to_owned());
        let Some(credential) = self
            .credentials
            .find_by_email(&email)
            .await
            .map_err(map_credential_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(hash) = credential.password_hash.clone() else {
            debug!(user_id = %credential.id, "login rejected: no password set");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !self.verify_password(credentials.password(), hash).await? {
            debug!(user_id = %credential.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        info!(user_id = %credential.id, "user logged in");
        Ok(credential.account())
    }
}

#[async_trait]
impl<C, H> AccountQuery for AuthService<C, H>
where
    C: CredentialRepository,
    H: PasswordHasher + 'static,
{
    async fn find_account(&self, id: UserId) -> Result<Option<UserAccount>, Error> {
        let credential = self
            .credentials
            .find_by_id(id)
            .await
            .map_err(map_credential_error)?;
        Ok(credential.as_ref().map(Credential::account))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
