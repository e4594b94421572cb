//! PostgreSQL-backed `CredentialRepository` using Diesel.
//!
//! Emails are stored normalised; lookups compare the normalised form exactly.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{Credential, Email, NewCredential, PasswordHash, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CredentialRow, NewCredentialRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `CredentialRepository` port.
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
}

impl DieselCredentialRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CredentialRepositoryError {
    map_basic_pool_error(error, CredentialRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CredentialRepositoryError {
    map_basic_diesel_error(
        error,
        CredentialRepositoryError::query,
        CredentialRepositoryError::connection,
    )
}

fn row_to_credential(row: CredentialRow) -> Credential {
    Credential {
        id: UserId::new(row.id),
        name: row.name,
        email: Email::from_stored(row.email),
        password_hash: row.password_hash.map(PasswordHash::new),
    }
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .order(users::id.asc())
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_credential))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Credential>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_credential))
    }

    async fn insert(
        &self,
        credential: &NewCredential,
    ) -> Result<Credential, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(users::table)
            .values(&NewCredentialRow {
                name: &credential.name,
                email: credential.email.as_ref(),
                password_hash: Some(credential.password_hash.as_ref()),
            })
            .returning(CredentialRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_credential(row))
    }
}
