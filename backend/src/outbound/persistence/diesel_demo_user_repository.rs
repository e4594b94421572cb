//! PostgreSQL-backed `DemoUserRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DemoUserRepository, DemoUserRepositoryError};
use crate::domain::{DemoUser, NewDemoUser};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DemoUserRow, NewDemoUserRow};
use super::pool::{DbPool, PoolError};
use super::schema::demo_users;

/// Diesel-backed implementation of the `DemoUserRepository` port.
#[derive(Clone)]
pub struct DieselDemoUserRepository {
    pool: DbPool,
}

impl DieselDemoUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DemoUserRepositoryError {
    map_basic_pool_error(error, DemoUserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DemoUserRepositoryError {
    map_basic_diesel_error(
        error,
        DemoUserRepositoryError::query,
        DemoUserRepositoryError::connection,
    )
}

impl From<DemoUserRow> for DemoUser {
    fn from(row: DemoUserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl DemoUserRepository for DieselDemoUserRepository {
    async fn create(&self, user: &NewDemoUser) -> Result<DemoUser, DemoUserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(demo_users::table)
            .values(&NewDemoUserRow {
                name: &user.name,
                email: &user.email,
            })
            .returning(DemoUserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<DemoUser>, DemoUserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DemoUserRow> = demo_users::table
            .order(demo_users::id.asc())
            .select(DemoUserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(DemoUser::from).collect())
    }
}
