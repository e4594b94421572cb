//! Category domain service over a [`CategoryRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CategoryCommand, CategoryQuery, CategoryRepository, CategoryRepositoryError,
};
use crate::domain::{Category, CategoryId, CategoryName, Error};

/// Category service implementing [`CategoryCommand`] and [`CategoryQuery`].
#[derive(Clone)]
pub struct CategoryService<R> {
    repo: Arc<R>,
}

impl<R> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category store unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category store error: {message}"))
        }
    }
}

fn not_found(id: CategoryId) -> Error {
    Error::not_found(format!("category {id} not found"))
}

#[async_trait]
impl<R> CategoryCommand for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn create(&self, name: CategoryName) -> Result<Category, Error> {
        self.repo.create(&name).await.map_err(map_category_error)
    }

    async fn rename(&self, id: CategoryId, name: CategoryName) -> Result<Category, Error> {
        self.repo
            .update(id, &name)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: CategoryId) -> Result<(), Error> {
        let removed = self.repo.delete(id).await.map_err(map_category_error)?;
        if !removed {
            debug!(category_id = %id, "delete matched no category");
        }
        Ok(())
    }
}

#[async_trait]
impl<R> CategoryQuery for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn get(&self, id: CategoryId) -> Result<Category, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> Result<Vec<Category>, Error> {
        self.repo.list().await.map_err(map_category_error)
    }
}
