//! Port abstraction for category persistence.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, CategoryName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category adapters.
    pub enum CategoryRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "category store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category and return it with its generated id.
    async fn create(&self, name: &CategoryName) -> Result<Category, CategoryRepositoryError>;

    async fn find_by_id(&self, id: CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;

    /// All categories ordered by ascending id.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Rename a category. Returns `None` when the id does not exist.
    async fn update(
        &self,
        id: CategoryId,
        name: &CategoryName,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Delete a category. Returns whether a row was removed.
    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError>;
}
