//! Port abstraction for the product store and its errors.

use async_trait::async_trait;

use crate::domain::{Product, ProductDraft, ProductId, ProductName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product store adapters.
    pub enum ProductRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "product store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product store query failed: {message}",
        /// A storage constraint such as a non-negative check rejected the write.
        Constraint { message: String } => "product store constraint violated: {message}",
    }
}

/// Relational store of current product state.
///
/// Implementations must reject negative quantities and prices on their own,
/// independent of the validation callers perform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with its generated id.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError>;

    /// Fetch a product by identifier.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Fetch the first product whose name matches exactly, ordered by id.
    async fn find_by_name(
        &self,
        name: &ProductName,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// All products ordered by ascending id.
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Overwrite a product. Returns `None` when the id does not exist.
    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// Delete a product. Returns whether a row was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, ProductRepositoryError>;
}
