//! Driving ports for product use-cases.
//!
//! Inbound adapters call these to manage products without importing the
//! backing store, so handler tests can substitute mocks.

use async_trait::async_trait;

use crate::domain::{Error, InventorySummary, Product, ProductDraft, ProductId};

/// Product mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCommand: Send + Sync {
    /// Create a product from validated values.
    async fn create(&self, draft: ProductDraft) -> Result<Product, Error>;

    /// Overwrite a product, failing with `not_found` for unknown ids.
    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, Error>;

    /// Remove a product. Unknown ids are not an error.
    async fn delete(&self, id: ProductId) -> Result<(), Error>;
}

/// Product reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQuery: Send + Sync {
    /// Fetch one product, failing with `not_found` for unknown ids.
    async fn get(&self, id: ProductId) -> Result<Product, Error>;

    /// Every product with aggregate totals.
    async fn summary(&self) -> Result<InventorySummary, Error>;

    /// Products whose name contains `query`, ignoring case.
    ///
    /// A blank query matches nothing.
    async fn search(&self, query: &str) -> Result<InventorySummary, Error>;
}
