//! Driving ports for category use-cases.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, CategoryName, Error};

/// Category mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCommand: Send + Sync {
    async fn create(&self, name: CategoryName) -> Result<Category, Error>;

    /// Rename a category, failing with `not_found` for unknown ids.
    async fn rename(&self, id: CategoryId, name: CategoryName) -> Result<Category, Error>;

    /// Remove a category. Unknown ids are not an error.
    async fn delete(&self, id: CategoryId) -> Result<(), Error>;
}

/// Category reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// Fetch one category, failing with `not_found` for unknown ids.
    async fn get(&self, id: CategoryId) -> Result<Category, Error>;

    /// Every category in ascending id order.
    async fn list(&self) -> Result<Vec<Category>, Error>;
}
