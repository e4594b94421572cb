//! Product domain service.
//!
//! Implements the product driving ports over a [`ProductRepository`] and
//! provides the name-keyed upsert used by mirror reconciliation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{ProductCommand, ProductQuery, ProductRepository, ProductRepositoryError};
use crate::domain::{
    Error, InventorySummary, Product, ProductDraft, ProductId, ProductName, Quantity, UnitPrice,
};

/// Result of [`ProductService::upsert_by_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No product carried the name; a new one was inserted.
    Created(Product),
    /// An existing product absorbed the incoming quantity and price.
    Updated(Product),
}

impl UpsertOutcome {
    /// The product as stored after the upsert.
    #[must_use]
    pub fn product(&self) -> &Product {
        match self {
            Self::Created(product) | Self::Updated(product) => product,
        }
    }
}

/// Product service implementing [`ProductCommand`] and [`ProductQuery`].
#[derive(Clone)]
pub struct ProductService<R> {
    repo: Arc<R>,
}

impl<R> ProductService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

pub(crate) fn map_product_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product store unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("product store error: {message}"))
        }
        ProductRepositoryError::Constraint { message } => {
            Error::internal(format!("product store rejected write: {message}"))
        }
    }
}

fn not_found(id: ProductId) -> Error {
    Error::not_found(format!("product {id} not found"))
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    /// Insert `name` or merge into the product already carrying it.
    ///
    /// An existing product gains `quantity` on top of its stock and takes
    /// `unit_price` as its new price. Callers clamp negative source values
    /// before calling.
    pub async fn upsert_by_name(
        &self,
        name: ProductName,
        quantity: Quantity,
        unit_price: UnitPrice,
    ) -> Result<UpsertOutcome, Error> {
        let existing = self
            .repo
            .find_by_name(&name)
            .await
            .map_err(map_product_error)?;
        match existing {
            Some(product) => {
                let merged = ProductDraft::new(
                    name,
                    product.quantity().saturating_add(quantity),
                    unit_price,
                );
                let updated = self
                    .repo
                    .update(product.id(), &merged)
                    .await
                    .map_err(map_product_error)?
                    .ok_or_else(|| not_found(product.id()))?;
                debug!(product_id = %updated.id(), "upsert merged into existing product");
                Ok(UpsertOutcome::Updated(updated))
            }
            None => {
                let draft = ProductDraft::new(name, quantity, unit_price);
                let created = self.repo.create(&draft).await.map_err(map_product_error)?;
                debug!(product_id = %created.id(), "upsert created product");
                Ok(UpsertOutcome::Created(created))
            }
        }
    }
}

#[async_trait]
impl<R> ProductCommand for ProductService<R>
where
    R: ProductRepository,
{
    async fn create(&self, draft: ProductDraft) -> Result<Product, Error> {
        self.repo.create(&draft).await.map_err(map_product_error)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, Error> {
        self.repo
            .update(id, &draft)
            .await
            .map_err(map_product_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: ProductId) -> Result<(), Error> {
        let removed = self.repo.delete(id).await.map_err(map_product_error)?;
        if !removed {
            debug!(product_id = %id, "delete matched no product");
        }
        Ok(())
    }
}

#[async_trait]
impl<R> ProductQuery for ProductService<R>
where
    R: ProductRepository,
{
    async fn get(&self, id: ProductId) -> Result<Product, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_product_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn summary(&self) -> Result<InventorySummary, Error> {
        let products = self.repo.list().await.map_err(map_product_error)?;
        summarize(products)
    }

    async fn search(&self, query: &str) -> Result<InventorySummary, Error> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return summarize(Vec::new());
        }
        let products = self.repo.list().await.map_err(map_product_error)?;
        let matches = products
            .into_iter()
            .filter(|product| product.name().folded().contains(&needle))
            .collect();
        summarize(matches)
    }
}

fn summarize(products: Vec<Product>) -> Result<InventorySummary, Error> {
    InventorySummary::from_products(products)
        .map_err(|err| Error::internal(format!("inventory totals failed: {err}")))
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
