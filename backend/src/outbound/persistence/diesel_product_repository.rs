//! PostgreSQL-backed `ProductRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{
    Product, ProductDraft, ProductId, ProductName, ProductValidationError, Quantity, UnitPrice,
};

use super::diesel_basic_error_mapping::{
    is_check_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ProductRow, ProductValues};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the `ProductRepository` port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    map_basic_pool_error(error, ProductRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> ProductRepositoryError {
    if is_check_violation(&error) {
        return ProductRepositoryError::constraint("quantity and price must not be negative");
    }
    map_basic_diesel_error(
        error,
        ProductRepositoryError::query,
        ProductRepositoryError::connection,
    )
}

/// Rows violating domain rules can only come from out-of-band edits.
fn row_to_product(row: ProductRow) -> Result<Product, ProductRepositoryError> {
    let invalid = |err: ProductValidationError| {
        warn!(id = row.id, error = %err, "stored product row is invalid");
        ProductRepositoryError::query(format!("stored product {} is invalid: {err}", row.id))
    };
    let draft = ProductDraft::new(
        ProductName::new(&row.name).map_err(invalid)?,
        Quantity::new(row.quantity).map_err(invalid)?,
        UnitPrice::from_cents(row.price_cents).map_err(invalid)?,
    );
    Ok(Product::new(ProductId::new(row.id), draft))
}

fn draft_values(draft: &ProductDraft) -> Result<ProductValues<'_>, ProductRepositoryError> {
    let price_cents = draft
        .unit_price
        .cents()
        .map_err(|err| ProductRepositoryError::constraint(err.to_string()))?;
    Ok(ProductValues {
        name: draft.name.as_ref(),
        quantity: draft.quantity.get(),
        price_cents,
    })
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn create(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError> {
        let values = draft_values(draft)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(products::table)
            .values(&values)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_product(row)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        products::table
            .find(id.get())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_product)
            .transpose()
    }

    async fn find_by_name(
        &self,
        name: &ProductName,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        products::table
            .filter(products::name.eq(name.as_ref()))
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_product)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_product).collect()
    }

    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let values = draft_values(draft)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(products::table.find(id.get()))
            .set(&values)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_product)
            .transpose()
    }

    async fn delete(&self, id: ProductId) -> Result<bool, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(products::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
