//! Mirror reconciliation: merge mirror events into the product store.
//!
//! Mirrors log events ("N units of X at time T") while the product store holds
//! current state. Each well-formed record is upserted by exact name: quantity
//! is added to the stored stock, price replaces the stored price. Negative
//! source values are clamped to zero first and prices above
//! [`UnitPrice::MAX`] to that bound.
//!
//! Imports are not transactional and not idempotent. Re-importing an
//! unchanged mirror adds its quantities again; a crash mid-import leaves the
//! records processed so far applied.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ImportAllReport, ImportCommand, ImportReport, MirrorStore, ProductRepository,
};
use crate::domain::product_service::ProductService;
use crate::domain::{Error, MirrorFormat, MirrorRecord, ProductName, Quantity, UnitPrice};

use super::mirror_service::map_mirror_error;

/// Reconciliation service implementing [`ImportCommand`].
#[derive(Clone)]
pub struct ImportService<M, R> {
    mirrors: Arc<M>,
    products: ProductService<R>,
}

impl<M, R> ImportService<M, R> {
    pub fn new(mirrors: Arc<M>, products: ProductService<R>) -> Self {
        Self { mirrors, products }
    }
}

impl<M, R> ImportService<M, R>
where
    M: MirrorStore,
    R: ProductRepository,
{
    /// Upsert one record. Returns `false` when the record was skipped.
    async fn apply(&self, format: MirrorFormat, record: MirrorRecord) -> bool {
        let Ok(name) = ProductName::new(&record.name) else {
            warn!(%format, timestamp = %record.timestamp, "skipping mirror record without a name");
            return false;
        };
        let quantity = Quantity::clamped(record.quantity);
        let unit_price = UnitPrice::clamped(record.unit_price);
        match self
            .products
            .upsert_by_name(name, quantity, unit_price)
            .await
        {
            Ok(_) => true,
            Err(error) => {
                warn!(%format, name = %record.name, error = %error, "mirror record upsert failed");
                false
            }
        }
    }
}

#[async_trait]
impl<M, R> ImportCommand for ImportService<M, R>
where
    M: MirrorStore,
    R: ProductRepository,
{
    async fn import(&self, format: MirrorFormat) -> Result<ImportReport, Error> {
        let readout = self
            .mirrors
            .read_all(format)
            .await
            .map_err(map_mirror_error)?;
        let mut processed = 0;
        for record in readout.records {
            if self.apply(format, record).await {
                processed += 1;
            }
        }
        info!(%format, processed, skipped = readout.skipped, "mirror imported");
        Ok(ImportReport { format, processed })
    }

    async fn import_all(&self) -> ImportAllReport {
        let mut report = ImportAllReport::default();
        for format in MirrorFormat::ALL {
            match self.import(format).await {
                Ok(outcome) => report.record(format, outcome.processed),
                Err(error) => {
                    warn!(%format, error = %error, "mirror import failed; counting zero");
                    report.record(format, 0);
                }
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "reconciliation_tests.rs"]
mod tests;
