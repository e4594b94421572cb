//! Mirror domain service: timestamped saves and lenient dumps.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{MirrorCommand, MirrorQuery, MirrorStore, MirrorStoreError};
use crate::domain::{Error, MirrorEntry, MirrorFormat, MirrorReadout, MirrorRecord};

/// Timestamp layout of mirror records: local time to the second, no offset.
pub const MIRROR_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Mirror service implementing [`MirrorCommand`] and [`MirrorQuery`].
#[derive(Clone)]
pub struct MirrorService<M> {
    store: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<M> MirrorService<M> {
    /// Create a service over a mirror store, stamping records with `clock`.
    pub fn new(store: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

pub(crate) fn map_mirror_error(error: MirrorStoreError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<M> MirrorCommand for MirrorService<M>
where
    M: MirrorStore,
{
    async fn save(&self, format: MirrorFormat, entry: MirrorEntry) -> Result<MirrorRecord, Error> {
        let timestamp = self
            .clock
            .local()
            .format(MIRROR_TIMESTAMP_FORMAT)
            .to_string();
        let record = entry.into_record(timestamp);
        self.store
            .append(format, &record)
            .await
            .map_err(map_mirror_error)?;
        info!(%format, name = %record.name, quantity = record.quantity, "mirror record saved");
        Ok(record)
    }
}

#[async_trait]
impl<M> MirrorQuery for MirrorService<M>
where
    M: MirrorStore,
{
    async fn view(&self, format: MirrorFormat) -> Result<MirrorReadout, Error> {
        self.store.read_all(format).await.map_err(map_mirror_error)
    }
}
