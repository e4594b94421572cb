//! Driving ports for the file mirrors.

use async_trait::async_trait;

use crate::domain::{Error, MirrorEntry, MirrorFormat, MirrorReadout, MirrorRecord};

/// Record save events in a mirror.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MirrorCommand: Send + Sync {
    /// Timestamp `entry`, append it to the `format` mirror and return the
    /// record as written.
    async fn save(&self, format: MirrorFormat, entry: MirrorEntry) -> Result<MirrorRecord, Error>;
}

/// Dump a mirror.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MirrorQuery: Send + Sync {
    async fn view(&self, format: MirrorFormat) -> Result<MirrorReadout, Error>;
}
