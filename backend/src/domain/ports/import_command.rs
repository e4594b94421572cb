//! Driving port for mirror reconciliation.

use async_trait::async_trait;

use crate::domain::{Error, MirrorFormat};

/// Outcome of importing one mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub format: MirrorFormat,
    /// Records that produced a successful upsert.
    pub processed: usize,
}

/// Outcome of importing every mirror in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportAllReport {
    pub txt: usize,
    pub json: usize,
    pub csv: usize,
}

impl ImportAllReport {
    /// Sum over all formats.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.txt + self.json + self.csv
    }

    /// Record the count for one format.
    pub fn record(&mut self, format: MirrorFormat, processed: usize) {
        match format {
            MirrorFormat::Txt => self.txt = processed,
            MirrorFormat::Json => self.json = processed,
            MirrorFormat::Csv => self.csv = processed,
        }
    }
}

/// Merge mirror events into the product store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportCommand: Send + Sync {
    /// Reconcile one mirror.
    async fn import(&self, format: MirrorFormat) -> Result<ImportReport, Error>;

    /// Reconcile TXT, JSON then CSV; a failing format counts as zero.
    async fn import_all(&self) -> ImportAllReport;
}
