//! Port abstraction for the append-only file mirrors.

use async_trait::async_trait;

use crate::domain::{MirrorFormat, MirrorReadout, MirrorRecord};

use super::define_port_error;

define_port_error! {
    /// I/O errors raised by mirror adapters.
    ///
    /// Unparseable content is not an error: reads are lenient and report it
    /// through [`MirrorReadout::skipped`] or an empty readout.
    pub enum MirrorStoreError {
        /// The mirror file or directory could not be accessed.
        Io { format: String, message: String } => "{format} mirror i/o failed: {message}",
        /// A record could not be encoded.
        Encode { format: String, message: String } => "{format} mirror encoding failed: {message}",
    }
}

/// Append-only side files recording product save events.
///
/// No locking is provided: concurrent appends may interleave, but each record
/// is written whole.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Append one record to the mirror for `format`.
    async fn append(
        &self,
        format: MirrorFormat,
        record: &MirrorRecord,
    ) -> Result<(), MirrorStoreError>;

    /// Read every record of the mirror for `format`.
    ///
    /// A missing file yields an empty readout. Structurally broken content
    /// yields an empty readout; individually malformed entries are skipped.
    async fn read_all(&self, format: MirrorFormat) -> Result<MirrorReadout, MirrorStoreError>;
}
