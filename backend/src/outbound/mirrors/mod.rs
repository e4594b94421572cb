//! File-backed mirror store.
//!
//! Each format lives in its own file under one directory: `datos.txt`,
//! `datos.json` and `datos.csv`. TXT and CSV are plain appends; the JSON array
//! is rewritten whole through a temporary file and rename. There is no
//! locking between concurrent writers.

mod atomic_io;
mod csv_codec;
mod json_codec;
mod txt_codec;

use std::io::{self, Write};
use std::sync::Arc;

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::{debug, warn};

use crate::domain::ports::{MirrorStore, MirrorStoreError};
use crate::domain::{MirrorFormat, MirrorReadout, MirrorRecord, TraceId};

/// File name holding the mirror for `format`.
#[must_use]
pub fn mirror_file_name(format: MirrorFormat) -> &'static str {
    match format {
        MirrorFormat::Txt => "datos.txt",
        MirrorFormat::Json => "datos.json",
        MirrorFormat::Csv => "datos.csv",
    }
}

/// Mirror store writing into a single directory.
#[derive(Clone)]
pub struct FileMirrorStore {
    dir: Arc<Dir>,
}

impl FileMirrorStore {
    /// Open `root`, creating it when missing.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the directory cannot be created
    /// or opened.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self::from_dir(dir))
    }

    /// Wrap an already opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }
}

fn io_error(format: MirrorFormat, err: &impl std::fmt::Display) -> MirrorStoreError {
    MirrorStoreError::io(format.as_str(), err.to_string())
}

fn encode_error(format: MirrorFormat, err: &impl std::fmt::Display) -> MirrorStoreError {
    MirrorStoreError::encode(format.as_str(), err.to_string())
}

/// Read a mirror file; a missing file reads as empty.
fn read_bytes(dir: &Dir, format: MirrorFormat) -> Result<Vec<u8>, MirrorStoreError> {
    match dir.read(mirror_file_name(format)) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(io_error(format, &err)),
    }
}

fn append_bytes(dir: &Dir, format: MirrorFormat, bytes: &[u8]) -> Result<(), MirrorStoreError> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    let mut file = dir
        .open_with(mirror_file_name(format), &options)
        .map_err(|err| io_error(format, &err))?;
    file.write_all(bytes).map_err(|err| io_error(format, &err))
}

fn append_blocking(
    dir: &Dir,
    format: MirrorFormat,
    record: &MirrorRecord,
) -> Result<(), MirrorStoreError> {
    match format {
        MirrorFormat::Txt => append_bytes(dir, format, txt_codec::encode_line(record).as_bytes()),
        MirrorFormat::Csv => {
            let needs_header = match dir.metadata(mirror_file_name(format)) {
                Ok(meta) => meta.len() == 0,
                Err(err) if err.kind() == io::ErrorKind::NotFound => true,
                Err(err) => return Err(io_error(format, &err)),
            };
            let bytes =
                csv_codec::encode(record, needs_header).map_err(|err| encode_error(format, &err))?;
            append_bytes(dir, format, &bytes)
        }
        MirrorFormat::Json => {
            let existing = read_bytes(dir, format)?;
            let text = String::from_utf8_lossy(&existing);
            let mut items = json_codec::parse_array(&text).unwrap_or_else(|| {
                warn!("json mirror is not a readable array; starting a fresh one");
                Vec::new()
            });
            items.push(json_codec::encode(record));
            let rendered = json_codec::render(&items).map_err(|err| encode_error(format, &err))?;
            atomic_io::write_atomic(dir, mirror_file_name(format), &rendered)
                .map_err(|err| io_error(format, &err))
        }
    }
}

fn read_blocking(dir: &Dir, format: MirrorFormat) -> Result<MirrorReadout, MirrorStoreError> {
    let bytes = read_bytes(dir, format)?;
    let readout = match format {
        MirrorFormat::Txt => std::str::from_utf8(&bytes).ok().map(txt_codec::parse),
        MirrorFormat::Json => std::str::from_utf8(&bytes)
            .ok()
            .and_then(json_codec::parse_array)
            .map(|items| json_codec::decode(&items)),
        MirrorFormat::Csv => csv_codec::parse(&bytes),
    };
    Ok(readout.unwrap_or_else(|| {
        warn!(%format, "mirror content is unreadable; treating as empty");
        MirrorReadout::default()
    }))
}

fn join_error(format: MirrorFormat, err: &tokio::task::JoinError) -> MirrorStoreError {
    MirrorStoreError::io(format.as_str(), format!("mirror task failed: {err}"))
}

#[async_trait]
impl MirrorStore for FileMirrorStore {
    async fn append(
        &self,
        format: MirrorFormat,
        record: &MirrorRecord,
    ) -> Result<(), MirrorStoreError> {
        let dir = Arc::clone(&self.dir);
        let record = record.clone();
        let trace_id = TraceId::current();
        tokio::task::spawn_blocking(move || {
            let result = append_blocking(&dir, format, &record);
            debug!(%format, trace_id = ?trace_id, ok = result.is_ok(), "mirror append finished");
            result
        })
        .await
        .map_err(|err| join_error(format, &err))?
    }

    async fn read_all(&self, format: MirrorFormat) -> Result<MirrorReadout, MirrorStoreError> {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || read_blocking(&dir, format))
            .await
            .map_err(|err| join_error(format, &err))?
    }
}

#[cfg(test)]
mod tests;
