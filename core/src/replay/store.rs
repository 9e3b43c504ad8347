//! Record store
//!
//! Decodes a batch of byte sources into records, partitioning successes from
//! failures. A failed source never stops the batch and is never retried.
//!
//! # Example
//!
//! ```ignore
//! use ggr_core::replay::store::{load_parallel, scan_dir};
//!
//! let sources = scan_dir(&replay_dir, "ggr")?;
//! let report = load_parallel(&sources);
//!
//! for corrupt in &report.failures {
//!     eprintln!("{}", corrupt.id);
//! }
//! ```

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::replay::binary::decode;
use crate::replay::error::{CorruptReplay, DecodeError};
use crate::replay::types::ReplayRecord;

/// Something that can produce the bytes of one replay
pub trait ByteSource {
    /// Identifier reported when the source fails to decode
    fn id(&self) -> String;

    /// Read the full contents
    fn read_bytes(&self) -> std::io::Result<Vec<u8>>;
}

impl ByteSource for PathBuf {
    fn id(&self) -> String {
        self.display().to_string()
    }

    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(self)
    }
}

impl ByteSource for &Path {
    fn id(&self) -> String {
        self.display().to_string()
    }

    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(self)
    }
}

/// Replay file found under a scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFile {
    pub path: PathBuf,
    /// Path relative to the scanned root, used as the identifier
    pub relative: PathBuf,
}

impl ByteSource for ReplayFile {
    fn id(&self) -> String {
        self.relative.display().to_string()
    }

    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

/// In-memory replay bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySource {
    pub id: String,
    pub bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            bytes,
        }
    }
}

impl ByteSource for MemorySource {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Outcome of decoding a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Decoded records, in source order
    pub records: Vec<ReplayRecord>,
    /// Sources that failed, in source order
    pub failures: Vec<CorruptReplay>,
}

impl LoadReport {
    fn push(&mut self, result: Result<ReplayRecord, CorruptReplay>) {
        match result {
            Ok(record) => self.records.push(record),
            Err(corrupt) => self.failures.push(corrupt),
        }
    }

    /// Total number of sources attempted
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Read and decode a single source
pub fn decode_source<S: ByteSource + ?Sized>(source: &S) -> Result<ReplayRecord, CorruptReplay> {
    let id = source.id();
    let bytes = source
        .read_bytes()
        .map_err(|e| CorruptReplay::new(id.clone(), DecodeError::from(e)))?;

    match decode(&bytes) {
        Ok(record) => {
            debug!(replay = %id, "decoded replay");
            Ok(record)
        }
        Err(error) => {
            warn!(replay = %id, %error, "corrupt replay");
            Err(CorruptReplay::new(id, error))
        }
    }
}

/// Lazily decode each source in order
pub fn decode_all<I>(sources: I) -> impl Iterator<Item = Result<ReplayRecord, CorruptReplay>>
where
    I: IntoIterator,
    I::Item: ByteSource,
{
    sources.into_iter().map(|source| decode_source(&source))
}

/// Decode every source sequentially
pub fn load<I>(sources: I) -> LoadReport
where
    I: IntoIterator,
    I::Item: ByteSource,
{
    let mut report = LoadReport::default();
    for result in decode_all(sources) {
        report.push(result);
    }
    log_summary(&report);
    report
}

/// Decode every source across the rayon pool.
///
/// Results keep the order of `sources`.
pub fn load_parallel<S>(sources: &[S]) -> LoadReport
where
    S: ByteSource + Sync,
{
    let results: Vec<_> = sources.par_iter().map(decode_source).collect();

    let mut report = LoadReport::default();
    for result in results {
        report.push(result);
    }
    log_summary(&report);
    report
}

fn log_summary(report: &LoadReport) {
    info!(
        decoded = report.records.len(),
        corrupt = report.failures.len(),
        "replay batch loaded"
    );
}

/// Find every file under `root` with the given extension (case-insensitive).
///
/// Results are sorted by path so batches are reproducible.
pub fn scan_dir(root: &Path, extension: &str) -> std::io::Result<Vec<ReplayFile>> {
    if !root.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("replay directory not found: {}", root.display()),
        ));
    }

    let mut files: Vec<ReplayFile> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .map(|e| {
            let path = e.path().to_path_buf();
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            ReplayFile { path, relative }
        })
        .collect();

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    debug!(root = %root.display(), count = files.len(), "scanned replay directory");
    Ok(files)
}
