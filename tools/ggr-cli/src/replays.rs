//! Replay folder helpers shared by the batch commands

use anyhow::{Context, Result};
use ggr_core::config::Config;
use ggr_core::replay::{CorruptReplay, ReplayFile, scan_dir};
use std::path::{Path, PathBuf};

/// Folder from the command line, or the configured one
pub fn resolve_dir(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.unwrap_or_else(|| config.replays.dir.clone())
}

/// Every replay file under `dir`
pub fn scan(dir: &Path, config: &Config) -> Result<Vec<ReplayFile>> {
    let files = scan_dir(dir, &config.replays.extension)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    if files.is_empty() {
        tracing::warn!(
            "No .{} files found under {}",
            config.replays.extension,
            dir.display()
        );
    }
    Ok(files)
}

/// Print the corrupt files of a finished batch, once
pub fn report_failures(failures: &[CorruptReplay]) {
    if failures.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("{} corrupt replay(s) skipped:", failures.len());
    for failure in failures {
        eprintln!("  {}: {}", failure.id, failure.error);
    }
}
