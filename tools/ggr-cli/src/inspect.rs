//! Inspect command - decode one replay and print it

use anyhow::{Context, Result};
use clap::Args;
use ggr_core::replay::json::to_json_pretty;
use ggr_core::replay::store::decode_source;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// Replay file (.ggr)
    pub file: PathBuf,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let record = decode_source(&args.file)?;
    let json = to_json_pretty(&record).context("Failed to serialize replay")?;
    println!("{}", json);
    Ok(())
}
