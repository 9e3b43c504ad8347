//! GGR CLI - Matchup statistics for GGXXAC replays
//!
//! # Commands
//!
//! - `ggr stats` - Aggregate a replay folder into a matchup table
//! - `ggr json` - Export every replay as a JSON document
//! - `ggr inspect` - Decode one replay and print it
//! - `ggr config` - Show or update the config file
//!
//! # Usage
//!
//! ```bash
//! # Remember who you are and where the replays live
//! ggr config --name "Alice" --dir "D:/Replays"
//!
//! # Sol's matchups, best first, online only
//! ggr stats --character Sol --view matchups-sorted --scope online
//!
//! # Everything as JSON
//! ggr json --out exported/
//! ```

mod config;
mod inspect;
mod json;
mod replays;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// GGR CLI - Matchup statistics for GGXXAC replays
#[derive(Parser)]
#[command(name = "ggr")]
#[command(about = "Matchup statistics for GGXXAC replays")]
#[command(version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate replays into per-character win rates
    Stats(stats::StatsArgs),

    /// Write one JSON document per replay
    Json(json::JsonArgs),

    /// Decode a single replay and print its JSON view
    Inspect(inspect::InspectArgs),

    /// Show or update the config file
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Stats(args) => stats::execute(args),
        Commands::Json(args) => json::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Config(args) => config::execute(args),
    }
}
