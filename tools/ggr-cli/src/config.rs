//! Config command - show or update the config file

use anyhow::{Context, Result};
use clap::Args;
use ggr_core::config::{self, Config};
use std::path::PathBuf;

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Set your in-game name
    #[arg(long)]
    pub name: Option<String>,

    /// Set the replay folder
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Execute the config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    let mut config = config::load();

    if !apply(&mut config, args) {
        match config::config_path() {
            Some(path) => println!("# {}", path.display()),
            None => println!("# (no config directory on this platform)"),
        }
        print!("{}", toml::to_string_pretty(&config).context("Failed to serialize config")?);
        return Ok(());
    }

    let path = config::save(&config)?;
    println!("Saved {}", path.display());
    Ok(())
}

/// Apply the requested changes. Returns false when nothing was requested.
fn apply(config: &mut Config, args: ConfigArgs) -> bool {
    let mut changed = false;
    if let Some(name) = args.name {
        config.player.name = name;
        changed = true;
    }
    if let Some(dir) = args.dir {
        config.replays.dir = dir;
        changed = true;
    }
    changed
}
