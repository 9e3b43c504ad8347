//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for user settings.
//! Settings are stored in TOML format in the platform-specific config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::stats::ReplayScope;

/// File name inside [`config_dir`]
pub const CONFIG_FILE: &str = "config.toml";

/// Replay folder relative to the user's Documents directory
pub const GAME_REPLAY_SUBDIR: &str = "ARC SYSTEM WORKS/GGXXAC/Replays";

/// User configuration.
///
/// Every section falls back to its defaults when missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Identity settings
    #[serde(default)]
    pub player: PlayerConfig,
    /// Where replays are found
    #[serde(default)]
    pub replays: ReplaysConfig,
    /// Aggregation defaults
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Identity settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerConfig {
    /// In-game name matched against replay player names (default: empty)
    #[serde(default)]
    pub name: String,
}

/// Replay location settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaysConfig {
    /// Replay root (default: the game's replay folder)
    #[serde(default = "default_replay_dir")]
    pub dir: PathBuf,
    /// File extension to scan for, without the dot (default: ggr)
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Aggregation defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatsConfig {
    /// Which matches count (default: both)
    #[serde(default)]
    pub scope: ReplayScope,
}

fn default_extension() -> String {
    "ggr".to_string()
}

/// Returns the game's replay folder under the user's Documents directory.
///
/// Falls back to the relative path when no Documents directory exists.
pub fn default_replay_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        .map(|docs| docs.join(GAME_REPLAY_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(GAME_REPLAY_SUBDIR))
}

impl Default for ReplaysConfig {
    fn default() -> Self {
        Self {
            dir: default_replay_dir(),
            extension: default_extension(),
        }
    }
}

/// Errors from reading or writing a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no configuration directory for this platform")]
    NoConfigDir,
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\ggr\config`
/// On macOS: `~/Library/Application Support/io.ggr.ggr`
/// On Linux: `~/.config/ggr`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.ggr", "", "ggr").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of the config file, if the platform has a config directory
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from disk.
///
/// Reads `config.toml` from the platform's configuration directory.
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    match load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Config::default()
        }
        Err(e) => {
            tracing::warn!("{}; using defaults", e);
            Config::default()
        }
    }
}

/// Loads a configuration file at an explicit path.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves the configuration to the platform's configuration directory.
///
/// Creates the directory if it doesn't exist and returns the written path.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Saves the configuration to an explicit path, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
