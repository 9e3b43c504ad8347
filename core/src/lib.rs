//! GGR Core - Replay decoding and matchup statistics
//!
//! This crate reads the fixed-layout `.ggr` replay containers written by
//! Guilty Gear XX Accent Core +R and folds them into per-character
//! win/loss tables.
//!
//! # Architecture
//!
//! - [`roster`] - Character and rank lookup tables
//! - [`replay`] - Binary decoder, record store, and JSON export view
//! - [`stats`] - Filters and the aggregation engine producing a [`MatchupMatrix`]
//! - [`config`] - Persistent user settings

pub mod config;
pub mod replay;
pub mod roster;
pub mod stats;
#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use roster::{CHARACTER_COUNT, Character, RANK_COUNT, Rank};

// Re-export replay types
pub use replay::{
    ByteSource, CorruptReplay, DecodeError, LoadReport, MatchFlags, MatchTimestamp, PlayerInfo,
    ReplayFile, ReplayRecord, Side, decode, encode, load, load_parallel, scan_dir,
};

// Re-export statistics types
pub use stats::{
    Cell, Filter, MatchupMatrix, MatchupRow, RankRange, ReplayScope, aggregate, aggregate_parallel,
};
