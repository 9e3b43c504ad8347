//! Replay decoding
//!
//! Turns raw replay containers into validated [`ReplayRecord`] values:
//!
//! ```text
//! bytes ─→ binary::decode ─→ ReplayRecord ─→ store::load ─→ LoadReport
//!                                                  │
//!                                          records + failures
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ggr_core::replay::{decode, json::to_json_pretty};
//!
//! let bytes = std::fs::read("match.ggr")?;
//! let record = decode(&bytes)?;
//!
//! println!("{} vs {}", record.player1.character, record.player2.character);
//! println!("{}", to_json_pretty(&record)?);
//! ```

pub mod binary;
pub mod error;
pub mod json;
pub mod store;
pub mod types;

// Re-export core types
pub use types::{FRAMES_PER_SECOND, MatchFlags, MatchTimestamp, PlayerInfo, ReplayRecord, Side};

pub use binary::{BinaryReader, BinaryWriter, decode, encode};
pub use error::{CorruptReplay, DecodeError};
pub use json::ReplayJson;
pub use store::{ByteSource, LoadReport, MemorySource, ReplayFile, load, load_parallel, scan_dir};
