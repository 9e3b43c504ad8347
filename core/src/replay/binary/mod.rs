//! Binary replay container (.ggr)
//!
//! The client prefixes every replay with a fixed-layout metadata block. Only
//! that block is read; the input stream after it is ignored.
//!
//! # File Structure
//!
//! ```text
//! 0x00  magic (12 bytes)        47 47 52 02 51 AD EE 77 45 D7 48 CD
//! 0x1A  year (u16)
//! 0x1C  month, day, hour, minute, second (u8 each)
//! 0x22  p1 steam id (u64)
//! 0x2A  p2 steam id (u64)
//! 0x32  p1 name (32 bytes)
//! 0x52  p2 name (32 bytes)
//! 0x72  p1 / p2 character (u8, 1-based)
//! 0x74  ex characters, team mode, ruleset (u8 each)
//! 0x77  timezone bias in minutes (i32)
//! 0x7B  p1 / p2 rounds (u8)
//! 0x7D  status bitmask (u8)
//! 0x7E  ping (u8)
//! 0x7F  duration in frames (u32)
//! 0x83  p1 / p2 score (u8)
//! 0x85  p1 / p2 rank (u8, 0-based, online only)
//! 0x87  winner (1, 2, or 3 for none)
//! ```

pub mod layout;
mod reader;
pub mod text;
mod writer;

pub use reader::BinaryReader;
pub use writer::{BinaryWriter, encode};

use crate::replay::error::DecodeError;
use crate::replay::types::ReplayRecord;

/// Decode a replay container held in memory
pub fn decode(bytes: &[u8]) -> Result<ReplayRecord, DecodeError> {
    BinaryReader::new(bytes).read_record()
}
