//! Replay decoding error types

use std::fmt;

use crate::replay::types::Side;

/// Why a replay container could not be decoded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// First 12 bytes are not the container magic
    #[error("invalid replay header")]
    InvalidMagic,

    /// Buffer ended before a field could be read
    #[error("truncated replay: {field} at offset 0x{offset:02X} is past the end")]
    Truncated { field: &'static str, offset: u64 },

    /// Character code outside 1..=25
    #[error("unknown character code: {0}")]
    UnknownCharacter(u8),

    /// Rank code outside 0..21
    #[error("unknown rank code: {0}")]
    UnknownRank(u8),

    /// Winner byte other than 1, 2 or 3
    #[error("unknown winner code: {0}")]
    UnknownWinner(u8),

    /// Name field is neither valid single-byte text nor valid UTF-16
    #[error("undecodable {0} name")]
    UndecodableName(SideLabel),

    /// Byte source could not be read
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> Self {
        DecodeError::Io(e.to_string())
    }
}

/// Display wrapper naming a side in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideLabel(pub Side);

impl fmt::Display for SideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Side::Player1 => f.write_str("player 1"),
            Side::Player2 => f.write_str("player 2"),
        }
    }
}

/// A replay that failed to decode, tagged with its source identifier
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("corrupt replay {id}: {error}")]
pub struct CorruptReplay {
    /// Path or other identifier of the offending source
    pub id: String,
    #[source]
    pub error: DecodeError,
}

impl CorruptReplay {
    pub fn new(id: impl Into<String>, error: DecodeError) -> Self {
        Self {
            id: id.into(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DecodeError::InvalidMagic.to_string(), "invalid replay header");
        assert_eq!(
            DecodeError::Truncated {
                field: "winner",
                offset: 0x87
            }
            .to_string(),
            "truncated replay: winner at offset 0x87 is past the end"
        );
        assert_eq!(
            DecodeError::UnknownCharacter(26).to_string(),
            "unknown character code: 26"
        );
        assert_eq!(
            DecodeError::UndecodableName(SideLabel(Side::Player2)).to_string(),
            "undecodable player 2 name"
        );
    }

    #[test]
    fn test_corrupt_replay_carries_id() {
        let corrupt = CorruptReplay::new("2024/match.ggr", DecodeError::UnknownWinner(9));
        assert_eq!(corrupt.id, "2024/match.ggr");
        assert_eq!(
            corrupt.to_string(),
            "corrupt replay 2024/match.ggr: unknown winner code: 9"
        );
    }
}
