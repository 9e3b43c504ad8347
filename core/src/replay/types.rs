//! Core types for decoded replays
//!
//! A [`ReplayRecord`] is produced once by the decoder and never mutated
//! afterwards. Everything downstream (store, aggregation, JSON export) reads
//! from these values.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::roster::{Character, Rank};

/// Frames per second of match time
pub const FRAMES_PER_SECOND: u32 = 60;

/// Player slot within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    /// The other slot
    pub fn opposite(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }
}

/// Decoded match metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub timestamp: MatchTimestamp,
    pub player1: PlayerInfo,
    pub player2: PlayerInfo,
    pub flags: MatchFlags,
    pub ping_ms: u8,
    pub duration_frames: u32,
    /// `None` for draws and matches without a decided winner
    pub winner: Option<Side>,
}

impl ReplayRecord {
    /// A match is online iff the second player has a name
    pub fn is_online(&self) -> bool {
        self.player2.name.is_some()
    }

    pub fn player(&self, side: Side) -> &PlayerInfo {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    /// Side whose name equals `name` exactly, preferring player 1
    pub fn user_side(&self, name: &str) -> Option<Side> {
        if self.player1.name.as_deref() == Some(name) {
            Some(Side::Player1)
        } else if self.player2.name.as_deref() == Some(name) {
            Some(Side::Player2)
        } else {
            None
        }
    }

    /// Match length in seconds
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.duration_frames) / f64::from(FRAMES_PER_SECOND)
    }

    pub fn ex_chars(&self) -> bool {
        self.flags.contains(MatchFlags::EX_CHARS)
    }

    pub fn team(&self) -> bool {
        self.flags.contains(MatchFlags::TEAM)
    }

    pub fn accent_core_ruleset(&self) -> bool {
        self.flags.contains(MatchFlags::ACCENT_CORE)
    }

    pub fn unfinished(&self) -> bool {
        self.flags.contains(MatchFlags::UNFINISHED)
    }

    pub fn disconnect(&self) -> bool {
        self.flags.contains(MatchFlags::DISCONNECT)
    }

    pub fn desync(&self) -> bool {
        self.flags.contains(MatchFlags::DESYNC)
    }
}

/// Per-player metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// `None` when the stored id is zero (or player 2 of an offline match)
    pub steam_id: Option<u64>,
    /// `None` when the name field is empty after NUL removal
    pub name: Option<String>,
    pub character: Character,
    pub rounds: u8,
    pub score: u8,
    /// Only present for online matches
    pub rank: Option<Rank>,
}

bitflags::bitflags! {
    /// Match-level boolean flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatchFlags: u8 {
        /// EX character versions allowed
        const EX_CHARS = 0b0000_0001;
        /// Team mode rather than single
        const TEAM = 0b0000_0010;
        /// Accent Core ruleset rather than +R
        const ACCENT_CORE = 0b0000_0100;
        /// Match ended before a winner was decided
        const UNFINISHED = 0b0000_1000;
        /// A player disconnected
        const DISCONNECT = 0b0001_0000;
        /// Simulation desynchronised
        const DESYNC = 0b0010_0000;
    }
}

impl MatchFlags {
    /// Flags carried by the status bitmask byte.
    ///
    /// The byte is interpreted by literal value: odd values are unfinished,
    /// 2/3/6/7 are disconnects, and anything from 4 upward is a desync.
    pub fn from_status(mask: u8) -> Self {
        let mut flags = MatchFlags::empty();
        flags.set(MatchFlags::UNFINISHED, mask % 2 == 1);
        flags.set(MatchFlags::DISCONNECT, matches!(mask, 2 | 3 | 6 | 7));
        flags.set(MatchFlags::DESYNC, mask >= 4);
        flags
    }

    /// Inverse of [`MatchFlags::from_status`] for the status-carried bits
    pub fn to_status(self) -> u8 {
        let mut mask = 0;
        if self.contains(MatchFlags::UNFINISHED) {
            mask |= 0b001;
        }
        if self.contains(MatchFlags::DISCONNECT) {
            mask |= 0b010;
        }
        if self.contains(MatchFlags::DESYNC) {
            mask |= 0b100;
        }
        mask
    }
}

// Manual serde implementation for MatchFlags
impl Serialize for MatchFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MatchFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(MatchFlags::from_bits_truncate(bits))
    }
}

/// Recording time as stored in the container
///
/// Components are kept raw so that a nonsensical date never fails decoding;
/// [`MatchTimestamp::to_datetime`] validates on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Timezone bias against GMT in minutes (`UTC = local + bias`)
    pub bias_minutes: i32,
}

impl MatchTimestamp {
    /// Offset of local time from UTC in minutes
    pub fn utc_offset_minutes(&self) -> i32 {
        self.bias_minutes.saturating_neg()
    }

    /// ISO-8601 string with explicit offset, e.g. `2024-03-09T21:05:07+09:00`
    pub fn to_iso8601(&self) -> String {
        let mut out = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        );

        let offset = self.utc_offset_minutes();
        if offset == 0 {
            out.push('Z');
        } else {
            let sign = if offset > 0 { '+' } else { '-' };
            let abs = offset.unsigned_abs();
            let _ = write!(out, "{}{:02}:{:02}", sign, abs / 60, abs % 60);
        }
        out
    }

    /// Validated date-time, or `None` if the components don't form one
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.utc_offset_minutes().checked_mul(60)?)?;
        NaiveDate::from_ymd_opt(i32::from(self.year), self.month.into(), self.day.into())?
            .and_hms_opt(self.hour.into(), self.minute.into(), self.second.into())?
            .and_local_timezone(offset)
            .single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp(bias_minutes: i32) -> MatchTimestamp {
        MatchTimestamp {
            year: 2024,
            month: 3,
            day: 9,
            hour: 21,
            minute: 5,
            second: 7,
            bias_minutes,
        }
    }

    #[test]
    fn test_status_mask_literal_values() {
        assert_eq!(MatchFlags::from_status(0), MatchFlags::empty());

        let one = MatchFlags::from_status(1);
        assert!(one.contains(MatchFlags::UNFINISHED));
        assert!(!one.contains(MatchFlags::DISCONNECT));
        assert!(!one.contains(MatchFlags::DESYNC));

        let three = MatchFlags::from_status(3);
        assert!(three.contains(MatchFlags::UNFINISHED));
        assert!(three.contains(MatchFlags::DISCONNECT));
        assert!(!three.contains(MatchFlags::DESYNC));

        let four = MatchFlags::from_status(4);
        assert!(four.contains(MatchFlags::DESYNC));
        assert!(!four.contains(MatchFlags::UNFINISHED));
        assert!(!four.contains(MatchFlags::DISCONNECT));
    }

    #[test]
    fn test_status_mask_high_values() {
        // 10 is neither odd nor one of the disconnect values
        let ten = MatchFlags::from_status(10);
        assert_eq!(ten, MatchFlags::DESYNC);

        let seven = MatchFlags::from_status(7);
        assert_eq!(
            seven,
            MatchFlags::UNFINISHED | MatchFlags::DISCONNECT | MatchFlags::DESYNC
        );
    }

    #[test]
    fn test_status_roundtrip_for_low_values() {
        for mask in 0..8u8 {
            assert_eq!(MatchFlags::from_status(mask).to_status(), mask);
        }
    }

    #[test]
    fn test_iso8601_utc() {
        assert_eq!(timestamp(0).to_iso8601(), "2024-03-09T21:05:07Z");
    }

    #[test]
    fn test_iso8601_positive_offset() {
        // JST has a bias of -540 minutes
        assert_eq!(timestamp(-540).to_iso8601(), "2024-03-09T21:05:07+09:00");
        assert_eq!(timestamp(-330).to_iso8601(), "2024-03-09T21:05:07+05:30");
    }

    #[test]
    fn test_iso8601_negative_offset() {
        assert_eq!(timestamp(300).to_iso8601(), "2024-03-09T21:05:07-05:00");
        assert_eq!(timestamp(210).to_iso8601(), "2024-03-09T21:05:07-03:30");
    }

    #[test]
    fn test_iso8601_zero_pads_components() {
        let ts = MatchTimestamp {
            year: 7,
            month: 1,
            day: 2,
            hour: 3,
            minute: 4,
            second: 5,
            bias_minutes: -60,
        };
        assert_eq!(ts.to_iso8601(), "0007-01-02T03:04:05+01:00");
    }

    #[test]
    fn test_to_datetime() {
        let dt = timestamp(-540).to_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-09T21:05:07+09:00");

        let invalid = MatchTimestamp {
            month: 13,
            ..timestamp(0)
        };
        assert!(invalid.to_datetime().is_none());
        assert!(MatchTimestamp::default().to_datetime().is_none());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Player1.opposite(), Side::Player2);
        assert_eq!(Side::Player2.opposite(), Side::Player1);
    }
}
