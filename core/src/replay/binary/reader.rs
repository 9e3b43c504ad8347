//! Binary replay container reader
//!
//! Validates the magic header, walks the field table once, then interprets
//! the raw values into a [`ReplayRecord`].

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use super::layout::{FIELDS, Field, FieldTag, MAGIC, NAME_LEN, Width};
use super::text::decode_name;
use crate::replay::error::{DecodeError, SideLabel};
use crate::replay::types::*;
use crate::roster::{Character, Rank};

/// Reader over an in-memory replay container
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BinaryReader<'a> {
    /// Create a new binary reader
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    /// Decode the complete record
    pub fn read_record(&mut self) -> Result<ReplayRecord, DecodeError> {
        self.check_magic()?;

        let mut raw = RawFields::default();
        for field in FIELDS {
            let value = self.read_field(field)?;
            raw.apply(field.tag, value);
        }

        raw.into_record()
    }

    fn check_magic(&mut self) -> Result<(), DecodeError> {
        self.cursor.set_position(0);
        let mut magic = [0u8; MAGIC.len()];
        self.cursor
            .read_exact(&mut magic)
            .map_err(|_| DecodeError::InvalidMagic)?;
        if magic != MAGIC {
            return Err(DecodeError::InvalidMagic);
        }
        Ok(())
    }

    fn read_field(&mut self, field: &Field) -> Result<FieldValue, DecodeError> {
        self.cursor.set_position(field.offset);

        let truncated = |_| DecodeError::Truncated {
            field: field.tag.label(),
            offset: field.offset,
        };

        let value = match field.width {
            Width::U8 => FieldValue::Int(self.cursor.read_u8().map_err(truncated)?.into()),
            Width::U16 => FieldValue::Int(
                self.cursor
                    .read_u16::<LittleEndian>()
                    .map_err(truncated)?
                    .into(),
            ),
            Width::U32 => FieldValue::Int(
                self.cursor
                    .read_u32::<LittleEndian>()
                    .map_err(truncated)?
                    .into(),
            ),
            Width::I32 => {
                FieldValue::Signed(self.cursor.read_i32::<LittleEndian>().map_err(truncated)?)
            }
            Width::U64 => {
                FieldValue::Int(self.cursor.read_u64::<LittleEndian>().map_err(truncated)?)
            }
            Width::Name => {
                let mut bytes = [0u8; NAME_LEN];
                self.cursor.read_exact(&mut bytes).map_err(truncated)?;
                let side = match field.tag {
                    FieldTag::Player2Name => Side::Player2,
                    _ => Side::Player1,
                };
                let (name, _) =
                    decode_name(&bytes).ok_or(DecodeError::UndecodableName(SideLabel(side)))?;
                FieldValue::Text(name)
            }
        };

        Ok(value)
    }
}

/// Raw value read from one field
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Int(u64),
    Signed(i32),
    Text(String),
}

impl FieldValue {
    fn int(&self) -> u64 {
        match self {
            FieldValue::Int(v) => *v,
            FieldValue::Signed(v) => *v as u64,
            FieldValue::Text(_) => 0,
        }
    }

    // Widths in the table match the targets, so truncation never drops bits
    fn byte(&self) -> u8 {
        self.int() as u8
    }

    fn text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            _ => String::new(),
        }
    }
}

/// Field values before interpretation
#[derive(Debug, Default)]
struct RawFields {
    timestamp: MatchTimestamp,
    steam_ids: [u64; 2],
    names: [String; 2],
    characters: [u8; 2],
    ex_chars: u8,
    team_mode: u8,
    ruleset: u8,
    rounds: [u8; 2],
    status: u8,
    ping: u8,
    duration: u32,
    scores: [u8; 2],
    ranks: [u8; 2],
    winner: u8,
}

impl RawFields {
    fn apply(&mut self, tag: FieldTag, value: FieldValue) {
        match tag {
            FieldTag::Year => self.timestamp.year = value.int() as u16,
            FieldTag::Month => self.timestamp.month = value.byte(),
            FieldTag::Day => self.timestamp.day = value.byte(),
            FieldTag::Hour => self.timestamp.hour = value.byte(),
            FieldTag::Minute => self.timestamp.minute = value.byte(),
            FieldTag::Second => self.timestamp.second = value.byte(),
            FieldTag::Player1SteamId => self.steam_ids[0] = value.int(),
            FieldTag::Player2SteamId => self.steam_ids[1] = value.int(),
            FieldTag::Player1Name => self.names[0] = value.text(),
            FieldTag::Player2Name => self.names[1] = value.text(),
            FieldTag::Player1Character => self.characters[0] = value.byte(),
            FieldTag::Player2Character => self.characters[1] = value.byte(),
            FieldTag::ExChars => self.ex_chars = value.byte(),
            FieldTag::TeamMode => self.team_mode = value.byte(),
            FieldTag::Ruleset => self.ruleset = value.byte(),
            FieldTag::TimezoneBias => {
                if let FieldValue::Signed(bias) = value {
                    self.timestamp.bias_minutes = bias;
                }
            }
            FieldTag::Player1Rounds => self.rounds[0] = value.byte(),
            FieldTag::Player2Rounds => self.rounds[1] = value.byte(),
            FieldTag::Status => self.status = value.byte(),
            FieldTag::Ping => self.ping = value.byte(),
            FieldTag::Duration => self.duration = value.int() as u32,
            FieldTag::Player1Score => self.scores[0] = value.byte(),
            FieldTag::Player2Score => self.scores[1] = value.byte(),
            FieldTag::Player1Rank => self.ranks[0] = value.byte(),
            FieldTag::Player2Rank => self.ranks[1] = value.byte(),
            FieldTag::Winner => self.winner = value.byte(),
        }
    }

    fn into_record(self) -> Result<ReplayRecord, DecodeError> {
        let [name1, name2] = self.names;
        let online = !name2.is_empty();

        let winner = match self.winner {
            1 => Some(Side::Player1),
            2 => Some(Side::Player2),
            3 => None,
            other => return Err(DecodeError::UnknownWinner(other)),
        };

        let mut flags = MatchFlags::from_status(self.status);
        flags.set(MatchFlags::EX_CHARS, self.ex_chars == 1);
        flags.set(MatchFlags::TEAM, self.team_mode == 2);
        flags.set(MatchFlags::ACCENT_CORE, self.ruleset == 1);

        let player1 = PlayerInfo {
            steam_id: non_zero(self.steam_ids[0]),
            name: non_empty(name1),
            character: character(self.characters[0])?,
            rounds: self.rounds[0],
            score: self.scores[0],
            rank: if online { Some(rank(self.ranks[0])?) } else { None },
        };

        let player2 = PlayerInfo {
            steam_id: if online { non_zero(self.steam_ids[1]) } else { None },
            name: non_empty(name2),
            character: character(self.characters[1])?,
            rounds: self.rounds[1],
            score: self.scores[1],
            rank: if online { Some(rank(self.ranks[1])?) } else { None },
        };

        Ok(ReplayRecord {
            timestamp: self.timestamp,
            player1,
            player2,
            flags,
            ping_ms: self.ping,
            duration_frames: self.duration,
            winner,
        })
    }
}

fn character(code: u8) -> Result<Character, DecodeError> {
    Character::from_code(code).ok_or(DecodeError::UnknownCharacter(code))
}

fn rank(code: u8) -> Result<Rank, DecodeError> {
    Rank::from_code(code).ok_or(DecodeError::UnknownRank(code))
}

fn non_zero(id: u64) -> Option<u64> {
    (id != 0).then_some(id)
}

fn non_empty(name: String) -> Option<String> {
    (!name.is_empty()).then_some(name)
}
