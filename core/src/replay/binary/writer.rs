//! Binary replay container writer
//!
//! Encodes a [`ReplayRecord`] into a fresh metadata block. Used to build
//! containers from scratch; existing replay files are never rewritten.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Cursor, Write};

use super::layout::{CONTAINER_LEN, FIELDS, FieldTag, MAGIC, Width};
use super::text::encode_name;
use crate::replay::types::*;

/// Writer for the binary replay container
pub struct BinaryWriter<W: Write> {
    writer: W,
}

impl<W: Write> BinaryWriter<W> {
    /// Create a new binary writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete metadata block for `record`
    pub fn write_record(&mut self, record: &ReplayRecord) -> io::Result<()> {
        let mut block = [0u8; CONTAINER_LEN];
        let mut cursor = Cursor::new(&mut block[..]);
        cursor.write_all(&MAGIC)?;

        for field in FIELDS {
            cursor.set_position(field.offset);
            let value = field_value(record, field.tag);
            match field.width {
                Width::U8 => cursor.write_u8(value as u8)?,
                Width::U16 => cursor.write_u16::<LittleEndian>(value as u16)?,
                Width::U32 => cursor.write_u32::<LittleEndian>(value as u32)?,
                Width::I32 => cursor.write_i32::<LittleEndian>(value as i32)?,
                Width::U64 => cursor.write_u64::<LittleEndian>(value as u64)?,
                Width::Name => {
                    let name = match field.tag {
                        FieldTag::Player2Name => record.player2.name.as_deref(),
                        _ => record.player1.name.as_deref(),
                    };
                    cursor.write_all(&encode_name(name.unwrap_or_default()))?;
                }
            }
        }

        self.writer.write_all(&block)
    }

    /// Consume the writer and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Encode `record` into a new buffer
pub fn encode(record: &ReplayRecord) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(CONTAINER_LEN);
    // Writing into a Vec cannot fail
    let _ = BinaryWriter::new(&mut buffer).write_record(record);
    buffer
}

/// Integer stored for `tag`; names are handled separately
fn field_value(record: &ReplayRecord, tag: FieldTag) -> i128 {
    let ts = &record.timestamp;
    let p1 = &record.player1;
    let p2 = &record.player2;

    match tag {
        FieldTag::Year => ts.year.into(),
        FieldTag::Month => ts.month.into(),
        FieldTag::Day => ts.day.into(),
        FieldTag::Hour => ts.hour.into(),
        FieldTag::Minute => ts.minute.into(),
        FieldTag::Second => ts.second.into(),
        FieldTag::TimezoneBias => ts.bias_minutes.into(),
        FieldTag::Player1SteamId => p1.steam_id.unwrap_or(0).into(),
        FieldTag::Player2SteamId => p2.steam_id.unwrap_or(0).into(),
        FieldTag::Player1Name | FieldTag::Player2Name => 0,
        FieldTag::Player1Character => p1.character.code().into(),
        FieldTag::Player2Character => p2.character.code().into(),
        FieldTag::ExChars => record.ex_chars().into(),
        FieldTag::TeamMode => {
            if record.team() {
                2
            } else {
                1
            }
        }
        FieldTag::Ruleset => record.accent_core_ruleset().into(),
        FieldTag::Player1Rounds => p1.rounds.into(),
        FieldTag::Player2Rounds => p2.rounds.into(),
        FieldTag::Status => record.flags.to_status().into(),
        FieldTag::Ping => record.ping_ms.into(),
        FieldTag::Duration => record.duration_frames.into(),
        FieldTag::Player1Score => p1.score.into(),
        FieldTag::Player2Score => p2.score.into(),
        FieldTag::Player1Rank => p1.rank.map_or(0, |r| r.code()).into(),
        FieldTag::Player2Rank => p2.rank.map_or(0, |r| r.code()).into(),
        FieldTag::Winner => match record.winner {
            Some(Side::Player1) => 1,
            Some(Side::Player2) => 2,
            None => 3,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::binary::layout::field_for;
    use crate::roster::Character;
    use crate::test_utils::{offline_record, online_record};

    fn byte_at(bytes: &[u8], tag: FieldTag) -> u8 {
        bytes[field_for(tag).unwrap().offset as usize]
    }

    #[test]
    fn test_write_header() {
        let record = offline_record(Character::Sol, Character::Ky, Some(Side::Player1));
        let bytes = encode(&record);

        assert_eq!(bytes.len(), CONTAINER_LEN);
        assert_eq!(&bytes[..12], &MAGIC);
        assert_eq!(byte_at(&bytes, FieldTag::Player1Character), 1);
        assert_eq!(byte_at(&bytes, FieldTag::Player2Character), 2);
        assert_eq!(byte_at(&bytes, FieldTag::Winner), 1);
    }

    #[test]
    fn test_write_little_endian() {
        let mut record = online_record("Alice", Character::Sol, "Bob", Character::Ky, None);
        record.timestamp.year = 0x07E8;
        record.timestamp.bias_minutes = -540;
        record.duration_frames = 0x0001_0203;
        let bytes = encode(&record);

        assert_eq!(&bytes[0x1A..0x1C], &[0xE8, 0x07]);
        assert_eq!(&bytes[0x77..0x7B], &(-540i32).to_le_bytes());
        assert_eq!(&bytes[0x7F..0x83], &[0x03, 0x02, 0x01, 0x00]);
        assert_eq!(byte_at(&bytes, FieldTag::Winner), 3);
    }

    #[test]
    fn test_write_names_padded() {
        let record = online_record("Alice", Character::Sol, "Bob", Character::Ky, None);
        let bytes = encode(&record);
        assert_eq!(&bytes[0x32..0x37], b"Alice");
        assert!(bytes[0x37..0x52].iter().all(|&b| b == 0));
        assert_eq!(&bytes[0x52..0x55], b"Bob");
    }

    #[test]
    fn test_into_inner_appends() {
        let record = offline_record(Character::Sol, Character::Ky, None);
        let mut writer = BinaryWriter::new(vec![0xAA]);
        writer.write_record(&record).unwrap();
        let buffer = writer.into_inner();
        assert_eq!(buffer.len(), CONTAINER_LEN + 1);
        assert_eq!(buffer[0], 0xAA);
    }
}
