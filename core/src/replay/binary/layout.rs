//! Field table for the replay container
//!
//! Every field lives at a fixed offset from the start of the file. The
//! reader and the writer both walk [`FIELDS`] in order, so adding or
//! removing a field is a single table edit.

/// Container magic (`GGR\x02Q\xAD\xEEwE\xD7H\xCD`)
pub const MAGIC: [u8; 12] = [
    0x47, 0x47, 0x52, 0x02, 0x51, 0xAD, 0xEE, 0x77, 0x45, 0xD7, 0x48, 0xCD,
];

/// Length of the fixed metadata block (magic through winner byte)
pub const CONTAINER_LEN: usize = 0x88;

/// Raw byte length of a name field
pub const NAME_LEN: usize = 32;

/// Storage width of a field. All integers are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
    /// Signed 32-bit
    I32,
    U64,
    /// 32 raw bytes of single-byte or UTF-16 text
    Name,
}

impl Width {
    pub fn byte_len(self) -> usize {
        match self {
            Width::U8 => 1,
            Width::U16 => 2,
            Width::U32 | Width::I32 => 4,
            Width::U64 => 8,
            Width::Name => NAME_LEN,
        }
    }
}

/// Semantic tag of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Player1SteamId,
    Player2SteamId,
    Player1Name,
    Player2Name,
    Player1Character,
    Player2Character,
    ExChars,
    TeamMode,
    Ruleset,
    TimezoneBias,
    Player1Rounds,
    Player2Rounds,
    Status,
    Ping,
    Duration,
    Player1Score,
    Player2Score,
    Player1Rank,
    Player2Rank,
    Winner,
}

impl FieldTag {
    /// Human-readable label for error messages
    pub fn label(self) -> &'static str {
        match self {
            FieldTag::Year => "year",
            FieldTag::Month => "month",
            FieldTag::Day => "day",
            FieldTag::Hour => "hour",
            FieldTag::Minute => "minute",
            FieldTag::Second => "second",
            FieldTag::Player1SteamId => "p1 steam id",
            FieldTag::Player2SteamId => "p2 steam id",
            FieldTag::Player1Name => "p1 name",
            FieldTag::Player2Name => "p2 name",
            FieldTag::Player1Character => "p1 character",
            FieldTag::Player2Character => "p2 character",
            FieldTag::ExChars => "ex characters",
            FieldTag::TeamMode => "team mode",
            FieldTag::Ruleset => "ruleset",
            FieldTag::TimezoneBias => "timezone bias",
            FieldTag::Player1Rounds => "p1 rounds",
            FieldTag::Player2Rounds => "p2 rounds",
            FieldTag::Status => "status bitmask",
            FieldTag::Ping => "ping",
            FieldTag::Duration => "duration",
            FieldTag::Player1Score => "p1 score",
            FieldTag::Player2Score => "p2 score",
            FieldTag::Player1Rank => "p1 rank",
            FieldTag::Player2Rank => "p2 rank",
            FieldTag::Winner => "winner",
        }
    }
}

/// One entry of the field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub tag: FieldTag,
    pub offset: u64,
    pub width: Width,
}

const fn field(tag: FieldTag, offset: u64, width: Width) -> Field {
    Field { tag, offset, width }
}

/// The container layout, in file order
pub const FIELDS: &[Field] = &[
    field(FieldTag::Year, 0x1A, Width::U16),
    field(FieldTag::Month, 0x1C, Width::U8),
    field(FieldTag::Day, 0x1D, Width::U8),
    field(FieldTag::Hour, 0x1E, Width::U8),
    field(FieldTag::Minute, 0x1F, Width::U8),
    field(FieldTag::Second, 0x20, Width::U8),
    field(FieldTag::Player1SteamId, 0x22, Width::U64),
    field(FieldTag::Player2SteamId, 0x2A, Width::U64),
    field(FieldTag::Player1Name, 0x32, Width::Name),
    field(FieldTag::Player2Name, 0x52, Width::Name),
    field(FieldTag::Player1Character, 0x72, Width::U8),
    field(FieldTag::Player2Character, 0x73, Width::U8),
    field(FieldTag::ExChars, 0x74, Width::U8),
    field(FieldTag::TeamMode, 0x75, Width::U8),
    field(FieldTag::Ruleset, 0x76, Width::U8),
    field(FieldTag::TimezoneBias, 0x77, Width::I32),
    field(FieldTag::Player1Rounds, 0x7B, Width::U8),
    field(FieldTag::Player2Rounds, 0x7C, Width::U8),
    field(FieldTag::Status, 0x7D, Width::U8),
    field(FieldTag::Ping, 0x7E, Width::U8),
    field(FieldTag::Duration, 0x7F, Width::U32),
    field(FieldTag::Player1Score, 0x83, Width::U8),
    field(FieldTag::Player2Score, 0x84, Width::U8),
    field(FieldTag::Player1Rank, 0x85, Width::U8),
    field(FieldTag::Player2Rank, 0x86, Width::U8),
    field(FieldTag::Winner, 0x87, Width::U8),
];

/// Table entry for `tag`
pub fn field_for(tag: FieldTag) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.tag == tag)
}
