//! Character and rank rosters
//!
//! Static lookup tables that translate the numeric codes stored in a replay
//! container into canonical labels. Character codes are 1-based, rank codes
//! are 0-based. Anything outside the table is rejected rather than defaulted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of playable characters in the roster
pub const CHARACTER_COUNT: usize = 25;

/// Number of online ranks
pub const RANK_COUNT: usize = 21;

/// Playable character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Character {
    Sol,
    Ky,
    May,
    Millia,
    Axl,
    Potemkin,
    Chipp,
    Eddie,
    Baiken,
    Faust,
    Testament,
    Jam,
    Anji,
    Johnny,
    Venom,
    Dizzy,
    Slayer,
    INo,
    Zappa,
    Bridget,
    RoboKy,
    Aba,
    OrderSol,
    Kliff,
    Justice,
}

impl Character {
    /// Every character in roster order (code 1 first)
    pub const ALL: [Character; CHARACTER_COUNT] = [
        Character::Sol,
        Character::Ky,
        Character::May,
        Character::Millia,
        Character::Axl,
        Character::Potemkin,
        Character::Chipp,
        Character::Eddie,
        Character::Baiken,
        Character::Faust,
        Character::Testament,
        Character::Jam,
        Character::Anji,
        Character::Johnny,
        Character::Venom,
        Character::Dizzy,
        Character::Slayer,
        Character::INo,
        Character::Zappa,
        Character::Bridget,
        Character::RoboKy,
        Character::Aba,
        Character::OrderSol,
        Character::Kliff,
        Character::Justice,
    ];

    /// Look up a character by its 1-based on-disk code
    pub fn from_code(code: u8) -> Option<Self> {
        let index = usize::from(code).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// 1-based on-disk code
    pub fn code(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based position in [`Character::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical display name
    pub fn name(self) -> &'static str {
        match self {
            Character::Sol => "Sol",
            Character::Ky => "Ky",
            Character::May => "May",
            Character::Millia => "Millia",
            Character::Axl => "Axl",
            Character::Potemkin => "Potemkin",
            Character::Chipp => "Chipp",
            Character::Eddie => "Eddie",
            Character::Baiken => "Baiken",
            Character::Faust => "Faust",
            Character::Testament => "Testament",
            Character::Jam => "Jam",
            Character::Anji => "Anji",
            Character::Johnny => "Johnny",
            Character::Venom => "Venom",
            Character::Dizzy => "Dizzy",
            Character::Slayer => "Slayer",
            Character::INo => "I-No",
            Character::Zappa => "Zappa",
            Character::Bridget => "Bridget",
            Character::RoboKy => "Robo-Ky",
            Character::Aba => "A.B.A",
            Character::OrderSol => "Order Sol",
            Character::Kliff => "Kliff",
            Character::Justice => "Justice",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Chart colour used by the presentation layer
    pub fn color(self) -> &'static str {
        const COLORS: [&str; CHARACTER_COUNT] = [
            "#b34230", "#3c5685", "#ff8c2c", "#ecc966", "#bc283c", "#836448", "#586060",
            "#474040", "#f35460", "#b9764c", "#302838", "#d73c38", "#263c68", "#181818",
            "#0d55c7", "#486880", "#8c3c00", "#e03048", "#4a4a4a", "#3b64c7", "#538681",
            "#a6390e", "#64271e", "#cda583", "#128cd0",
        ];
        COLORS[self.index()]
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Online rank, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Civilian,
    Cadet,
    Bodyguard,
    Enlistee,
    LowRankingSoldier,
    HighRankingSoldier,
    NoviceSquadsman,
    Squadsman,
    SeniorSquadsman,
    PlatoonLeader,
    BattalionLeader,
    Champion,
    Master,
    HolyKnight,
    HolyKnightCommander,
    MasterSwordsman,
    DragonHunter,
    Titan,
    Hero,
    WarGod,
    Legend,
}

impl Rank {
    /// Every rank in ascending order (code 0 first)
    pub const ALL: [Rank; RANK_COUNT] = [
        Rank::Civilian,
        Rank::Cadet,
        Rank::Bodyguard,
        Rank::Enlistee,
        Rank::LowRankingSoldier,
        Rank::HighRankingSoldier,
        Rank::NoviceSquadsman,
        Rank::Squadsman,
        Rank::SeniorSquadsman,
        Rank::PlatoonLeader,
        Rank::BattalionLeader,
        Rank::Champion,
        Rank::Master,
        Rank::HolyKnight,
        Rank::HolyKnightCommander,
        Rank::MasterSwordsman,
        Rank::DragonHunter,
        Rank::Titan,
        Rank::Hero,
        Rank::WarGod,
        Rank::Legend,
    ];

    /// Look up a rank by its 0-based on-disk code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// 0-based on-disk code, also the rank's position in the ordering
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn code(self) -> u8 {
        self.index() as u8
    }

    /// Canonical display label
    pub fn name(self) -> &'static str {
        match self {
            Rank::Civilian => "Civilian",
            Rank::Cadet => "Cadet",
            Rank::Bodyguard => "Bodyguard",
            Rank::Enlistee => "Enlistee",
            Rank::LowRankingSoldier => "Low-ranking Soldier",
            Rank::HighRankingSoldier => "High-ranking Soldier",
            Rank::NoviceSquadsman => "Novice Squadsman",
            Rank::Squadsman => "Squadsman",
            Rank::SeniorSquadsman => "Senior Squadsman",
            Rank::PlatoonLeader => "Platoon Leader",
            Rank::BattalionLeader => "Battalion Leader",
            Rank::Champion => "Champion",
            Rank::Master => "Master",
            Rank::HolyKnight => "Holy Knight",
            Rank::HolyKnightCommander => "Holy Knight Commander",
            Rank::MasterSwordsman => "Master Swordsman",
            Rank::DragonHunter => "Dragon Hunter",
            Rank::Titan => "Titan",
            Rank::Hero => "Hero",
            Rank::WarGod => "War God",
            Rank::Legend => "Legend",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_codes_are_one_based() {
        assert_eq!(Character::from_code(1), Some(Character::Sol));
        assert_eq!(Character::from_code(2), Some(Character::Ky));
        assert_eq!(Character::from_code(25), Some(Character::Justice));
        assert_eq!(Character::from_code(0), None);
        assert_eq!(Character::from_code(26), None);
        assert_eq!(Character::from_code(255), None);
    }

    #[test]
    fn test_character_code_roundtrip() {
        for (i, character) in Character::ALL.iter().enumerate() {
            assert_eq!(character.index(), i);
            assert_eq!(Character::from_code(character.code()), Some(*character));
        }
    }

    #[test]
    fn test_character_from_name() {
        assert_eq!(Character::from_name("i-no"), Some(Character::INo));
        assert_eq!(Character::from_name(" Order Sol "), Some(Character::OrderSol));
        assert_eq!(Character::from_name("Sin"), None);
    }

    #[test]
    fn test_character_colors() {
        assert_eq!(Character::Sol.color(), "#b34230");
        assert_eq!(Character::Justice.color(), "#128cd0");
        for character in Character::ALL {
            let color = character.color();
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
        }
    }

    #[test]
    fn test_rank_codes_are_zero_based() {
        assert_eq!(Rank::from_code(0), Some(Rank::Civilian));
        assert_eq!(Rank::from_code(20), Some(Rank::Legend));
        assert_eq!(Rank::from_code(21), None);
        assert_eq!(Rank::Legend.index(), RANK_COUNT - 1);
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::Civilian < Rank::Cadet);
        assert!(Rank::WarGod < Rank::Legend);
        assert_eq!(Rank::HolyKnightCommander.name(), "Holy Knight Commander");
    }
}
