//! Shared test utilities for unit tests

use crate::replay::types::*;
use crate::roster::{Character, Rank};

fn player(name: Option<&str>, character: Character, rank: Option<Rank>) -> PlayerInfo {
    PlayerInfo {
        steam_id: name.map(|_| 76_561_198_000_000_000 + u64::from(character.code())),
        name: name.map(str::to_string),
        character,
        rounds: 0,
        score: 0,
        rank,
    }
}

fn record(player1: PlayerInfo, player2: PlayerInfo, winner: Option<Side>) -> ReplayRecord {
    let (rounds1, rounds2) = match winner {
        Some(Side::Player1) => (2, 1),
        Some(Side::Player2) => (1, 2),
        None => (1, 1),
    };
    ReplayRecord {
        timestamp: MatchTimestamp {
            year: 2024,
            month: 3,
            day: 9,
            hour: 21,
            minute: 5,
            second: 7,
            bias_minutes: -540,
        },
        player1: PlayerInfo {
            rounds: rounds1,
            ..player1
        },
        player2: PlayerInfo {
            rounds: rounds2,
            ..player2
        },
        flags: MatchFlags::ACCENT_CORE,
        ping_ms: 0,
        duration_frames: 60 * 90,
        winner,
    }
}

/// Local match: player 1 named "Local", no player 2 name, no ranks
pub fn offline_record(p1: Character, p2: Character, winner: Option<Side>) -> ReplayRecord {
    record(
        player(Some("Local"), p1, None),
        player(None, p2, None),
        winner,
    )
}

/// Online match with both players at Champion rank
pub fn online_record(
    name1: &str,
    p1: Character,
    name2: &str,
    p2: Character,
    winner: Option<Side>,
) -> ReplayRecord {
    online_ranked(name1, p1, Rank::Champion, name2, p2, Rank::Champion, winner)
}

/// Online match with explicit ranks
pub fn online_ranked(
    name1: &str,
    p1: Character,
    rank1: Rank,
    name2: &str,
    p2: Character,
    rank2: Rank,
    winner: Option<Side>,
) -> ReplayRecord {
    let mut r = record(
        player(Some(name1), p1, Some(rank1)),
        player(Some(name2), p2, Some(rank2)),
        winner,
    );
    r.ping_ms = 48;
    r
}
