//! JSON export view of a replay record
//!
//! Shape consumed by external tooling: nested `player1`/`player2` objects,
//! an ISO-8601 `date`, flat boolean flags, and `winner` as
//! `"player1"`/`"player2"`/`null`. Steam ids are decimal strings so they
//! survive JavaScript number precision.

use serde::Serialize;

use crate::replay::types::{PlayerInfo, ReplayRecord, Side};

/// Serializable export view borrowed from a [`ReplayRecord`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayJson<'a> {
    pub date: String,
    pub player1: PlayerJson<'a>,
    pub player2: PlayerJson<'a>,
    #[serde(rename = "EXchars")]
    pub ex_chars: bool,
    pub team: bool,
    #[serde(rename = "accentCore")]
    pub accent_core: bool,
    pub unfinished: bool,
    pub disconnect: bool,
    pub desync: bool,
    pub ping: u8,
    /// Match length in seconds
    pub duration: f64,
    pub winner: Option<WinnerJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerJson<'a> {
    #[serde(rename = "steamID")]
    pub steam_id: Option<String>,
    pub name: Option<&'a str>,
    pub character: &'static str,
    pub rounds: u8,
    pub score: u8,
    pub rank: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WinnerJson {
    Player1,
    Player2,
}

impl<'a> From<&'a PlayerInfo> for PlayerJson<'a> {
    fn from(player: &'a PlayerInfo) -> Self {
        Self {
            steam_id: player.steam_id.map(|id| id.to_string()),
            name: player.name.as_deref(),
            character: player.character.name(),
            rounds: player.rounds,
            score: player.score,
            rank: player.rank.map(|r| r.name()),
        }
    }
}

impl<'a> From<&'a ReplayRecord> for ReplayJson<'a> {
    fn from(record: &'a ReplayRecord) -> Self {
        Self {
            date: record.timestamp.to_iso8601(),
            player1: (&record.player1).into(),
            player2: (&record.player2).into(),
            ex_chars: record.ex_chars(),
            team: record.team(),
            accent_core: record.accent_core_ruleset(),
            unfinished: record.unfinished(),
            disconnect: record.disconnect(),
            desync: record.desync(),
            ping: record.ping_ms,
            duration: record.duration_secs(),
            winner: record.winner.map(|side| match side {
                Side::Player1 => WinnerJson::Player1,
                Side::Player2 => WinnerJson::Player2,
            }),
        }
    }
}

/// Pretty-printed export document for `record`
pub fn to_json_pretty(record: &ReplayRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReplayJson::from(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Character;
    use crate::test_utils::{offline_record, online_record};
    use serde_json::{Value, json};

    #[test]
    fn test_online_shape() {
        let record = online_record("Alice", Character::Sol, "Bob", Character::Aba, Some(Side::Player2));
        let value: Value = serde_json::to_value(ReplayJson::from(&record)).unwrap();

        assert_eq!(value["date"], "2024-03-09T21:05:07+09:00");
        assert_eq!(value["player1"]["name"], "Alice");
        assert_eq!(value["player1"]["character"], "Sol");
        assert_eq!(value["player1"]["rank"], "Champion");
        assert_eq!(value["player2"]["character"], "A.B.A");
        assert_eq!(value["winner"], "player2");
        assert_eq!(value["accentCore"], true);
        assert_eq!(value["EXchars"], false);
        assert_eq!(value["duration"], 90.0);
        assert!(value["player1"]["steamID"].is_string());
    }

    #[test]
    fn test_offline_shape() {
        let record = offline_record(Character::Ky, Character::May, None);
        let value: Value = serde_json::to_value(ReplayJson::from(&record)).unwrap();

        assert_eq!(value["winner"], Value::Null);
        assert_eq!(
            value["player2"],
            json!({
                "steamID": null,
                "name": null,
                "character": "May",
                "rounds": 1,
                "score": 0,
                "rank": null,
            })
        );
    }

    #[test]
    fn test_pretty_output() {
        let record = offline_record(Character::Ky, Character::May, Some(Side::Player1));
        let text = to_json_pretty(&record).unwrap();
        assert!(text.contains("\"winner\": \"player1\""));
        assert!(text.contains('\n'));
    }
}
