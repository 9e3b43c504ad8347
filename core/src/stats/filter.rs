//! Aggregation filters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::roster::{RANK_COUNT, Rank};

/// Which matches count toward a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayScope {
    /// Online and offline matches
    #[default]
    Both,
    /// Only matches with a named second player
    #[serde(rename = "online")]
    OnlineOnly,
    /// Only local matches
    #[serde(rename = "offline")]
    OfflineOnly,
}

impl ReplayScope {
    pub fn includes_online(self) -> bool {
        self != ReplayScope::OfflineOnly
    }

    pub fn includes_offline(self) -> bool {
        self != ReplayScope::OnlineOnly
    }
}

impl FromStr for ReplayScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" | "all" => Ok(ReplayScope::Both),
            "online" | "online-only" => Ok(ReplayScope::OnlineOnly),
            "offline" | "offline-only" => Ok(ReplayScope::OfflineOnly),
            other => Err(format!(
                "unknown scope '{}' (expected both, online, or offline)",
                other
            )),
        }
    }
}

impl fmt::Display for ReplayScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReplayScope::Both => "both",
            ReplayScope::OnlineOnly => "online",
            ReplayScope::OfflineOnly => "offline",
        })
    }
}

/// Half-open bracket `[lo, hi)` over rank indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
    lo: usize,
    hi: usize,
}

impl RankRange {
    /// Bracket clamped to the rank list; `lo` is pulled down to `hi` if needed
    pub fn new(lo: usize, hi: usize) -> Self {
        let hi = hi.min(RANK_COUNT);
        Self { lo: lo.min(hi), hi }
    }

    /// Every rank
    pub fn full() -> Self {
        Self {
            lo: 0,
            hi: RANK_COUNT,
        }
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    pub fn contains(&self, rank: Rank) -> bool {
        (self.lo..self.hi).contains(&rank.index())
    }

    pub fn is_full(&self) -> bool {
        *self == Self::full()
    }
}

impl Default for RankRange {
    fn default() -> Self {
        Self::full()
    }
}

impl FromStr for RankRange {
    type Err = String;

    /// Parses `LO..HI`, with either bound optional (`..5`, `12..`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once("..")
            .ok_or_else(|| format!("invalid rank range '{}' (expected LO..HI)", s))?;

        let parse = |part: &str, default: usize| -> Result<usize, String> {
            let part = part.trim();
            if part.is_empty() {
                Ok(default)
            } else {
                part.parse()
                    .map_err(|_| format!("invalid rank bound '{}' in '{}'", part, s))
            }
        };

        let lo = parse(lo, 0)?;
        let hi = parse(hi, RANK_COUNT)?;
        if lo > hi || hi > RANK_COUNT {
            return Err(format!(
                "rank range '{}' must satisfy 0 <= LO <= HI <= {}",
                s, RANK_COUNT
            ));
        }
        Ok(Self::new(lo, hi))
    }
}

impl fmt::Display for RankRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

/// Caller-supplied aggregation filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Identity whose perspective online matches are counted from
    pub user_name: String,
    /// Restrict online matches to this opponent
    pub opponent_name: Option<String>,
    pub scope: ReplayScope,
    pub user_ranks: RankRange,
    pub opponent_ranks: RankRange,
}

impl Filter {
    /// Filter for `user_name` with every other setting at its default
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            opponent_name: None,
            scope: ReplayScope::default(),
            user_ranks: RankRange::full(),
            opponent_ranks: RankRange::full(),
        }
    }

    /// Restrict to one opponent; an empty name clears the restriction
    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        let opponent = opponent.into();
        self.opponent_name = (!opponent.is_empty()).then_some(opponent);
        self
    }

    pub fn with_scope(mut self, scope: ReplayScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_user_ranks(mut self, ranks: RankRange) -> Self {
        self.user_ranks = ranks;
        self
    }

    pub fn with_opponent_ranks(mut self, ranks: RankRange) -> Self {
        self.opponent_ranks = ranks;
        self
    }
}
