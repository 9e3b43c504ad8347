//! Matchup matrix
//!
//! A dense table over every ordered pair of characters. Each cell holds the
//! wins and games of the row character against the column character plus a
//! win rate on a 0-10 scale. Cells with no games stay in the table with a
//! rate of 0 and are skipped by every view.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::roster::{CHARACTER_COUNT, Character};

/// Scale of a win rate: 10 means every game won
pub const RATE_SCALE: f64 = 10.0;

/// Tally for one ordered character pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    #[serde(serialize_with = "character_name")]
    pub opponent: Character,
    pub wins: u32,
    pub games: u32,
    /// `RATE_SCALE * wins / games`, or 0 when `games == 0`
    pub rate: f64,
}

fn character_name<S: Serializer>(character: &Character, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(character.name())
}

impl Cell {
    fn empty(opponent: Character) -> Self {
        Self {
            opponent,
            wins: 0,
            games: 0,
            rate: 0.0,
        }
    }

    /// No games recorded
    pub fn is_empty(&self) -> bool {
        self.games == 0
    }

    pub fn losses(&self) -> u32 {
        self.games - self.wins
    }

    /// Win rate, or `None` for an empty cell
    pub fn win_rate(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.rate)
    }

    fn recompute_rate(&mut self) {
        self.rate = if self.games == 0 {
            0.0
        } else {
            RATE_SCALE * f64::from(self.wins) / f64::from(self.games)
        };
    }
}

/// Win/loss table keyed by (user character, opponent character)
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupMatrix {
    cells: Vec<Cell>,
}

impl MatchupMatrix {
    /// Every pair at zero
    pub fn new() -> Self {
        let cells = Character::ALL
            .iter()
            .flat_map(|_| Character::ALL.iter().map(|opp| Cell::empty(*opp)))
            .collect();
        Self { cells }
    }

    fn index(user: Character, opponent: Character) -> usize {
        user.index() * CHARACTER_COUNT + opponent.index()
    }

    pub fn cell(&self, user: Character, opponent: Character) -> &Cell {
        &self.cells[Self::index(user, opponent)]
    }

    /// Count one game for `user` against `opponent`
    pub(crate) fn record_game(&mut self, user: Character, opponent: Character, won: bool) {
        let cell = &mut self.cells[Self::index(user, opponent)];
        cell.games += 1;
        if won {
            cell.wins += 1;
        }
    }

    /// Add another matrix's tallies cell by cell
    pub fn merge(&mut self, other: &MatchupMatrix) {
        for (cell, theirs) in self.cells.iter_mut().zip(&other.cells) {
            cell.wins += theirs.wins;
            cell.games += theirs.games;
        }
        self.recompute_rates();
    }

    /// Refresh every cell's rate from its tallies
    pub(crate) fn recompute_rates(&mut self) {
        for cell in &mut self.cells {
            cell.recompute_rate();
        }
    }

    /// All cells for one user character, in roster order
    pub fn row(&self, user: Character) -> MatchupRow<'_> {
        let start = user.index() * CHARACTER_COUNT;
        MatchupRow {
            user,
            cells: &self.cells[start..start + CHARACTER_COUNT],
        }
    }

    /// Every row in roster order
    pub fn rows(&self) -> impl Iterator<Item = MatchupRow<'_>> {
        Character::ALL.iter().map(|c| self.row(*c))
    }

    pub fn total_games(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.games)).sum()
    }

    /// No cell has any games
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

impl Default for MatchupMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for MatchupMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CHARACTER_COUNT))?;
        for row in self.rows() {
            map.serialize_entry(row.user.name(), row.cells)?;
        }
        map.end()
    }
}

/// One character's matchups
#[derive(Debug, Clone, Copy)]
pub struct MatchupRow<'a> {
    pub user: Character,
    pub cells: &'a [Cell],
}

impl<'a> MatchupRow<'a> {
    /// Cells with at least one game, in roster order
    pub fn populated(&self) -> Vec<&'a Cell> {
        self.cells.iter().filter(|c| !c.is_empty()).collect()
    }

    /// Populated cells, best matchup first
    pub fn sorted_by_rate(&self) -> Vec<&'a Cell> {
        let mut cells = self.populated();
        cells.sort_by(|a, b| b.rate.total_cmp(&a.rate));
        cells
    }

    /// Populated cells, most played first
    pub fn sorted_by_games(&self) -> Vec<&'a Cell> {
        let mut cells = self.populated();
        cells.sort_by(|a, b| b.games.cmp(&a.games));
        cells
    }

    /// Unweighted mean of populated cells' rates
    pub fn average_rate(&self) -> Option<f64> {
        let cells = self.populated();
        if cells.is_empty() {
            return None;
        }
        Some(cells.iter().map(|c| c.rate).sum::<f64>() / cells.len() as f64)
    }

    /// Mean games per populated cell, rounded
    pub fn average_games(&self) -> Option<u32> {
        let cells = self.populated();
        if cells.is_empty() {
            return None;
        }
        let total: u32 = cells.iter().map(|c| c.games).sum();
        Some((f64::from(total) / cells.len() as f64).round() as u32)
    }

    pub fn total_games(&self) -> u32 {
        self.cells.iter().map(|c| c.games).sum()
    }

    pub fn total_wins(&self) -> u32 {
        self.cells.iter().map(|c| c.wins).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix_is_empty() {
        let matrix = MatchupMatrix::new();
        assert!(matrix.is_empty());
        assert_eq!(matrix.rows().count(), CHARACTER_COUNT);

        for row in matrix.rows() {
            assert_eq!(row.cells.len(), CHARACTER_COUNT);
            for (cell, opponent) in row.cells.iter().zip(Character::ALL) {
                assert_eq!(cell.opponent, opponent);
                assert_eq!(cell.win_rate(), None);
            }
        }

        // Self-pairs are present too
        assert_eq!(matrix.cell(Character::Sol, Character::Sol).games, 0);
    }

    #[test]
    fn test_record_and_rate() {
        let mut matrix = MatchupMatrix::new();
        matrix.record_game(Character::Sol, Character::Ky, true);
        matrix.record_game(Character::Sol, Character::Ky, true);
        matrix.record_game(Character::Sol, Character::Ky, false);
        matrix.recompute_rates();

        let cell = matrix.cell(Character::Sol, Character::Ky);
        assert_eq!((cell.wins, cell.games, cell.losses()), (2, 3, 1));
        assert!((cell.rate - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.1}", cell.rate), "6.7");

        // Only the ordered pair changed
        assert!(matrix.cell(Character::Ky, Character::Sol).is_empty());
        assert_eq!(matrix.total_games(), 3);
    }

    #[test]
    fn test_merge_adds_cells() {
        let mut a = MatchupMatrix::new();
        a.record_game(Character::May, Character::Axl, true);
        let mut b = MatchupMatrix::new();
        b.record_game(Character::May, Character::Axl, false);
        b.record_game(Character::Axl, Character::May, true);

        a.merge(&b);
        let cell = a.cell(Character::May, Character::Axl);
        assert_eq!((cell.wins, cell.games), (1, 2));
        assert!((cell.rate - 5.0).abs() < 1e-9);
        assert_eq!(a.cell(Character::Axl, Character::May).games, 1);
    }

    #[test]
    fn test_row_views() {
        let mut matrix = MatchupMatrix::new();
        for _ in 0..3 {
            matrix.record_game(Character::Sol, Character::Ky, false);
        }
        matrix.record_game(Character::Sol, Character::May, true);
        matrix.record_game(Character::Sol, Character::Jam, true);
        matrix.record_game(Character::Sol, Character::Jam, false);
        matrix.recompute_rates();

        let row = matrix.row(Character::Sol);
        let populated: Vec<_> = row.populated().iter().map(|c| c.opponent).collect();
        assert_eq!(populated, [Character::Ky, Character::May, Character::Jam]);

        let by_rate: Vec<_> = row.sorted_by_rate().iter().map(|c| c.opponent).collect();
        assert_eq!(by_rate, [Character::May, Character::Jam, Character::Ky]);

        let by_games: Vec<_> = row.sorted_by_games().iter().map(|c| c.opponent).collect();
        assert_eq!(by_games, [Character::Ky, Character::Jam, Character::May]);

        assert!((row.average_rate().unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(row.average_games(), Some(2));
        assert_eq!(row.total_games(), 6);
        assert_eq!(row.total_wins(), 2);

        assert_eq!(matrix.row(Character::Ky).average_rate(), None);
    }

    #[test]
    fn test_serialize_shape() {
        let mut matrix = MatchupMatrix::new();
        matrix.record_game(Character::INo, Character::Aba, true);
        matrix.recompute_rates();

        let value = serde_json::to_value(&matrix).unwrap();
        let row = value["I-No"].as_array().unwrap();
        assert_eq!(row.len(), CHARACTER_COUNT);
        assert_eq!(row[Character::Aba.index()]["opponent"], "A.B.A");
        assert_eq!(row[Character::Aba.index()]["wins"], 1);
        assert_eq!(row[Character::Aba.index()]["rate"], 10.0);
    }
}
