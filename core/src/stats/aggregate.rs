//! Aggregation engine
//!
//! Folds decoded records into a [`MatchupMatrix`] under a [`Filter`].
//!
//! - **Offline** matches have no identified user, so they are counted from
//!   both sides: the winner's character gains a win against the loser's
//!   and the loser's character a loss against the winner's. Matches with no
//!   winner contribute nothing.
//! - **Online** matches are counted once, from the side whose name equals
//!   the filter's user name (player 1 when both do). The optional opponent
//!   name and both rank brackets must also match.

use rayon::prelude::*;
use tracing::debug;

use super::filter::Filter;
use super::matrix::MatchupMatrix;
use crate::replay::types::{ReplayRecord, Side};

/// How a single record contributes to a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    /// Excluded by the filter or unattributable
    None,
    /// Offline match counted from both sides; `winner` won
    Mirrored { winner: Side },
    /// Online match counted from the user's side
    User { side: Side, won: bool },
}

/// Decide how `record` counts under `filter`
pub fn classify(record: &ReplayRecord, filter: &Filter) -> Contribution {
    if record.is_online() {
        classify_online(record, filter)
    } else {
        classify_offline(record, filter)
    }
}

fn classify_offline(record: &ReplayRecord, filter: &Filter) -> Contribution {
    if !filter.scope.includes_offline() {
        return Contribution::None;
    }
    match record.winner {
        Some(winner) => Contribution::Mirrored { winner },
        None => Contribution::None,
    }
}

fn classify_online(record: &ReplayRecord, filter: &Filter) -> Contribution {
    if !filter.scope.includes_online() {
        return Contribution::None;
    }

    let Some(side) = record.user_side(&filter.user_name) else {
        return Contribution::None;
    };
    let user = record.player(side);
    let opponent = record.player(side.opposite());

    if let Some(wanted) = &filter.opponent_name {
        if opponent.name.as_deref() != Some(wanted.as_str()) {
            return Contribution::None;
        }
    }

    if let (Some(user_rank), Some(opponent_rank)) = (user.rank, opponent.rank) {
        if !filter.user_ranks.contains(user_rank) || !filter.opponent_ranks.contains(opponent_rank)
        {
            return Contribution::None;
        }
    }

    Contribution::User {
        side,
        won: record.winner == Some(side),
    }
}

fn tally(matrix: &mut MatchupMatrix, record: &ReplayRecord, filter: &Filter) {
    match classify(record, filter) {
        Contribution::None => {}
        Contribution::Mirrored { winner } => {
            let won = record.player(winner).character;
            let lost = record.player(winner.opposite()).character;
            matrix.record_game(won, lost, true);
            matrix.record_game(lost, won, false);
        }
        Contribution::User { side, won } => {
            let user = record.player(side).character;
            let opponent = record.player(side.opposite()).character;
            matrix.record_game(user, opponent, won);
        }
    }
}

/// Build a fresh matrix from `records`
pub fn aggregate(records: &[ReplayRecord], filter: &Filter) -> MatchupMatrix {
    let mut matrix = MatchupMatrix::new();
    for record in records {
        tally(&mut matrix, record, filter);
    }
    matrix.recompute_rates();

    debug!(
        records = records.len(),
        games = matrix.total_games(),
        user = %filter.user_name,
        "aggregated matchups"
    );
    matrix
}

/// [`aggregate`] across the rayon pool.
///
/// Each worker folds into its own matrix; the partial matrices are summed
/// cell by cell at the end. The result equals the sequential one.
pub fn aggregate_parallel(records: &[ReplayRecord], filter: &Filter) -> MatchupMatrix {
    let mut matrix = records
        .par_iter()
        .fold(MatchupMatrix::new, |mut partial, record| {
            tally(&mut partial, record, filter);
            partial
        })
        .reduce(MatchupMatrix::new, |mut a, b| {
            a.merge(&b);
            a
        });
    matrix.recompute_rates();
    matrix
}
