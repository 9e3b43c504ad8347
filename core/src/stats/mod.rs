//! Matchup statistics
//!
//! ```text
//! [ReplayRecord] + Filter ─→ aggregate ─→ MatchupMatrix ─→ MatchupRow views
//! ```
//!
//! A matrix is rebuilt from scratch for every filter. [`aggregate_parallel`]
//! gives the same result as [`aggregate`] for large batches.

pub mod aggregate;
pub mod filter;
pub mod matrix;

pub use aggregate::{Contribution, aggregate, aggregate_parallel, classify};
pub use filter::{Filter, RankRange, ReplayScope};
pub use matrix::{Cell, MatchupMatrix, MatchupRow, RATE_SCALE};
