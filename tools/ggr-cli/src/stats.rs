//! Stats command - aggregate replays into matchup tables

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use ggr_core::replay::load_parallel;
use ggr_core::roster::Character;
use ggr_core::stats::{
    Cell, Filter, MatchupMatrix, MatchupRow, RankRange, ReplayScope, aggregate_parallel,
};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::replays;

/// Which table to print for each character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    /// Win rate per opponent, roster order
    #[default]
    Matchups,
    /// Win rate per opponent, best first
    MatchupsSorted,
    /// Games per opponent, roster order
    Amounts,
    /// Games per opponent, most played first
    AmountsSorted,
}

/// Arguments for the stats command
#[derive(Args)]
pub struct StatsArgs {
    /// Replay folder (defaults to the configured one)
    pub dir: Option<PathBuf>,

    /// Your in-game name (defaults to the configured one)
    #[arg(long)]
    pub name: Option<String>,

    /// Only count online matches against this player
    #[arg(long)]
    pub opponent: Option<String>,

    /// Which matches to count: both, online, or offline
    #[arg(long)]
    pub scope: Option<ReplayScope>,

    /// Your rank bracket as LO..HI over rank indices 0-21
    #[arg(long, default_value_t = RankRange::full())]
    pub user_ranks: RankRange,

    /// Opponent rank bracket as LO..HI over rank indices 0-21
    #[arg(long, default_value_t = RankRange::full())]
    pub opponent_ranks: RankRange,

    /// Only print this character's row
    #[arg(long, value_parser = parse_character)]
    pub character: Option<Character>,

    /// Table to print
    #[arg(long, value_enum, default_value_t = View::Matchups)]
    pub view: View,

    /// Also write the full matrix as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

fn parse_character(s: &str) -> Result<Character, String> {
    Character::from_name(s).ok_or_else(|| format!("unknown character '{}'", s))
}

/// Execute the stats command
pub fn execute(args: StatsArgs) -> Result<()> {
    let config = ggr_core::config::load();

    let name = args.name.unwrap_or_else(|| config.player.name.clone());
    if name.is_empty() {
        bail!("No player name given. Pass --name or run `ggr config --name <NAME>`");
    }

    let filter = Filter::new(name)
        .with_opponent(args.opponent.unwrap_or_default())
        .with_scope(args.scope.unwrap_or(config.stats.scope))
        .with_user_ranks(args.user_ranks)
        .with_opponent_ranks(args.opponent_ranks);

    let dir = replays::resolve_dir(args.dir, &config);
    let files = replays::scan(&dir, &config)?;
    let report = load_parallel(&files);
    let matrix = aggregate_parallel(&report.records, &filter);

    print!("{}", render(&matrix, args.character, args.view));

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&matrix).context("Failed to serialize matrix")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Matrix written to {}", path.display());
    }

    replays::report_failures(&report.failures);
    Ok(())
}

/// Text for one character, or every character with games
pub fn render(matrix: &MatchupMatrix, character: Option<Character>, view: View) -> String {
    let rows: Vec<MatchupRow<'_>> = match character {
        Some(c) => vec![matrix.row(c)],
        None => matrix.rows().filter(|r| r.total_games() > 0).collect(),
    };

    if rows.iter().all(|r| r.total_games() == 0) {
        return "No matching games.\n".to_string();
    }

    rows.iter()
        .map(|row| render_row(row, view))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One character's table with its average line
pub fn render_row(row: &MatchupRow<'_>, view: View) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} games, {} wins)",
        row.user,
        row.total_games(),
        row.total_wins()
    );

    let cells: Vec<&Cell> = match view {
        View::Matchups | View::Amounts => row.populated(),
        View::MatchupsSorted => row.sorted_by_rate(),
        View::AmountsSorted => row.sorted_by_games(),
    };

    match view {
        View::Matchups | View::MatchupsSorted => {
            for cell in &cells {
                let _ = writeln!(
                    out,
                    "  {:<12}{:>5.1}  ({}/{})",
                    cell.opponent.name(),
                    cell.rate,
                    cell.wins,
                    cell.games
                );
            }
            if let Some(avg) = row.average_rate() {
                let _ = writeln!(out, "  {:<12}{:>5.1}", "Average", avg);
            }
        }
        View::Amounts | View::AmountsSorted => {
            for cell in &cells {
                let _ = writeln!(out, "  {:<12}{:>5}", cell.opponent.name(), cell.games);
            }
            if let Some(avg) = row.average_games() {
                let _ = writeln!(out, "  {:<12}{:>5}", "Average", avg);
            }
        }
    }
    out
}
