//! Audit command - check that nothing beats the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: verify_strategies(), play_all_series(), report_results()
//! - Level 3: (delegated to tictac-audit)
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use tictac_audit::{
    play_series, verify_all_openers, AuditConfig, OpponentKind, SeriesResult, StrategyReport,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AuditArgs {
    /// Games per opponent series (openers alternate)
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Simulated opponent
    #[arg(long, value_enum, default_value = "all")]
    pub opponent: OpponentChoice,

    /// Skip the exhaustive walk over every player strategy
    #[arg(long)]
    pub skip_exhaustive: bool,

    /// Play series games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpponentChoice {
    Random,
    FirstEmpty,
    Greedy,
    Minimax,
    All,
}

impl OpponentChoice {
    fn kinds(self) -> Vec<OpponentKind> {
        match self {
            OpponentChoice::Random => vec![OpponentKind::Random],
            OpponentChoice::FirstEmpty => vec![OpponentKind::FirstEmpty],
            OpponentChoice::Greedy => vec![OpponentKind::Greedy],
            OpponentChoice::Minimax => vec![OpponentKind::Minimax],
            OpponentChoice::All => vec![
                OpponentKind::Random,
                OpponentKind::FirstEmpty,
                OpponentKind::Greedy,
                OpponentKind::Minimax,
            ],
        }
    }
}

/// Summary of one opponent series, without per-game records
#[derive(Debug, Serialize)]
struct SeriesSummary {
    opponent: OpponentKind,
    games: u32,
    computer_wins: u32,
    player_wins: u32,
    draws: u32,
    avg_moves: f32,
}

impl SeriesSummary {
    fn new(opponent: OpponentKind, result: &SeriesResult) -> Self {
        Self {
            opponent,
            games: result.games_played,
            computer_wins: result.computer_wins,
            player_wins: result.player_wins,
            draws: result.draws,
            avg_moves: result.avg_moves,
        }
    }
}

#[derive(Debug, Serialize)]
struct AuditReport {
    strategies: Vec<StrategyReport>,
    series: Vec<SeriesSummary>,
}

impl AuditReport {
    fn losses(&self) -> u32 {
        let exhaustive: u32 = self.strategies.iter().map(|r| r.player_wins).sum();
        let series: u32 = self.series.iter().map(|s| s.player_wins).sum();
        exhaustive + series
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run audit command
///
/// This function reads like a table of contents:
/// 1. Walk every player strategy against the engine
/// 2. Play a series against each simulated opponent
/// 3. Report, failing if the engine ever lost
pub fn run(args: AuditArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting audit: {} games per series, opponent={:?}",
        args.games,
        args.opponent
    );

    let strategies = if args.skip_exhaustive {
        Vec::new()
    } else {
        verify_strategies()?
    };
    let series = play_all_series(&args, seed)?;

    let report = AuditReport { strategies, series };
    report_results(&report, args.json)?;

    let losses = report.losses();
    if losses > 0 {
        anyhow::bail!("Engine lost {} time(s)", losses);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn verify_strategies() -> Result<Vec<StrategyReport>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Walking every player strategy...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let reports = verify_all_openers().context("Exhaustive walk failed")?;

    spinner.finish_and_clear();
    Ok(reports)
}

fn play_all_series(args: &AuditArgs, seed: Option<u64>) -> Result<Vec<SeriesSummary>> {
    let kinds = args.opponent.kinds();
    let progress = ProgressBar::new(kinds.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut summaries = Vec::with_capacity(kinds.len());
    for kind in kinds {
        progress.set_message(format!("{:?}", kind));

        let mut config = AuditConfig::series(kind, args.games).with_parallel(args.parallel);
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }

        let result =
            play_series(&config).with_context(|| format!("Series vs {:?} failed", kind))?;
        for record in result.losses() {
            tracing::warn!("Engine lost vs {:?}: {:?}", kind, record.moves);
        }

        summaries.push(SeriesSummary::new(kind, &result));
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(summaries)
}

fn report_results(report: &AuditReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_text_results(report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_results(report: &AuditReport) {
    if !report.strategies.is_empty() {
        println!("\n=== Exhaustive Check ===");
        for r in &report.strategies {
            println!(
                "{:<8} opens: {:>4} positions, {:>4} engine wins, {:>3} draws, {} losses",
                r.opener.to_string(),
                r.positions,
                r.computer_wins,
                r.draws,
                r.player_wins
            );
        }
    }

    if !report.series.is_empty() {
        println!("\n=== Series ===");
        println!(
            "{:<12} {:>6} {:>6} {:>6} {:>6} {:>8}",
            "Opponent", "Games", "Won", "Lost", "Drawn", "AvgMove"
        );
        for s in &report.series {
            println!(
                "{:<12} {:>6} {:>6} {:>6} {:>6} {:>8.1}",
                format!("{:?}", s.opponent),
                s.games,
                s.computer_wins,
                s.player_wins,
                s.draws,
                s.avg_moves
            );
        }
    }

    let losses = report.losses();
    if losses == 0 {
        println!("\nEngine unbeaten.");
    } else {
        println!("\nEngine lost {} time(s)!", losses);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(opponent: OpponentChoice, games: usize) -> AuditArgs {
        AuditArgs {
            games,
            opponent,
            skip_exhaustive: true,
            parallel: false,
            json: false,
        }
    }

    #[test]
    fn test_all_expands_to_every_kind() {
        assert_eq!(OpponentChoice::All.kinds().len(), 4);
        assert_eq!(OpponentChoice::Greedy.kinds(), vec![OpponentKind::Greedy]);
    }

    #[test]
    fn test_series_summaries() {
        let summaries = play_all_series(&args(OpponentChoice::All, 6), Some(7)).unwrap();
        assert_eq!(summaries.len(), 4);
        for s in &summaries {
            assert_eq!(s.games, 6);
            assert_eq!(s.player_wins, 0);
            assert_eq!(s.computer_wins + s.draws, 6);
        }
    }

    #[test]
    fn test_report_counts_losses() {
        let report = AuditReport {
            strategies: Vec::new(),
            series: vec![SeriesSummary {
                opponent: OpponentKind::Random,
                games: 2,
                computer_wins: 1,
                player_wins: 1,
                draws: 0,
                avg_moves: 7.0,
            }],
        };
        assert_eq!(report.losses(), 1);
    }

    #[test]
    fn test_run_passes_when_unbeaten() {
        assert!(run(args(OpponentChoice::FirstEmpty, 4), Some(1)).is_ok());
    }
}
