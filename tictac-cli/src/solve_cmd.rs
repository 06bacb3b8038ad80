//! Solve command - show the engine's move for a board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_board(), solve_board(), report_solution()
//! - Level 3: (delegated to tictac-core)
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tictac_core::{analyze, evaluate, Board, Outcome, SearchReport};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    /// Board as rows, e.g. "OO./XX./..." (X = player, O = computer)
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub board: Option<String>,

    /// Board JSON file (row strings or a matrix of cells)
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything the solve command reports
#[derive(Debug, Serialize)]
struct Solution {
    board: Board,
    outcome: Outcome,
    search: Option<SearchReport>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// This function reads like a table of contents:
/// 1. Load the board
/// 2. Evaluate it and search if still open
/// 3. Report the result
pub fn run(args: SolveArgs) -> Result<()> {
    let board = load_board(&args)?;
    let solution = solve_board(board)?;
    report_solution(&solution, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the board from the inline argument or a file
fn load_board(args: &SolveArgs) -> Result<Board> {
    let board = match (&args.board, &args.file) {
        (Some(text), _) => text
            .parse::<Board>()
            .with_context(|| format!("Failed to parse board: {}", text))?,
        (None, Some(path)) => Board::load(path)
            .with_context(|| format!("Failed to load board: {}", path.display()))?,
        (None, None) => anyhow::bail!("Either --board or --file is required"),
    };

    if !board.is_legal_position() {
        tracing::warn!("Board is not reachable in legal play; searching anyway");
    }

    Ok(board)
}

/// Evaluate the board and search it when the game is still open
fn solve_board(board: Board) -> Result<Solution> {
    let outcome = evaluate(&board);

    let search = if outcome.is_terminal() {
        None
    } else {
        Some(analyze(&board).context("Search failed")?)
    };

    Ok(Solution {
        board,
        outcome,
        search,
    })
}

/// Print the solution
fn report_solution(solution: &Solution, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(solution)?);
    } else {
        print_text_solution(solution);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_solution(solution: &Solution) {
    print!("{}", solution.board);
    println!("Outcome: {}", solution.outcome);

    let Some(search) = &solution.search else {
        return;
    };

    println!("Best move: {} (score {})", search.best, search.score);
    println!("Nodes searched: {}", search.nodes);
    println!("\nCandidates:");
    for candidate in &search.candidates {
        let marker = if candidate.pos == search.best { "*" } else { " " };
        println!("  {} {} {:>4}", marker, candidate.pos, candidate.score);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_core::Pos;

    #[test]
    fn test_load_inline_board() {
        let args = SolveArgs {
            board: Some("OO./XX./...".to_string()),
            file: None,
            json: false,
        };
        let board = load_board(&args).unwrap();
        assert_eq!(board.count(tictac_core::Side::Computer), 2);
    }

    #[test]
    fn test_load_rejects_bad_board() {
        let args = SolveArgs {
            board: Some("OOZ/XX./...".to_string()),
            file: None,
            json: false,
        };
        assert!(load_board(&args).is_err());
    }

    #[test]
    fn test_solve_open_board() {
        let board: Board = "OO./XX./...".parse().unwrap();
        let solution = solve_board(board).unwrap();
        assert_eq!(solution.outcome, Outcome::NoResult);
        assert_eq!(solution.search.unwrap().best, Pos::new(0, 2));
    }

    #[test]
    fn test_solve_finished_board() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        let solution = solve_board(board).unwrap();
        assert!(solution.outcome.is_terminal());
        assert!(solution.search.is_none());
    }
}
