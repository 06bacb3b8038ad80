//! TICTAC CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game against the engine in the terminal
//! - solve: Show the engine's move for a given board
//! - audit: Check that no player strategy beats the engine

mod audit_cmd;
mod play_cmd;
mod solve_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe against a full-depth minimax engine")]
struct Cli {
    /// Random seed for reproducible audits
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play_cmd::PlayArgs),
    /// Print the engine's move for a board
    Solve(solve_cmd::SolveArgs),
    /// Verify the engine never loses
    Audit(audit_cmd::AuditArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (stderr, so JSON on stdout stays clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Solve(args) => solve_cmd::run(args),
        Commands::Audit(args) => audit_cmd::run(args, cli.seed),
    }
}
