//! Play command - a terminal game against the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_loop()
//! - Level 3: player_turn(), computer_turn(), game_over()
//! - Level 4: input parsing, board rendering

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Args;
use indicatif::ProgressBar;

use tictac_core::{best_move, Board, EngineError, GameSession, Outcome, Pos, Side, Turn};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Who moves first: player or computer
    #[arg(long, default_value = "player")]
    pub first: Side,

    /// Extra delay before the computer answers, in milliseconds
    #[arg(long, default_value = "0")]
    pub think_delay_ms: u64,

    /// Hide the spinner while the computer thinks
    #[arg(long)]
    pub no_spinner: bool,
}

/// Running score across games
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Tally {
    player_wins: u32,
    computer_wins: u32,
    draws: u32,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win {
                winner: Side::Player,
                ..
            } => self.player_wins += 1,
            Outcome::Win {
                winner: Side::Computer,
                ..
            } => self.computer_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::NoResult => {}
        }
    }
}

/// Parsed line of user input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Place(Pos),
    NewGame,
    Quit,
    Help,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// This function reads like a table of contents:
/// 1. Create the session
/// 2. Run the game loop on stdin/stdout
/// 3. Report the tally
pub fn run(args: PlayArgs) -> Result<()> {
    let mut session = GameSession::new(args.first);

    tracing::info!("Starting game, {} moves first", args.first);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let tally = play_loop(&mut session, &args, stdin.lock(), stdout.lock())?;

    tracing::info!(
        "Session over: {} player wins, {} computer wins, {} draws",
        tally.player_wins,
        tally.computer_wins,
        tally.draws
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Drive turns until the user quits or input runs out
fn play_loop<R: BufRead, W: Write>(
    session: &mut GameSession,
    args: &PlayArgs,
    mut input: R,
    mut output: W,
) -> Result<Tally> {
    let mut tally = Tally::default();
    writeln!(output, "{}", HELP)?;

    loop {
        let keep_going = match session.turn() {
            Turn::ComputerTurn => {
                computer_turn(session, args, &mut output)?;
                true
            }
            Turn::PlayerTurn => player_turn(session, &mut input, &mut output)?,
            Turn::GameOver => {
                tally.record(session.outcome());
                game_over(session, &mut input, &mut output)?
            }
        };

        if !keep_going {
            writeln!(
                output,
                "Final score - Player: {}, Computer: {}, Draws: {}",
                tally.player_wins, tally.computer_wins, tally.draws
            )?;
            return Ok(tally);
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Prompt until the player makes a legal move; false means quit
fn player_turn<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{}", render_board(session.board()))?;
    write!(output, "Player Turn! > ")?;
    output.flush()?;

    let Some(line) = read_line(input)? else {
        return Ok(false);
    };

    match parse_command(&line) {
        Ok(Command::Place(pos)) => match session.play_player(pos) {
            Ok(_) => {}
            Err(err @ (EngineError::CellOccupied(_) | EngineError::OutOfBounds { .. })) => {
                writeln!(output, "{}", err)?;
            }
            Err(err) => return Err(err.into()),
        },
        Ok(Command::NewGame) => {
            if session.can_start_new_game() {
                session.new_game();
            }
        }
        Ok(Command::Quit) => return Ok(false),
        Ok(Command::Help) => writeln!(output, "{}", HELP)?,
        Err(msg) => writeln!(output, "{}", msg)?,
    }

    Ok(true)
}

/// Search off the input thread, then apply the move
fn computer_turn<W: Write>(
    session: &mut GameSession,
    args: &PlayArgs,
    output: &mut W,
) -> Result<()> {
    let delay = Duration::from_millis(args.think_delay_ms);
    let pos = think(session.snapshot(), delay, !args.no_spinner)?;
    session.apply_computer_move(pos)?;
    writeln!(output, "Computer plays {}", pos)?;
    Ok(())
}

/// Announce the result and ask for another game; false means quit
fn game_over<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{}", render_board(session.board()))?;
    writeln!(output, "{}", describe_outcome(session.outcome()))?;
    write!(output, "New game? [n = new, q = quit] > ")?;
    output.flush()?;

    loop {
        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        match parse_command(&line) {
            Ok(Command::NewGame) => {
                session.new_game();
                return Ok(true);
            }
            Ok(Command::Quit) => return Ok(false),
            _ => {
                write!(output, "Type n for a new game or q to quit > ")?;
                output.flush()?;
            }
        }
    }
}

/// Run the search on a worker thread while the spinner turns
fn think(board: Board, delay: Duration, spinner: bool) -> Result<Pos> {
    let bar = if spinner {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    bar.set_message("Thinking.....");
    bar.enable_steady_tick(Duration::from_millis(100));

    let handle = std::thread::spawn(move || {
        std::thread::sleep(delay);
        best_move(&board)
    });
    let result = handle
        .join()
        .map_err(|_| anyhow!("search thread panicked"));

    bar.finish_and_clear();
    Ok(result??)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

const HELP: &str = "Enter a cell as 1-9 (keypad order, 1 = top left) or \"row col\" (0-2).\n\
                    n = new game, q = quit, ? = help";

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_command(line: &str) -> Result<Command, String> {
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "n" | "new" => return Ok(Command::NewGame),
        "?" | "h" | "help" => return Ok(Command::Help),
        _ => {}
    }

    let numbers: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    let pos = match numbers.as_slice() {
        [cell] => {
            let n: usize = cell
                .parse()
                .map_err(|_| format!("Not a cell: {}", cell))?;
            if !(1..=9).contains(&n) {
                return Err(format!("Cell number must be 1-9, got {}", n));
            }
            Pos::from_index(n - 1).map_err(|e| e.to_string())?
        }
        [row, col] => {
            let row: u8 = row.parse().map_err(|_| format!("Not a row: {}", row))?;
            let col: u8 = col.parse().map_err(|_| format!("Not a column: {}", col))?;
            Pos::try_new(row, col).map_err(|e| e.to_string())?
        }
        _ => return Err(format!("Could not understand {:?} (? for help)", line)),
    };

    Ok(Command::Place(pos))
}

fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for (r, row) in board.cells().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| match cell.side() {
                Some(side) => side.symbol().to_string(),
                None => (r * 3 + c + 1).to_string(),
            })
            .collect();
        out.push_str(&format!(" {} \n", cells.join(" | ")));
        if r < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

fn describe_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win { winner, line } => {
            let (start, end) = line.endpoints();
            format!(
                "Game Over - {} Win! ({} from {} to {})",
                winner, line, start, end
            )
        }
        Outcome::Draw => "Game Over - Draw!".to_string(),
        Outcome::NoResult => "Game in progress".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
