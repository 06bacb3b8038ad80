//! Integration tests for the TICTAC engine
//!
//! Tests the full stack: board, evaluator, minimax search, game session and audit

use tictac_audit::{
    play_game_with, play_series, verify_all_openers, AuditConfig, Opponent, OpponentKind,
};
use tictac_core::{
    analyze, best_move, evaluate, Board, EngineError, GameSession, InvalidState, Line, Outcome,
    Pos, Side, Turn,
};
use std::time::Instant;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn board(rows: &str) -> Board {
    rows.parse().expect("fixture board")
}

/// Mid-game position where the engine must take its own win
fn winning_position() -> Board {
    board("OO./XX./...")
}

/// Mid-game position where the engine must block
fn blocking_position() -> Board {
    board("XX./.O./...")
}

// ============================================================================
// BOARD AND EVALUATOR
// ============================================================================

#[test]
fn test_board_parse_display_round_trip() {
    let b = board("XO./.X./..O");
    let text = b.to_string();
    assert_eq!(text.parse::<Board>().unwrap(), b);
    assert_eq!(b.empty_cells().count(), 5);
}

#[test]
fn test_board_file_round_trip() {
    let path = std::env::temp_dir().join(format!("tictac-it-{}.json", std::process::id()));
    let b = winning_position();
    b.save(&path).unwrap();
    let loaded = Board::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, b);
}

#[test]
fn test_evaluator_reports_line() {
    let outcome = evaluate(&board("..O/.O./O.X"));
    assert_eq!(
        outcome,
        Outcome::Win {
            winner: Side::Computer,
            line: Line::Diagonal(1),
        }
    );
    assert_eq!(evaluate(&board("XOX/XOO/OXX")), Outcome::Draw);
    assert_eq!(evaluate(&Board::new()), Outcome::NoResult);
}

// ============================================================================
// MINIMAX SEARCH
// ============================================================================

#[test]
fn test_engine_takes_win() {
    assert_eq!(best_move(&winning_position()).unwrap(), Pos::new(0, 2));
}

#[test]
fn test_engine_blocks() {
    assert_eq!(best_move(&blocking_position()).unwrap(), Pos::new(0, 2));
}

#[test]
fn test_engine_leaves_board_untouched() {
    let b = blocking_position();
    let before = b;
    let _ = analyze(&b).unwrap();
    assert_eq!(b, before);
}

#[test]
fn test_engine_rejects_finished_boards() {
    let won = board("XXX/OO./...");
    assert!(matches!(
        best_move(&won),
        Err(EngineError::InvalidState(InvalidState::GameOver(_)))
    ));

    let full = board("XOX/XOO/OXX");
    assert!(matches!(
        best_move(&full),
        Err(EngineError::InvalidState(_))
    ));
}

#[test]
fn test_empty_board_search() {
    let start = Instant::now();
    let report = analyze(&Board::new()).unwrap();
    let elapsed = start.elapsed();

    println!(
        "Empty board: best {} score {} in {} nodes, {:?}",
        report.best, report.score, report.nodes, elapsed
    );

    assert_eq!(report.best, Pos::new(0, 0));
    assert_eq!(report.candidates.len(), 9);
    assert_eq!(report.nodes, 549_945);
}

// ============================================================================
// GAME SESSION
// ============================================================================

#[test]
fn test_session_full_game() {
    let mut session = GameSession::new(Side::Player);

    // The player walks the cells in order; the engine answers each move
    while !session.is_over() {
        match session.turn() {
            Turn::PlayerTurn => {
                let pos = session.board().empty_cells().next().unwrap();
                session.play_player(pos).unwrap();
            }
            Turn::ComputerTurn => {
                session.play_computer().unwrap();
            }
            Turn::GameOver => unreachable!(),
        }
    }

    assert_ne!(session.outcome().winner(), Some(Side::Player));
    assert!(session.can_start_new_game());

    session.new_game();
    assert_eq!(session.turn(), Turn::PlayerTurn);
    assert!(session.board().is_blank());
}

#[test]
fn test_session_rejects_out_of_turn() {
    let mut session = GameSession::new(Side::Computer);
    assert!(matches!(
        session.play_player(Pos::new(0, 0)),
        Err(EngineError::NotYourTurn { .. })
    ));

    let (pos, _) = session.play_computer().unwrap();
    assert_eq!(pos, Pos::new(0, 0));
    assert!(matches!(
        session.play_player(pos),
        Err(EngineError::CellOccupied(_))
    ));
}

// ============================================================================
// AUDIT
// ============================================================================

#[test]
fn test_engine_unbeaten_exhaustive() {
    let reports = verify_all_openers().unwrap();
    for report in &reports {
        println!(
            "{} opens: {} positions, {} wins, {} draws, {} losses",
            report.opener, report.positions, report.computer_wins, report.draws, report.player_wins
        );
        assert!(report.is_unbeaten());
    }
}

#[test]
fn test_mirror_minimax_draws() {
    let mut opponent = Opponent::new(OpponentKind::Minimax, 0);
    let record = play_game_with(&mut opponent, Side::Player).unwrap();
    assert!(record.is_draw());
    assert_eq!(record.moves.len(), 9);
}

#[test]
fn test_random_series_parallel() {
    let config = AuditConfig::series(OpponentKind::Random, 20)
        .with_parallel(true)
        .with_seed(12345);
    let result = play_series(&config).unwrap();

    assert_eq!(result.games_played, 20);
    assert!(result.is_clean());
    assert_eq!(result.computer_wins + result.draws, 20);
}
