//! Integration tests for the gomoku crate.
//!
//! These drive the public API the way the binary does: moves arrive in
//! coordinate notation, games conclude through the state machine, and saved
//! matches round-trip through real files.

use std::time::Duration;

use gomoku::board::Stone;
use gomoku::console::Console;
use gomoku::game::{Game, GameState, Ruleset};
use gomoku::save;

// =============================================================================
// Helpers
// =============================================================================

/// Apply a sequence of moves given in coordinate notation, alternating
/// Black and White from the current mover.
fn play(game: &mut Game, moves: &[&str]) {
    for label in moves {
        let (x, y) = game
            .board()
            .from_notation(label)
            .unwrap_or_else(|e| panic!("bad test move {label}: {e}"));
        game.place_stone(x, y)
            .unwrap_or_else(|e| panic!("move {label} rejected: {e}"));
    }
}

fn finished_with(game: &Game, winner: Stone) {
    assert_eq!(game.state(), GameState::Finished);
    assert_eq!(game.winner(), Some(winner));
}

// =============================================================================
// Freestyle wins
// =============================================================================

#[test]
fn test_black_wins_vertical_column_a() {
    // The scenario from the manual: Black stacks column A while White
    // answers in column B.
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(
        &mut game,
        &["A1", "B1", "A2", "B2", "A3", "B3", "A4", "B4", "A5"],
    );
    finished_with(&game, Stone::Black);
}

#[test]
fn test_black_wins_horizontal() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(
        &mut game,
        &["D8", "D1", "E8", "F1", "F8", "H1", "G8", "J1", "H8"],
    );
    finished_with(&game, Stone::Black);
}

#[test]
fn test_white_wins_diagonal() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(
        &mut game,
        &[
            "A15", "C3", "B15", "D4", "C15", "E5", "D15", "F6", "F14", "G7",
        ],
    );
    finished_with(&game, Stone::White);
}

#[test]
fn test_black_wins_anti_diagonal() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(
        &mut game,
        &["C10", "A1", "D9", "C1", "E8", "E1", "F7", "G1", "G6"],
    );
    finished_with(&game, Stone::Black);
}

#[test]
fn test_freestyle_six_still_wins() {
    // Freestyle has no overline rule: completing a run of six is a win.
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(
        &mut game,
        &[
            "C8", "A1", "D8", "C1", "E8", "E1", "G8", "G1", "H8", "J1", "F8",
        ],
    );
    finished_with(&game, Stone::Black);
}

#[test]
fn test_no_win_with_gap() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(
        &mut game,
        &["C8", "A1", "D8", "C1", "E8", "E1", "F8", "G1", "H8"],
    );
    assert_eq!(game.state(), GameState::Playing);
}

// =============================================================================
// Renju forbidden moves
// =============================================================================

#[test]
fn test_renju_overline_forbids_black() {
    // G8 joins C8..F8 with H8 into a run of six. The six-run contains a
    // five-run, but the overline check takes precedence: White wins.
    let mut game = Game::new(15, Ruleset::Renju).unwrap();
    play(
        &mut game,
        &[
            "C8", "A1", "D8", "C1", "E8", "E1", "F8", "G1", "H8", "J1", "G8",
        ],
    );
    assert_eq!(game.state(), GameState::Forbidden);
    assert_eq!(game.winner(), Some(Stone::White));
}

#[test]
fn test_renju_exact_five_wins_for_black() {
    let mut game = Game::new(15, Ruleset::Renju).unwrap();
    play(
        &mut game,
        &["A1", "B1", "A2", "B2", "A3", "B3", "A4", "B4", "A5"],
    );
    finished_with(&game, Stone::Black);
}

#[test]
fn test_renju_white_is_unrestricted() {
    // The same overline shape played by White is just a long winning run.
    let mut game = Game::new(15, Ruleset::Renju).unwrap();
    play(
        &mut game,
        &[
            "A1", "C8", "C1", "D8", "E1", "E8", "G1", "F8", "J1", "H8", "L1", "G8",
        ],
    );
    finished_with(&game, Stone::White);
}

#[test]
fn test_renju_double_open_four_forbids_black() {
    // H8 completes an open four on row 8 (F8..J8 minus H8) and an open four
    // on column H (H6..H9 minus H8) in one move.
    let mut game = Game::new(15, Ruleset::Renju).unwrap();
    play(
        &mut game,
        &[
            "F8", "A1", "G8", "C1", "I8", "E1", "H6", "G1", "H7", "J1", "H9", "L1", "H8",
        ],
    );
    assert_eq!(game.state(), GameState::Forbidden);
    assert_eq!(game.winner(), Some(Stone::White));
}

#[test]
fn test_renju_single_open_four_is_legal() {
    let mut game = Game::new(15, Ruleset::Renju).unwrap();
    play(&mut game, &["F8", "A1", "G8", "C1", "H8", "E1", "I8"]);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.to_move(), Stone::White);
}

// =============================================================================
// Draws
// =============================================================================

#[test]
fn test_draw_on_filled_board() {
    // A 2x2 board cannot hold a five-run; filling it is always a draw.
    let mut game = Game::new(2, Ruleset::Freestyle).unwrap();
    play(&mut game, &["A1", "B1", "A2", "B2"]);
    assert_eq!(game.state(), GameState::Finished);
    assert_eq!(game.winner(), None);
    assert!(game.board().is_full());
}

// =============================================================================
// Save, resume, replay
// =============================================================================

#[test]
fn test_save_roundtrip_stopped_midgame() {
    let mut game = Game::new(15, Ruleset::Renju).unwrap();
    play(&mut game, &["H8", "I9", "H9", "I8", "H10"]);
    game.stop().unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    save::export_to_path(&game, file.path()).unwrap();
    let back = save::import_from_path(file.path()).unwrap();

    assert_eq!(back.state(), GameState::Stopped);
    assert_eq!(back.winner(), None);
    assert_eq!(back.ruleset(), Ruleset::Renju);
    assert_eq!(back.moves(), game.moves());
    assert_eq!(back.to_move(), Stone::White);
    for y in 0..15 {
        for x in 0..15 {
            assert_eq!(back.board().get(x, y), game.board().get(x, y));
        }
    }
}

#[test]
fn test_save_roundtrip_finished_game() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(
        &mut game,
        &["A1", "B1", "A2", "B2", "A3", "B3", "A4", "B4", "A5"],
    );

    let file = tempfile::NamedTempFile::new().unwrap();
    save::export_to_path(&game, file.path()).unwrap();
    let back = save::import_from_path(file.path()).unwrap();

    finished_with(&back, Stone::Black);
    assert_eq!(back.moves().len(), 9);
}

#[test]
fn test_save_roundtrip_forbidden_game() {
    let mut game = Game::new(15, Ruleset::Renju).unwrap();
    play(
        &mut game,
        &[
            "C8", "A1", "D8", "C1", "E8", "E1", "F8", "G1", "H8", "J1", "G8",
        ],
    );
    assert_eq!(game.state(), GameState::Forbidden);

    let file = tempfile::NamedTempFile::new().unwrap();
    save::export_to_path(&game, file.path()).unwrap();
    let back = save::import_from_path(file.path()).unwrap();

    assert_eq!(back.state(), GameState::Forbidden);
    assert_eq!(back.winner(), Some(Stone::White));
}

#[test]
fn test_resume_and_finish_a_stopped_game() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(&mut game, &["A1", "B1", "A2", "B2", "A3", "B3", "A4", "B4"]);
    game.stop().unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    save::export_to_path(&game, file.path()).unwrap();

    let mut resumed = save::import_from_path(file.path()).unwrap();
    resumed.resume().unwrap();
    assert_eq!(resumed.to_move(), Stone::Black);
    play(&mut resumed, &["A5"]);
    finished_with(&resumed, Stone::Black);
}

#[test]
fn test_imported_game_replays_to_same_positions() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    play(&mut game, &["H8", "I9", "H9", "I8", "H10", "I10"]);
    game.stop().unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    save::export_to_path(&game, file.path()).unwrap();
    let loaded = save::import_from_path(file.path()).unwrap();

    let mut plies = 0;
    loaded
        .replay::<gomoku::game::GameError, _>(|g, ply| {
            plies = ply + 1;
            assert_eq!(g.moves(), &loaded.moves()[..=ply]);
            Ok(())
        })
        .unwrap();
    assert_eq!(plies, 6);
}

// =============================================================================
// Scripted console sessions
// =============================================================================

#[test]
fn test_full_session_play_save_and_replay() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    let script = "H8\nI9\nH9\nEOF\n";
    let mut out = Vec::new();
    Console::new(script.as_bytes(), &mut out)
        .run(&mut game)
        .unwrap();
    assert_eq!(game.state(), GameState::Stopped);

    let file = tempfile::NamedTempFile::new().unwrap();
    save::export_to_path(&game, file.path()).unwrap();
    let loaded = save::import_from_path(file.path()).unwrap();

    let mut replay_out = Vec::new();
    Console::new(&b""[..], &mut replay_out)
        .replay(&loaded, Duration::ZERO)
        .unwrap();
    let text = String::from_utf8(replay_out).unwrap();
    assert!(text.contains("Black:  H8  White:  I9"));
    assert!(text.ends_with("The game is stopped.\n"));
}

#[test]
fn test_session_win_message() {
    let mut game = Game::new(15, Ruleset::Freestyle).unwrap();
    let script = "A1\nB1\nA2\nB2\nA3\nB3\nA4\nB4\nA5\n";
    let mut out = Vec::new();
    Console::new(script.as_bytes(), &mut out)
        .run(&mut game)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Game concluded, black won."));
}
