//! The `GA` saved-match file format.
//!
//! A save file is plain text, one field per line: the magic `GA`, the board
//! size, the ruleset, the state, the winner (all as integers), then the move
//! list in coordinate notation:
//!
//! ```text
//! GA
//! 15
//! 0
//! 2
//! 0
//! H8
//! I9
//! ```
//!
//! Import does not trust the file's derived state: it recreates the game and
//! replays every listed move through the engine, so board contents, the
//! mover, and legality are all recomputed. Only then are state and winner
//! overwritten with the stored values, which is what lets a file encode a
//! stopped mid-game snapshot whose bare replay would still say playing.
//!
//! Malformed files are not recovered from; every parse failure is a
//! [`SaveError`] the driver treats as fatal.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::board::{BoardError, Stone};
use crate::game::{Game, GameError, GameState, Ruleset};

/// First line of every save file.
pub const MAGIC: &str = "GA";

/// Errors from reading or writing save files.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("not a saved match (bad magic)")]
    BadMagic,
    #[error("save file ends before the {0} field")]
    Truncated(&'static str),
    #[error("invalid {field} in save file: '{value}'")]
    BadField { field: &'static str, value: String },
    #[error("saved move '{0}' is not a valid coordinate")]
    BadMove(String),
    #[error("saved move list is not a legal game: {0}")]
    IllegalMove(GameError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

fn ruleset_code(ruleset: Ruleset) -> u8 {
    match ruleset {
        Ruleset::Freestyle => 0,
        Ruleset::Renju => 1,
    }
}

fn state_code(state: GameState) -> u8 {
    match state {
        GameState::Playing => 0,
        GameState::Forbidden => 1,
        GameState::Stopped => 2,
        GameState::Finished => 3,
    }
}

fn winner_code(winner: Option<Stone>) -> u8 {
    match winner {
        None => 0,
        Some(Stone::Black) => 1,
        Some(Stone::White) => 2,
    }
}

/// Serialize a game into a writer in the `GA` layout.
pub fn export<W: Write>(game: &Game, mut w: W) -> Result<(), SaveError> {
    writeln!(w, "{MAGIC}")?;
    writeln!(w, "{}", game.board().size())?;
    writeln!(w, "{}", ruleset_code(game.ruleset()))?;
    writeln!(w, "{}", state_code(game.state()))?;
    writeln!(w, "{}", winner_code(game.winner()))?;
    for mv in game.moves() {
        writeln!(w, "{}", game.board().to_notation(mv.x, mv.y)?)?;
    }
    Ok(())
}

/// Serialize a game to a file at `path`.
pub fn export_to_path<P: AsRef<Path>>(game: &Game, path: P) -> Result<(), SaveError> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    export(game, &mut w)?;
    w.flush()?;
    debug!(path = %path.display(), moves = game.moves().len(), "match saved");
    Ok(())
}

fn header_line<R: BufRead>(
    lines: &mut Lines<R>,
    field: &'static str,
) -> Result<String, SaveError> {
    match lines.next() {
        None => Err(SaveError::Truncated(field)),
        Some(line) => Ok(line?.trim().to_string()),
    }
}

fn header_uint<R: BufRead>(lines: &mut Lines<R>, field: &'static str) -> Result<u64, SaveError> {
    let value = header_line(lines, field)?;
    value.parse().map_err(|_| SaveError::BadField { field, value })
}

/// Reconstruct a game from a reader in the `GA` layout.
pub fn import<R: BufRead>(r: R) -> Result<Game, SaveError> {
    let mut lines = r.lines();

    if header_line(&mut lines, "magic")? != MAGIC {
        return Err(SaveError::BadMagic);
    }

    let board_size = header_uint(&mut lines, "board size")? as usize;

    let ruleset = match header_uint(&mut lines, "ruleset")? {
        0 => Ruleset::Freestyle,
        1 => Ruleset::Renju,
        other => {
            return Err(SaveError::BadField {
                field: "ruleset",
                value: other.to_string(),
            });
        }
    };

    let state = match header_uint(&mut lines, "state")? {
        0 => GameState::Playing,
        1 => GameState::Forbidden,
        2 => GameState::Stopped,
        3 => GameState::Finished,
        other => {
            return Err(SaveError::BadField {
                field: "state",
                value: other.to_string(),
            });
        }
    };

    let winner = match header_uint(&mut lines, "winner")? {
        0 => None,
        1 => Some(Stone::Black),
        2 => Some(Stone::White),
        other => {
            return Err(SaveError::BadField {
                field: "winner",
                value: other.to_string(),
            });
        }
    };

    let mut game = Game::new(board_size, ruleset)?;
    for line in lines {
        let line = line?;
        let label = line.trim();
        if label.is_empty() {
            continue;
        }
        let (x, y) = game
            .board()
            .from_notation(label)
            .map_err(|_| SaveError::BadMove(label.to_string()))?;
        game.place_stone(x, y).map_err(SaveError::IllegalMove)?;
    }

    game.restore_outcome(state, winner);
    Ok(game)
}

/// Reconstruct a game from a file at `path`.
pub fn import_from_path<P: AsRef<Path>>(path: P) -> Result<Game, SaveError> {
    let path = path.as_ref();
    let game = import(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), moves = game.moves().len(), state = %game.state(), "match loaded");
    Ok(game)
}
