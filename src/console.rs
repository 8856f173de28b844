//! Interactive text interface and replay presenter.
//!
//! The console owns the line loop: prompt the mover, read a line, validate
//! it against the board, feed it to the engine, and redraw. Input problems
//! (unparsable text, off-board or occupied coordinates) are user mistakes
//! and re-prompt; engine refusals are programmer errors and propagate.
//! A line reading `EOF` or the end of the input stream stops the game,
//! which a save file can later resume.
//!
//! Reads come from any [`BufRead`] and writes go to any [`Write`], so tests
//! can script a whole session without a terminal.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::board::{BoardError, Stone};
use crate::game::{Game, GameError, GameState};

/// ANSI home-and-clear sequence used to redraw the board in place.
const CLEAR_SCREEN: &str = "\x1b[H\x1b[J";

/// Errors from a console session: terminal I/O, or an engine refusal that
/// input validation should have made impossible.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A text session over an input and an output stream.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear: false,
        }
    }

    /// Redraw the board in place instead of scrolling. For real terminals;
    /// scripted sessions keep it off.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Drive an interactive game until it concludes or the input ends,
    /// then print the conclusion.
    pub fn run(&mut self, game: &mut Game) -> Result<(), ConsoleError> {
        self.render(game)?;
        while game.state() == GameState::Playing {
            write!(
                self.output,
                "{} stone's turn, please enter a move: ",
                title(game.to_move())
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                game.stop()?;
                break;
            };
            let line = line.trim();
            if line == "EOF" {
                game.stop()?;
                break;
            }

            match parse_move(game, line) {
                Some((x, y)) => {
                    game.place_stone(x, y)?;
                    self.render(game)?;
                }
                None => {
                    debug!(input = line, "rejected input");
                    writeln!(
                        self.output,
                        "The coordinate you entered is invalid, please try again."
                    )?;
                }
            }
        }
        self.conclude(game)
    }

    /// Replay a saved game move by move, pausing `pace` between plies and
    /// printing the board and the running move log after each.
    pub fn replay(&mut self, game: &Game, pace: Duration) -> Result<(), ConsoleError> {
        game.replay(|g: &Game, _ply| {
            if !pace.is_zero() {
                thread::sleep(pace);
            }
            self.render(g)?;
            self.move_log(g)?;
            Ok::<(), ConsoleError>(())
        })?;
        self.conclude(game)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf))
    }

    fn render(&mut self, game: &Game) -> Result<(), ConsoleError> {
        if self.clear {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        write!(self.output, "{}", game.board())?;
        Ok(())
    }

    /// The two-column move listing, `Black:` on the left, `White:` on the
    /// right, coordinates right-aligned to four characters.
    fn move_log(&mut self, game: &Game) -> Result<(), ConsoleError> {
        writeln!(self.output, "Moves:")?;
        for (ply, mv) in game.moves().iter().enumerate() {
            let label = game.board().to_notation(mv.x, mv.y)?;
            if ply % 2 == 0 {
                write!(self.output, "{:>6}{:>4}", "Black:", label)?;
            } else {
                writeln!(self.output, "  {:>6}{:>4}", "White:", label)?;
            }
        }
        if game.moves().len() % 2 != 0 {
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn conclude(&mut self, game: &Game) -> Result<(), ConsoleError> {
        match game.state() {
            GameState::Forbidden => writeln!(
                self.output,
                "Game concluded, black made a forbidden move, white won."
            )?,
            GameState::Finished => match game.winner() {
                Some(stone) => writeln!(self.output, "Game concluded, {stone} won.")?,
                None => writeln!(self.output, "Game concluded, the board is full, draw.")?,
            },
            GameState::Stopped | GameState::Playing => {
                writeln!(self.output, "The game is stopped.")?
            }
        }
        Ok(())
    }
}

fn title(stone: Stone) -> &'static str {
    match stone {
        Stone::Black => "Black",
        Stone::White => "White",
    }
}

/// Validate one line of input: a parsable coordinate on the board whose
/// cell is still empty. Anything else re-prompts.
fn parse_move(game: &Game, input: &str) -> Option<(usize, usize)> {
    let (x, y) = game.board().from_notation(input).ok()?;
    match game.board().get(x, y) {
        Ok(None) => Some((x, y)),
        _ => None,
    }
}
