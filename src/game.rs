//! Game state machine and move application.
//!
//! A [`Game`] owns its [`Board`] and is mutated through a single operation,
//! [`Game::place_stone`], which writes the stone, records the move, runs the
//! rule pipeline for the active ruleset, and either concludes the game or
//! passes the turn. Drivers observe the outcome by polling [`Game::state`]
//! after every placement; terminal conditions are never signalled through
//! errors.
//!
//! Rule pipeline, in order: overline (Renju, Black only), five-in-a-row,
//! draw on a full board, double open four (Renju, Black only). The order
//! matters: a move that makes both an overline and a five is forbidden, not
//! winning.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, BoardError, Stone};
use crate::rules;

/// A run of five wins the game.
pub const WIN_RUN: usize = 5;

/// A run of six or more is an overline, forbidden for Black under Renju.
pub const OVERLINE_RUN: usize = 6;

/// Rule variant, fixed at game creation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ruleset {
    /// Any five-in-a-row wins; no forbidden moves.
    Freestyle,
    /// Black is additionally barred from overlines and double open fours.
    Renju,
}

/// Lifecycle state of a game. Only `Playing` permits further moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// Black made a Renju forbidden move; White wins.
    Forbidden,
    /// The driver stopped the game mid-play; it can be resumed.
    Stopped,
    /// Won or drawn.
    Finished,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Playing => write!(f, "playing"),
            GameState::Forbidden => write!(f, "forbidden"),
            GameState::Stopped => write!(f, "stopped"),
            GameState::Finished => write!(f, "finished"),
        }
    }
}

/// One placed stone. The color is implied by the move's position in the
/// history: even plies are Black, odd plies are White.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub x: usize,
    pub y: usize,
}

/// Errors from game construction and state transitions.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot place a stone while the game is {0}")]
    NotPlaying(GameState),
    #[error("only a stopped game can be resumed, this one is {0}")]
    ResumeNotStopped(GameState),
    #[error("a game still in progress cannot be replayed")]
    ReplayInProgress,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A Gomoku or Renju game in progress or concluded.
pub struct Game {
    board: Board,
    ruleset: Ruleset,
    to_move: Stone,
    state: GameState,
    winner: Option<Stone>,
    moves: Vec<Move>,
}

impl Game {
    /// Create a fresh game with an empty board. Black moves first.
    pub fn new(board_size: usize, ruleset: Ruleset) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(board_size)?,
            ruleset,
            to_move: Stone::Black,
            state: GameState::Playing,
            winner: None,
            moves: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// The color that places the next stone.
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The winning color, if the game concluded with one. `None` while
    /// playing, after a stop, and for a draw.
    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    /// The move history, one entry per placed stone in placement order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Place a stone for the current mover and run the rule pipeline.
    ///
    /// The engine does not check occupancy; the driver validates input
    /// against the board before calling. Out-of-range coordinates and calls
    /// on a non-playing game are errors the caller must treat as
    /// unrecoverable.
    pub fn place_stone(&mut self, x: usize, y: usize) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying(self.state));
        }
        let mover = self.to_move;
        self.board.set(x, y, mover)?;
        self.moves.push(Move { x, y });
        debug!(x, y, stone = %mover, ply = self.moves.len(), "stone placed");

        if self.restricted(mover) && rules::has_run(&self.board, x, y, mover, OVERLINE_RUN) {
            debug!(stone = %mover, "overline, forbidden");
            self.state = GameState::Forbidden;
            self.winner = Some(mover.opponent());
            return Ok(());
        }

        if rules::has_run(&self.board, x, y, mover, WIN_RUN) {
            debug!(stone = %mover, "five in a row");
            self.state = GameState::Finished;
            self.winner = Some(mover);
            return Ok(());
        }

        if self.moves.len() == self.board.size() * self.board.size() {
            debug!("board full, draw");
            self.state = GameState::Finished;
            return Ok(());
        }

        if self.restricted(mover) && rules::open_fours(&self.board, x, y, mover) >= 2 {
            debug!(stone = %mover, "double open four, forbidden");
            self.state = GameState::Forbidden;
            self.winner = Some(mover.opponent());
            return Ok(());
        }

        self.to_move = mover.opponent();
        Ok(())
    }

    /// Renju restricts Black only; White overlines and open fours are legal.
    fn restricted(&self, mover: Stone) -> bool {
        self.ruleset == Ruleset::Renju && mover == Stone::Black
    }

    /// Stop a running game. The game keeps its history and can be resumed.
    pub fn stop(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying(self.state));
        }
        self.state = GameState::Stopped;
        Ok(())
    }

    /// Resume a stopped game. Finished and forbidden games are terminal.
    pub fn resume(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Stopped {
            return Err(GameError::ResumeNotStopped(self.state));
        }
        self.state = GameState::Playing;
        Ok(())
    }

    /// Replay the recorded moves on a fresh game, calling `observe` with the
    /// reconstruction after each ply. The original game is not mutated; all
    /// derived state in the reconstruction is recomputed move by move.
    ///
    /// Only concluded or stopped games can be replayed.
    pub fn replay<E, F>(&self, mut observe: F) -> Result<(), E>
    where
        E: From<GameError>,
        F: FnMut(&Game, usize) -> Result<(), E>,
    {
        if self.state == GameState::Playing {
            return Err(GameError::ReplayInProgress.into());
        }
        let mut fresh = Game::new(self.board.size(), self.ruleset).map_err(E::from)?;
        for (ply, mv) in self.moves.iter().enumerate() {
            fresh.place_stone(mv.x, mv.y).map_err(E::from)?;
            observe(&fresh, ply)?;
        }
        Ok(())
    }

    /// Overwrite state and winner with values recorded in a save file. Used
    /// by import after replaying the move list, so that a stopped mid-game
    /// snapshot does not come back as `Playing`.
    pub(crate) fn restore_outcome(&mut self, state: GameState, winner: Option<Stone>) {
        self.state = state;
        self.winner = winner;
    }
}
