//! A two-player connected-stone board game (Gomoku and Renju) played
//! through a text interface, with save, resume, and replay.
//!
//! The crate centers on the rule engine: a [`game::Game`] owns a
//! [`board::Board`], applies stones through a single mutating operation,
//! and reports wins, draws, and Renju forbidden moves through its state.
//! Everything around it is thin glue: the [`console`] line loop, the
//! [`save`] file format, and the clap driver in the binary.
//!
//! ## Modules
//!
//! - [`board`] - Grid storage, coordinate notation, rendering
//! - [`rules`] - Four-direction line scanning: five-in-a-row, overline, open four
//! - [`game`] - Game state machine and move application
//! - [`save`] - The `GA` saved-match text format
//! - [`console`] - Interactive input loop and replay presenter
//!
//! ## Example
//!
//! ```
//! use gomoku::game::{Game, GameState, Ruleset};
//! use gomoku::board::Stone;
//!
//! let mut game = Game::new(15, Ruleset::Freestyle)?;
//!
//! // Black and White alternate; five in a row wins.
//! for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3), (1, 3), (0, 4)] {
//!     game.place_stone(x, y)?;
//! }
//!
//! assert_eq!(game.state(), GameState::Finished);
//! assert_eq!(game.winner(), Some(Stone::Black));
//! # Ok::<(), gomoku::game::GameError>(())
//! ```

pub mod board;
pub mod console;
pub mod game;
pub mod rules;
pub mod save;
