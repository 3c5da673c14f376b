//! Tic-tac-toe game logic.
//!
//! Pure game engine with no UI dependencies.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid of [`Cell`]s with win and draw detection.
//! - **Engine**: [`GameState`] applies moves, alternates turns and undoes.
//! - **Opponent**: [`choose_move`] picks a move for one of three [`Difficulty`] levels.
//! - **Stats**: [`StatsTracker`] keeps the session score and the persisted record.
//!
//! # Example
//!
//! ```
//! use deluxe_tictactoe::{Difficulty, GameState, Mark, Position, choose_move};
//!
//! let mut game = GameState::new();
//! game.apply_move(Position::TopLeft).unwrap();
//!
//! let mut rng = rand::rng();
//! let reply = choose_move(game.board(), Mark::O, Difficulty::Hard, &mut rng);
//! assert_eq!(reply, Some(Position::Center));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod engine;
mod error;
mod opponent;
mod position;
pub mod rules;
mod stats;
mod types;

pub use action::{Move, MoveError, UndoError};
pub use board::Board;
pub use engine::{GameState, GameStatus};
pub use error::StatsError;
pub use opponent::{
    Difficulty, MEDIUM_SMART_PROBABILITY, choose_move, completing_move, easy_move, hard_move,
};
pub use position::Position;
pub use stats::{PersistedStats, SessionScore, StatsTracker, percentage};
pub use types::{Cell, Mark, Outcome, PlayMode};
