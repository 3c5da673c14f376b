//! Heuristic computer opponent.
//!
//! Three difficulty policies pick a move from the current board. None of
//! them searches the game tree: Hard follows a fixed priority chain and can
//! be drawn or beaten by a careful player.

use crate::{Board, Mark, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Chance that Medium plays the Hard move instead of a random one.
pub const MEDIUM_SMART_PROBABILITY: f64 = 0.7;

/// Opponent skill level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Difficulty {
    /// Random empty cell.
    Easy,
    /// Hard most of the time, otherwise Easy.
    #[default]
    Medium,
    /// Win, block, center, corner, edge.
    Hard,
}

impl Difficulty {
    /// Picks a move for `mark` at this difficulty.
    pub fn choose_move<R: Rng + ?Sized>(
        self,
        board: &Board,
        mark: Mark,
        rng: &mut R,
    ) -> Option<Position> {
        choose_move(board, mark, self, rng)
    }
}

/// Picks the opponent's next move.
///
/// Returns `None` only when the board has no empty cell. The board is
/// never modified.
#[instrument(skip(board, rng))]
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    opponent: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    let choice = match difficulty {
        Difficulty::Easy => easy_move(board, rng),
        Difficulty::Medium => {
            if rng.random_bool(MEDIUM_SMART_PROBABILITY) {
                hard_move(board, opponent, rng)
            } else {
                easy_move(board, rng)
            }
        }
        Difficulty::Hard => hard_move(board, opponent, rng),
    };
    debug!(?choice, "Opponent chose move");
    choice
}

/// Uniformly random empty cell.
pub fn easy_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_positions().choose(rng).copied()
}

/// Priority chain: win, block, center, random corner, random edge.
pub fn hard_move<R: Rng + ?Sized>(board: &Board, opponent: Mark, rng: &mut R) -> Option<Position> {
    if let Some(pos) = completing_move(board, opponent) {
        debug!(%pos, "Taking the win");
        return Some(pos);
    }
    if let Some(pos) = completing_move(board, opponent.opponent()) {
        debug!(%pos, "Blocking");
        return Some(pos);
    }
    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }
    random_empty_of(board, &Position::CORNERS, rng)
        .or_else(|| random_empty_of(board, &Position::EDGES, rng))
}

/// First empty cell, in row-major order, where `mark` would complete a line.
pub fn completing_move(board: &Board, mark: Mark) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|&pos| board.with_mark(pos, mark).winner() == Some(mark))
}

fn random_empty_of<R: Rng + ?Sized>(
    board: &Board,
    candidates: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let empty: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|&pos| board.is_empty(pos))
        .collect();
    empty.choose(rng).copied()
}
