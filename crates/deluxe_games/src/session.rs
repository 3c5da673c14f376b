//! One match between two players, from the first move to "play again".
//!
//! A [`GameSession`] composes the move engine, the opponent policy and the
//! stats tracker. It is the only thing the UI talks to while a game is on
//! screen: the UI sends commands and reads state back, it never touches
//! cells itself.
//!
//! The computer's reply is delayed. When a human move hands the turn to the
//! computer the session issues an [`OpponentTicket`] stamped with the
//! current generation. Undo, reset and leaving the game bump the
//! generation, so a ticket that arrives after any of those is refused.

use deluxe_tictactoe::{
    Difficulty, GameState, GameStatus, Mark, MoveError, Outcome, PlayMode, Position,
    StatsTracker, UndoError,
};
use derive_getters::Getters;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// Display names for both marks.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PlayerNames {
    /// Name shown for X.
    x: String,
    /// Name shown for O.
    o: String,
}

impl PlayerNames {
    /// Creates names as given.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Builds names from user input.
    ///
    /// Blank input falls back to `defaults`. In single-player mode O is
    /// always the computer, labelled with its difficulty.
    #[instrument(skip(defaults))]
    pub fn resolve(
        x_input: &str,
        o_input: &str,
        mode: PlayMode,
        difficulty: Difficulty,
        defaults: &PlayerNames,
    ) -> Self {
        let x = match x_input.trim() {
            "" => defaults.x.clone(),
            name => name.to_string(),
        };
        let o = match mode {
            PlayMode::Single => Self::computer_label(difficulty),
            PlayMode::Multi => match o_input.trim() {
                "" => defaults.o.clone(),
                name => name.to_string(),
            },
        };
        Self { x, o }
    }

    /// Label used for the computer player.
    pub fn computer_label(difficulty: Difficulty) -> String {
        format!("CPU ({})", difficulty)
    }

    /// Name of the player holding `mark`.
    pub fn name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }
}

/// Permission for the computer to move, valid for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentTicket {
    generation: u64,
}

impl OpponentTicket {
    /// Generation the ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened on a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Where the mark went.
    pub position: Position,
    /// Who moved.
    pub mark: Mark,
    /// Status after the move.
    pub status: GameStatus,
    /// Set when the computer moves next and should be scheduled.
    pub opponent_ticket: Option<OpponentTicket>,
}

/// Why a session command was refused.
///
/// Every variant leaves the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The engine rejected the move.
    #[display("{}", _0)]
    Move(MoveError),

    /// The engine rejected the undo.
    #[display("{}", _0)]
    Undo(UndoError),

    /// A human tried to move while the computer is to play.
    #[display("Wait for {} to move", _0)]
    ComputerTurn(String),

    /// The ticket predates an undo, reset or a new game.
    #[display("Opponent move discarded: the game has changed")]
    StaleTicket,

    /// The opponent policy found no empty cell.
    #[display("Opponent has no move available")]
    NoMoveAvailable,
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<UndoError> for SessionError {
    fn from(err: UndoError) -> Self {
        Self::Undo(err)
    }
}

/// A match between two players.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// Engine state for the current game.
    game: GameState,
    /// Single or multi player.
    mode: PlayMode,
    /// Opponent policy (used in single-player mode).
    difficulty: Difficulty,
    /// Display names.
    names: PlayerNames,
    /// Bumped whenever pending opponent moves must be discarded.
    generation: u64,
    /// Outcome of the current game once it has been counted.
    recorded: Option<Outcome>,
}

impl GameSession {
    /// Starts a fresh match.
    #[instrument(skip(names), fields(x = %names.x, o = %names.o))]
    pub fn new(mode: PlayMode, difficulty: Difficulty, names: PlayerNames) -> Self {
        info!("Starting game session");
        Self {
            game: GameState::new(),
            mode,
            difficulty,
            names,
            generation: 0,
            recorded: None,
        }
    }

    /// True when the computer is the one to move.
    pub fn is_computer_turn(&self) -> bool {
        self.game.is_active() && self.mode.computer_mark() == Some(*self.game.current_mark())
    }

    /// Plays a human move.
    ///
    /// # Errors
    ///
    /// - [`SessionError::ComputerTurn`] while the computer is to move.
    /// - [`SessionError::Move`] if the engine rejects the move.
    #[instrument(skip(self, stats), fields(generation = self.generation))]
    pub fn play_human(
        &mut self,
        pos: Position,
        stats: &mut StatsTracker,
    ) -> Result<MoveReport, SessionError> {
        if self.is_computer_turn() {
            let name = self.names.name(*self.game.current_mark()).to_string();
            debug!(%name, "Human move refused during computer turn");
            return Err(SessionError::ComputerTurn(name));
        }
        self.apply(pos, stats)
    }

    /// Plays the computer's move for a ticket issued earlier.
    ///
    /// # Errors
    ///
    /// - [`SessionError::StaleTicket`] if the game changed since the ticket
    ///   was issued, or it is not the computer's turn.
    /// - [`SessionError::NoMoveAvailable`] if the board has no empty cell.
    #[instrument(skip(self, stats, rng), fields(generation = self.generation))]
    pub fn play_opponent<R: Rng + ?Sized>(
        &mut self,
        ticket: OpponentTicket,
        stats: &mut StatsTracker,
        rng: &mut R,
    ) -> Result<MoveReport, SessionError> {
        if ticket.generation != self.generation || !self.is_computer_turn() {
            debug!(ticket = ticket.generation, "Discarding stale opponent ticket");
            return Err(SessionError::StaleTicket);
        }
        let mark = *self.game.current_mark();
        let pos = self
            .difficulty
            .choose_move(self.game.board(), mark, rng)
            .ok_or(SessionError::NoMoveAvailable)?;
        self.apply(pos, stats)
    }

    /// Takes back moves for the current play mode.
    ///
    /// Any pending opponent move is invalidated. Undoing a finished game
    /// puts it back in progress; finishing it again counts as a new game.
    ///
    /// # Errors
    ///
    /// [`SessionError::Undo`] when there is too little history.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Mark, SessionError> {
        let to_move = self.game.undo(self.mode)?;
        if let Some(outcome) = self.recorded.take() {
            debug!(?outcome, "Reopened a counted game");
        }
        self.generation += 1;
        Ok(to_move)
    }

    /// Clears the board for a new game with the same players.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.game.reset();
        self.recorded = None;
        self.generation += 1;
    }

    /// Invalidates any pending opponent move without touching the board.
    ///
    /// Called when the player leaves the game screen.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        self.generation += 1;
    }

    /// Cells to highlight after a win.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        match self.game.status() {
            GameStatus::Won(mark) => self.game.board().winning_line(*mark),
            _ => None,
        }
    }

    /// "Current Turn: <name> (<mark>)".
    pub fn turn_label(&self) -> String {
        let mark = *self.game.current_mark();
        format!("Current Turn: {} ({})", self.names.name(mark), mark)
    }

    /// "<name> wins!" or "It's a tie!" once the game is over.
    pub fn result_message(&self) -> Option<String> {
        match self.game.status() {
            GameStatus::InProgress => None,
            GameStatus::Won(mark) => Some(format!("{} wins!", self.names.name(*mark))),
            GameStatus::Tie => Some("It's a tie!".to_string()),
        }
    }

    fn apply(&mut self, pos: Position, stats: &mut StatsTracker) -> Result<MoveReport, SessionError> {
        let mark = *self.game.current_mark();
        let status = self.game.apply_move(pos)?;

        if let Some(outcome) = status.outcome() {
            self.record(outcome, stats);
        }

        let opponent_ticket = self.is_computer_turn().then_some(OpponentTicket {
            generation: self.generation,
        });

        Ok(MoveReport {
            position: pos,
            mark,
            status,
            opponent_ticket,
        })
    }

    fn record(&mut self, outcome: Outcome, stats: &mut StatsTracker) {
        if self.recorded.is_some() {
            return;
        }
        info!(%outcome, mode = %self.mode, "Game finished");
        if let Err(e) = stats.record_outcome(outcome, self.mode) {
            warn!(error = %e, "Stats file not updated");
        }
        self.recorded = Some(outcome);
    }
}
