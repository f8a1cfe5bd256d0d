//! Error types for the game core.

use crate::bots::Difficulty;
use crate::position::Position;
use crate::types::{GameId, PlayerId};
use derive_more::{Display, Error, From};
use tracing::instrument;

/// A proposed move was rejected.
///
/// Every variant leaves the game untouched. Validation reports exactly one
/// reason, in the fixed check order of [`crate::MoveValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Position number outside 1-9.
    #[display("Invalid position {}; positions are numbered 1-9", _0)]
    InvalidPosition(#[error(not(source))] u8),

    /// Position is on the board but already marked.
    #[display("Invalid position specified; {} is already occupied", _0)]
    PositionOccupied(#[error(not(source))] Position),

    /// Sequence number of the move does not match the game.
    #[display("Unexpected move sequence (expected {}, got {})", expected, got)]
    SequenceMismatch {
        /// Sequence number the game expects next.
        expected: u32,
        /// Sequence number supplied with the move.
        got: u32,
    },

    /// Acting player is not the player registered for this turn.
    #[display("Not this player's turn (expected player {}, got player {})", expected, got)]
    WrongPlayerTurn {
        /// Player registered for the current turn.
        expected: PlayerId,
        /// Player who attempted to move.
        got: PlayerId,
    },

    /// No further moves are accepted.
    #[display("No further moves allowed; game is finished")]
    GameFinished,

    /// The move would leave the game in an inconsistent state, which only
    /// happens when the state itself was corrupted before the move.
    #[display("Game state is inconsistent: {}", _0)]
    InvariantViolation(#[error(not(source))] &'static str),
}

/// A bot could not produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BotError {
    /// Bot was asked to move with no open cells (or on a finished game).
    #[display("No valid moves available")]
    NoValidMoves,
}

/// Storage collaborator failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Failure surfaced by [`crate::GameOrchestrator`].
#[derive(Debug, Clone, Display, Error, From)]
pub enum GameError {
    /// Game creation referenced unknown player ids.
    #[display("Invalid players: {}", _0)]
    #[from(ignore)]
    InvalidPlayers(#[error(not(source))] String),

    /// No game is stored under this id.
    #[display("Invalid game id {}", _0)]
    #[from(ignore)]
    GameNotFound(#[error(not(source))] GameId),

    /// User-facing move rejection.
    #[display("{}", _0)]
    Move(MoveError),

    /// A bot failed to produce a legal move. This is a defect, not a user error.
    #[display("Bot ({}) fault: {}", difficulty, reason)]
    #[from(ignore)]
    BotFault {
        /// Tier of the misbehaving bot.
        difficulty: Difficulty,
        /// What went wrong.
        reason: String,
    },

    /// Storage collaborator failed.
    #[display("{}", _0)]
    Store(StoreError),
}

impl GameError {
    /// True for errors caused by the caller's input rather than an internal defect.
    pub fn is_user_error(&self) -> bool {
        match self {
            GameError::Move(MoveError::InvariantViolation(_)) => false,
            GameError::InvalidPlayers(_) | GameError::GameNotFound(_) | GameError::Move(_) => true,
            GameError::BotFault { .. } | GameError::Store(_) => false,
        }
    }
}
