//! Core domain types for tic-tac-toe.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identifier of a game, assigned by the storage collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

/// Identifier of a player, owned by the storage collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// Seat in the game. Player one always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Mark {
    /// Player number 1 (X).
    #[display("Player 1")]
    PlayerOne,
    /// Player number 2 (O).
    #[display("Player 2")]
    PlayerTwo,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::PlayerOne => Mark::PlayerTwo,
            Mark::PlayerTwo => Mark::PlayerOne,
        }
    }

    /// External 1-based player number.
    pub fn number(self) -> u8 {
        match self {
            Mark::PlayerOne => 1,
            Mark::PlayerTwo => 2,
        }
    }

    /// Parses an external player number (1 or 2).
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Mark::PlayerOne),
            2 => Some(Mark::PlayerTwo),
            _ => None,
        }
    }

    /// Symbol used when rendering a board for humans.
    pub fn symbol(self) -> char {
        match self {
            Mark::PlayerOne => 'X',
            Mark::PlayerTwo => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell claimed by a player.
    Occupied(Mark),
}

impl Square {
    /// The mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Moves are still accepted.
    #[display("IN_PROGRESS")]
    InProgress,
    /// Terminal: won or tied.
    #[display("FINISHED")]
    Finished,
}

/// Result of a finished game.
///
/// A game that has not finished has no outcome (`Option<Outcome>::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    #[display("{} wins", _0)]
    Winner(Mark),
    /// Board filled without a completed line.
    #[display("Tie")]
    Tie,
}

impl Outcome {
    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the game was tied.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}
