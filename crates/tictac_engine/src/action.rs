//! First-class move types.
//!
//! A [`MoveCommand`] is a caller's intent and is validated before anything
//! changes. A [`Move`] is the immutable record of an applied move; the ordered
//! history of moves is the source of truth the board can be replayed from.

use crate::{GameId, Mark, PlayerId, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A proposed move, as received from the transport layer.
///
/// The position is a raw number so out-of-range input can be reported as
/// [`crate::MoveError::InvalidPosition`] instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct MoveCommand {
    /// Sequence number the caller believes comes next.
    pub sequence: u32,
    /// Player attempting to move.
    pub player_id: PlayerId,
    /// Target position, 1-9.
    pub position: u8,
}

/// An applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Game the move belongs to.
    pub game_id: GameId,
    /// 1-based sequence number within the game.
    pub sequence: u32,
    /// Seat that moved.
    pub player_number: Mark,
    /// Player that moved.
    pub player_id: PlayerId,
    /// Where the mark was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} (id {}) -> {}",
            self.sequence, self.player_number, self.player_id, self.position
        )
    }
}
