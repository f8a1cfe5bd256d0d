//! Players as the game core sees them: an id and a kind.

use crate::bots::Difficulty;
use crate::types::PlayerId;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Who is choosing moves for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "player_type", content = "bot_difficulty", rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves arrive from outside the core.
    Human,
    /// Moves are computed by the bot of this tier.
    Computer(Difficulty),
}

/// A registered player.
///
/// Owned by the storage collaborator; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Player {
    id: PlayerId,
    name: String,
    kind: PlayerKind,
}

impl Player {
    /// The bot tier driving this player, if it is a computer.
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.kind {
            PlayerKind::Human => None,
            PlayerKind::Computer(difficulty) => Some(difficulty),
        }
    }

    /// True if moves must come from outside the core.
    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }
}
