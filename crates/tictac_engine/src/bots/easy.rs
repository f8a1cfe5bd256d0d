//! Easy tier: any open cell.

use super::{BotStrategy, Difficulty, open_positions};
use crate::error::BotError;
use crate::{GameState, Position};
use tracing::instrument;

/// Picks uniformly among all open positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasyBot;

impl BotStrategy for EasyBot {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn candidate_moves(&self, game: &GameState) -> Result<Vec<Position>, BotError> {
        open_positions(game)
    }
}
