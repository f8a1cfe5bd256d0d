//! Hard tier: like medium, but corners come before the center.

use super::medium::{seat, win_or_block};
use super::tactics::{open_center, open_corners};
use super::{BotStrategy, Difficulty, open_positions};
use crate::error::BotError;
use crate::{GameState, Position};
use tracing::instrument;

/// Priority chain: winning moves, blocking moves, corners, center, any open cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardBot;

impl BotStrategy for HardBot {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn candidate_moves(&self, game: &GameState) -> Result<Vec<Position>, BotError> {
        let open = open_positions(game)?;
        let mark = seat(game)?;

        if let Some(moves) = win_or_block(game, mark) {
            return Ok(moves);
        }

        let board = game.board();
        for preferred in [open_corners(board), open_center(board)] {
            if !preferred.is_empty() {
                return Ok(preferred);
            }
        }

        Ok(open)
    }
}
