//! Medium tier: take a win, stop a loss, prefer the center.

use super::tactics::{blocking_moves, open_center, winning_moves};
use super::{BotStrategy, Difficulty, open_positions};
use crate::error::BotError;
use crate::{GameState, Mark, Position};
use tracing::{debug, instrument};

/// Priority chain: winning moves, blocking moves, center, any open cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediumBot;

/// The first two links of every non-random tier's chain.
///
/// Returns `None` when neither a win nor a block is available.
pub(crate) fn win_or_block(game: &GameState, mark: Mark) -> Option<Vec<Position>> {
    let board = game.board();

    let wins = winning_moves(board, mark);
    if !wins.is_empty() {
        debug!(?wins, "Taking winning move");
        return Some(wins);
    }

    let blocks = blocking_moves(board, mark);
    if !blocks.is_empty() {
        debug!(?blocks, "Blocking opponent");
        return Some(blocks);
    }

    None
}

/// Seat to move, or [`BotError::NoValidMoves`] on a finished game.
pub(crate) fn seat(game: &GameState) -> Result<Mark, BotError> {
    game.next_move_player().ok_or(BotError::NoValidMoves)
}

impl BotStrategy for MediumBot {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn candidate_moves(&self, game: &GameState) -> Result<Vec<Position>, BotError> {
        let open = open_positions(game)?;
        let mark = seat(game)?;

        if let Some(moves) = win_or_block(game, mark) {
            return Ok(moves);
        }

        let center = open_center(game.board());
        if !center.is_empty() {
            return Ok(center);
        }

        Ok(open)
    }
}
