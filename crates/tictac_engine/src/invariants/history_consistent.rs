//! History consistency invariant: the board is a projection of the moves.

use super::Invariant;
use crate::{Board, GameState};

/// Invariant: replaying the move history onto an empty board reproduces the
/// current board, with sequence numbers 1, 2, 3, ... and no cell overwritten.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let mut reconstructed = Board::new();

        for (i, mv) in game.moves().iter().enumerate() {
            if mv.sequence as usize != i + 1 || mv.game_id != game.id() {
                return false;
            }
            match reconstructed.apply(mv.position, mv.player_number) {
                Ok(next) => reconstructed = next,
                Err(_) => return false,
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board matches replayed move history"
    }
}
