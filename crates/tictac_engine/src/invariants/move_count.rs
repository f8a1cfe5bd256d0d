//! Move count invariant: marked cells track the sequence number.

use super::Invariant;
use crate::GameState;

/// Invariant: exactly `next_move_sequence - 1` cells are marked, and the
/// history holds that many moves.
pub struct MoveCountInvariant;

impl Invariant<GameState> for MoveCountInvariant {
    fn holds(game: &GameState) -> bool {
        let Some(applied) = (game.next_move_sequence() as usize).checked_sub(1) else {
            return false;
        };
        game.board().mark_count() == applied && game.moves().len() == applied
    }

    fn description() -> &'static str {
        "Marked cells equal sequence - 1"
    }
}
