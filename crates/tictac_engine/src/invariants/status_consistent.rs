//! Status consistency invariant: status, winner and board agree.

use super::Invariant;
use crate::{GameState, GameStatus};

/// Invariant: `Finished` exactly when an outcome is recorded, and the recorded
/// outcome is what the board evaluates to.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let finished = game.status() == GameStatus::Finished;
        finished == game.winner().is_some() && game.winner() == game.board().check_winner()
    }

    fn description() -> &'static str {
        "Status is Finished exactly when the board has an outcome"
    }
}
