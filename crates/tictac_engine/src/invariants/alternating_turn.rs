//! Alternating turn invariant: players alternate 1, 2, 1, 2, ...

use super::Invariant;
use crate::{GameState, Mark};

/// Invariant: Players alternate turns.
///
/// Move history must show 1, 2, 1, 2, ... starting with player one, and the
/// seat to move must be the one after the last move (or none once finished).
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.moves();

        if let Some(first) = history.first()
            && first.player_number != Mark::PlayerOne
        {
            return false;
        }

        if history
            .windows(2)
            .any(|pair| pair[0].player_number == pair[1].player_number)
        {
            return false;
        }

        if game.is_finished() {
            return game.next_move_player().is_none();
        }

        let expected_next = if history.len() % 2 == 0 {
            Mark::PlayerOne
        } else {
            Mark::PlayerTwo
        };
        game.next_move_player() == Some(expected_next)
    }

    fn description() -> &'static str {
        "Players alternate turns (1, 2, 1, 2, ...)"
    }
}
