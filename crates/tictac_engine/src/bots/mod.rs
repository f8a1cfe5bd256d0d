//! Automated opponents.
//!
//! Every tier implements [`BotStrategy`]. A tier narrows the open positions
//! down to the set of equally good candidates its priority chain prefers
//! ([`BotStrategy::candidate_moves`]); the move is then drawn uniformly from
//! that set. The random draw is the only nondeterminism in the core.

mod easy;
mod expert;
mod hard;
mod medium;
pub mod tactics;

pub use easy::EasyBot;
pub use expert::ExpertBot;
pub use hard::HardBot;
pub use medium::MediumBot;

use crate::error::BotError;
use crate::{GameState, Position};
use rand::RngCore;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bot difficulty tiers, weakest first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random open cell.
    #[default]
    Easy,
    /// Win, block, center, random.
    Medium,
    /// Win, block, corner, center, random.
    Hard,
    /// Win, block, opening book, forks, then positional fallbacks.
    Expert,
}

impl Difficulty {
    /// The strategy implementing this tier.
    pub fn strategy(self) -> Box<dyn BotStrategy> {
        match self {
            Difficulty::Easy => Box::new(EasyBot),
            Difficulty::Medium => Box::new(MediumBot),
            Difficulty::Hard => Box::new(HardBot),
            Difficulty::Expert => Box::new(ExpertBot),
        }
    }
}

/// Move selection for a computer player.
///
/// Only called when the game is in progress and it is this bot's turn.
pub trait BotStrategy {
    /// The tier this strategy implements.
    fn difficulty(&self) -> Difficulty;

    /// Every move the strategy considers best; all are open positions.
    ///
    /// # Errors
    ///
    /// [`BotError::NoValidMoves`] if the game has no open position.
    fn candidate_moves(&self, game: &GameState) -> Result<Vec<Position>, BotError>;

    /// Picks uniformly among [`BotStrategy::candidate_moves`].
    ///
    /// # Errors
    ///
    /// [`BotError::NoValidMoves`] if there is nothing to choose from.
    fn calculate_next_move(
        &self,
        game: &GameState,
        rng: &mut dyn RngCore,
    ) -> Result<Position, BotError> {
        let candidates = self.candidate_moves(game)?;
        pick(&candidates, rng)
    }
}

/// Uniform choice among tied candidates.
#[instrument(skip(rng))]
pub(crate) fn pick(candidates: &[Position], rng: &mut dyn RngCore) -> Result<Position, BotError> {
    let choice = candidates
        .choose(rng)
        .copied()
        .ok_or(BotError::NoValidMoves)?;
    debug!(position = %choice, "Bot chose position");
    Ok(choice)
}

/// Open positions of an in-progress game, or [`BotError::NoValidMoves`].
pub(crate) fn open_positions(game: &GameState) -> Result<Vec<Position>, BotError> {
    let open = game.valid_next_positions();
    if open.is_empty() {
        return Err(BotError::NoValidMoves);
    }
    Ok(open)
}
