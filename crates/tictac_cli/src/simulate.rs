//! Bot-vs-bot simulation.

use anyhow::{Result, bail};
use derive_getters::Getters;
use derive_more::Display;
use rand::RngCore;
use tictac_engine::{Difficulty, GameOrchestrator, Mark, MemoryStore, Outcome, PlayerKind};
use tracing::{debug, info, instrument};

/// Results of a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Display)]
#[display(
    "{} games: player one {} wins, player two {} wins, {} ties",
    games,
    player_one_wins,
    player_two_wins,
    ties
)]
pub struct Tally {
    games: u32,
    player_one_wins: u32,
    player_two_wins: u32,
    ties: u32,
}

impl Tally {
    /// Counts one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Winner(Mark::PlayerOne) => self.player_one_wins += 1,
            Outcome::Winner(Mark::PlayerTwo) => self.player_two_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
    }
}

/// Plays `games` games between two bots and tallies the outcomes.
///
/// Every game runs to completion inside [`GameOrchestrator::create_game`],
/// since neither seat waits for input.
///
/// # Errors
///
/// Returns an error if a bot faults or a game ends up unfinished.
#[instrument(skip(rng))]
pub fn run<R: RngCore>(
    player_one: Difficulty,
    player_two: Difficulty,
    games: u32,
    rng: R,
) -> Result<Tally> {
    let mut store = MemoryStore::new();
    let first = *store
        .add_player(format!("{} (X)", player_one), PlayerKind::Computer(player_one))
        .id();
    let second = *store
        .add_player(format!("{} (O)", player_two), PlayerKind::Computer(player_two))
        .id();
    let mut orchestrator = GameOrchestrator::new(store, rng);

    let mut tally = Tally::default();
    for _ in 0..games {
        let game = orchestrator.create_game(first, second)?;
        let Some(outcome) = game.winner() else {
            bail!("Game {} stopped before finishing", game.id());
        };
        debug!(game_id = %game.id(), %outcome, board = %game.board(), "Simulated game");
        tally.record(outcome);
    }

    info!(%tally, "Simulation complete");
    Ok(tally)
}
