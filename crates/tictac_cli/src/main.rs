//! tictac - tic-tac-toe against computer players
//!
//! Plays interactive games on the terminal and runs bot-vs-bot simulations
//! on top of the `tictac_engine` game core.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod play;
mod simulate;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(config = %cli.config.display(), "Starting tictac");

    match cli.command {
        Command::Play {
            player_one,
            player_two,
            seed,
        } => {
            let stdin = std::io::stdin();
            play::run(
                &config,
                player_one.as_deref(),
                player_two.as_deref(),
                rng(seed.or(*config.seed())),
                stdin.lock(),
                std::io::stdout(),
            )?;
            Ok(())
        }
        Command::Simulate {
            player_one,
            player_two,
            games,
            seed,
        } => {
            let tally =
                simulate::run(player_one, player_two, games, rng(seed.or(*config.seed())))?;
            println!("{} vs {}: {}", player_one, player_two, tally);
            Ok(())
        }
        Command::Players => {
            list_players(&config);
            Ok(())
        }
    }
}

/// Seeded RNG when a seed is given, otherwise seeded from entropy.
#[instrument]
fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!(seed, "Using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Prints the configured players in seating order.
fn list_players(config: &AppConfig) {
    for (index, player) in config.players().iter().enumerate() {
        match player.difficulty() {
            Some(difficulty) => println!(
                "{}. {} ({}, {})",
                index + 1,
                player.name(),
                player.kind(),
                difficulty
            ),
            None => println!("{}. {} ({})", index + 1, player.name(), player.kind()),
        }
    }
}
