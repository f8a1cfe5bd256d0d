//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_engine::Difficulty;

/// Tic-tac-toe against computer players of four strengths
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Play tic-tac-toe against bots or pit bots against each other", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (defaults apply if it is missing)
    #[arg(short, long, global = true, default_value = "tictac.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play {
        /// Configured player moving first (defaults to the first configured player)
        #[arg(long)]
        player_one: Option<String>,

        /// Configured player moving second (defaults to the second configured player)
        #[arg(long)]
        player_two: Option<String>,

        /// RNG seed for bot tie-breaks (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play bot-vs-bot games and report the results
    Simulate {
        /// Difficulty of the bot moving first (easy, medium, hard, expert)
        #[arg(long)]
        player_one: Difficulty,

        /// Difficulty of the bot moving second (easy, medium, hard, expert)
        #[arg(long)]
        player_two: Difficulty,

        /// Number of games to play
        #[arg(short = 'n', long, default_value_t = 100)]
        games: u32,

        /// RNG seed for bot tie-breaks (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List configured players
    Players,
}
