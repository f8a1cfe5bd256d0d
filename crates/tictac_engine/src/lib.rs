//! Tic-tac-toe game core.
//!
//! The engine validates and applies moves, detects wins and ties, enforces
//! turn order, and picks moves for computer players at four difficulty tiers.
//!
//! # Architecture
//!
//! - **Board**: nine cells, win detection delegated to [`rules`]
//! - **GameState**: the authoritative state machine, mutated only by
//!   [`GameState::apply_move`]
//! - **MoveValidator**: ordered preconditions, no mutation
//! - **Bots**: [`BotStrategy`] per [`Difficulty`]
//! - **GameOrchestrator**: runs bot turns after each creation or human move,
//!   persisting through a [`GameStore`]
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tictac_engine::{
//!     Difficulty, GameOrchestrator, MemoryStore, MoveCommand, PlayerKind,
//! };
//!
//! # fn example() -> Result<(), tictac_engine::GameError> {
//! let mut store = MemoryStore::new();
//! let human = store.add_player("Ada", PlayerKind::Human);
//! let bot = store.add_player("Bot", PlayerKind::Computer(Difficulty::Expert));
//!
//! let mut orchestrator = GameOrchestrator::new(store, StdRng::seed_from_u64(7));
//! let game = orchestrator.create_game(*human.id(), *bot.id())?;
//!
//! // The bot answers before make_move returns.
//! let game = orchestrator.make_move(game.id(), MoveCommand::new(1, *human.id(), 5))?;
//! assert_eq!(game.next_move_sequence(), 3);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod error;
mod game;
mod orchestrator;
mod player;
mod position;
mod store;
mod types;
mod validator;

// Public modules: pure helpers useful on their own
pub mod bots;
pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use action::{Move, MoveCommand};
pub use board::{Board, ParseBoardError};
pub use position::{ParsePositionError, Position};
pub use types::{GameId, GameStatus, Mark, Outcome, PlayerId, Square};

// Crate-level exports - State machine and validation
pub use game::GameState;
pub use validator::{
    GameInProgress, MoveValidator, PlayersTurn, PositionIsOpen, SequenceMatches, ValidatedMove,
};

// Crate-level exports - Players and bots
pub use bots::{BotStrategy, Difficulty, EasyBot, ExpertBot, HardBot, MediumBot};
pub use player::{Player, PlayerKind};

// Crate-level exports - Orchestration and storage
pub use orchestrator::{GameEvent, GameOrchestrator};
pub use store::{GameStore, MemoryStore};

// Crate-level exports - Errors
pub use error::{BotError, GameError, MoveError, StoreError};
