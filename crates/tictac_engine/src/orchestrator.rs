//! Turn loop between human and computer players.
//!
//! Every transition goes through the same path: validate, apply, commit to
//! the store, then notify the optional listener. After a game is created or a
//! human moves, computer players keep moving one at a time until a human is
//! to move or the game is over.

use crate::action::MoveCommand;
use crate::bots::Difficulty;
use crate::error::{GameError, StoreError};
use crate::store::GameStore;
use crate::validator::{MoveValidator, ValidatedMove};
use crate::{GameId, GameState, Move, Outcome, PlayerId};
use rand::RngCore;
use std::sync::mpsc::Sender;
use tracing::{debug, info, instrument, warn};

/// Sent to the listener after each committed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A game was created and saved.
    GameCreated {
        /// New game.
        game_id: GameId,
        /// Player moving first.
        player_one_id: PlayerId,
        /// Player moving second.
        player_two_id: PlayerId,
    },
    /// A move was applied and saved.
    MoveApplied(Move),
    /// The last applied move ended the game.
    GameFinished {
        /// Finished game.
        game_id: GameId,
        /// How it ended.
        outcome: Outcome,
    },
}

/// Drives games stored in `S`, breaking bot ties with `R`.
pub struct GameOrchestrator<S, R> {
    store: S,
    rng: R,
    events: Option<Sender<GameEvent>>,
}

impl<S: GameStore, R: RngCore> GameOrchestrator<S, R> {
    /// Creates an orchestrator without a listener.
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            events: None,
        }
    }

    /// Attaches a listener for [`GameEvent`]s.
    pub fn with_events(mut self, events: Sender<GameEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store, e.g. to register players.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the orchestrator, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates a game between two registered players and plays any opening
    /// bot moves.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPlayers`] if either id is unknown, otherwise store
    /// failures and bot faults.
    #[instrument(skip(self))]
    pub fn create_game(
        &mut self,
        player_one_id: PlayerId,
        player_two_id: PlayerId,
    ) -> Result<GameState, GameError> {
        for id in [player_one_id, player_two_id] {
            if self.store.load_player(id)?.is_none() {
                warn!(player_id = %id, "Game creation with unknown player");
                return Err(GameError::InvalidPlayers(format!("unknown player id {}", id)));
            }
        }

        let game_id = self.store.allocate_game_id()?;
        let mut game = GameState::create(game_id, player_one_id, player_two_id);
        self.store.save_game(&game)?;
        self.emit(GameEvent::GameCreated {
            game_id,
            player_one_id,
            player_two_id,
        });

        self.run_automated_moves(&mut game)?;
        Ok(game)
    }

    /// Loads a game.
    ///
    /// # Errors
    ///
    /// [`GameError::GameNotFound`] if no game has this id.
    #[instrument(skip(self))]
    pub fn load_game(&self, game_id: GameId) -> Result<GameState, GameError> {
        self.store
            .load_game(game_id)?
            .ok_or(GameError::GameNotFound(game_id))
    }

    /// Validates a move without applying it. Repeating the call gives the
    /// same answer as long as the game is unchanged.
    ///
    /// # Errors
    ///
    /// [`GameError::GameNotFound`] or the [`crate::MoveError`] of the first
    /// failing check.
    #[instrument(skip(self))]
    pub fn validate_move(
        &self,
        game_id: GameId,
        command: &MoveCommand,
    ) -> Result<ValidatedMove, GameError> {
        let game = self.load_game(game_id)?;
        Ok(MoveValidator::validate(&game, command)?)
    }

    /// Applies a caller's move, then lets computer players respond.
    ///
    /// On a rejected move nothing is stored and the game is unchanged.
    ///
    /// # Errors
    ///
    /// [`GameError::GameNotFound`], [`GameError::Move`] for rejected moves,
    /// store failures and bot faults.
    #[instrument(skip(self, command), fields(sequence = command.sequence, player_id = %command.player_id, position = command.position))]
    pub fn make_move(
        &mut self,
        game_id: GameId,
        command: MoveCommand,
    ) -> Result<GameState, GameError> {
        let mut game = self.load_game(game_id)?;
        let validated = MoveValidator::validate(&game, &command)?;
        let mv = game.apply_validated(validated)?;
        self.commit(&game, &mv)?;

        self.run_automated_moves(&mut game)?;
        Ok(game)
    }

    /// Plays computer moves until a human is to move or the game is over.
    ///
    /// A bot that fails to move, or proposes a move the validator rejects,
    /// is reported as [`GameError::BotFault`].
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn run_automated_moves(&mut self, game: &mut GameState) -> Result<(), GameError> {
        while let Some(player_id) = game.next_move_player_id() {
            let player = self.store.load_player(player_id)?.ok_or_else(|| {
                StoreError::new(format!(
                    "Player {} of game {} is missing",
                    player_id,
                    game.id()
                ))
            })?;
            let Some(difficulty) = player.difficulty() else {
                debug!(%player_id, "Waiting for human move");
                break;
            };

            let position = difficulty
                .strategy()
                .calculate_next_move(game, &mut self.rng)
                .map_err(|err| bot_fault(difficulty, err))?;
            let command = MoveCommand::new(game.next_move_sequence(), player_id, position.number());
            let validated =
                MoveValidator::validate(game, &command).map_err(|err| bot_fault(difficulty, err))?;
            let mv = game
                .apply_validated(validated)
                .map_err(|err| bot_fault(difficulty, err))?;
            debug!(%difficulty, %position, "Bot moved");

            self.commit(game, &mv)?;
        }
        Ok(())
    }

    /// Writes the resulting state and then the move, then notifies the listener.
    ///
    /// The game record goes first: if it fails nothing is written and the
    /// same move can be retried.
    fn commit(&mut self, game: &GameState, mv: &Move) -> Result<(), GameError> {
        self.store.save_game(game)?;
        self.store.append_move(mv)?;
        info!(game_id = %game.id(), sequence = mv.sequence, position = %mv.position, "Move committed");

        self.emit(GameEvent::MoveApplied(*mv));
        if let Some(outcome) = game.winner() {
            self.emit(GameEvent::GameFinished {
                game_id: game.id(),
                outcome,
            });
        }
        Ok(())
    }

    fn emit(&self, event: GameEvent) {
        if let Some(events) = &self.events
            && events.send(event).is_err()
        {
            warn!("Event listener disconnected, dropping event");
        }
    }
}

fn bot_fault(difficulty: Difficulty, err: impl std::fmt::Display) -> GameError {
    warn!(%difficulty, error = %err, "Bot fault");
    GameError::BotFault {
        difficulty,
        reason: err.to_string(),
    }
}
