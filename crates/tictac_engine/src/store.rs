//! Storage collaborator for games, players and move history.
//!
//! The core never assumes storage is in memory; it only talks to a
//! [`GameStore`]. [`MemoryStore`] is the implementation used by the binary
//! and the tests.

use crate::action::Move;
use crate::error::StoreError;
use crate::{GameId, GameState, Player, PlayerId, PlayerKind};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Loads and saves entities by id and appends move records.
///
/// A move is committed as [`GameStore::save_game`] followed by
/// [`GameStore::append_move`]. A failed save therefore leaves the history
/// untouched. Backends with transactions should run both writes in one.
pub trait GameStore {
    /// Reserves an id for a new game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if no id can be allocated.
    fn allocate_game_id(&mut self) -> Result<GameId, StoreError>;

    /// Loads a game, `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn load_game(&self, id: GameId) -> Result<Option<GameState>, StoreError>;

    /// Loads a player, `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn load_player(&self, id: PlayerId) -> Result<Option<Player>, StoreError>;

    /// Appends one move to its game's history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the move does not extend the stored history.
    fn append_move(&mut self, mv: &Move) -> Result<(), StoreError>;

    /// Saves the current state of a game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn save_game(&mut self, game: &GameState) -> Result<(), StoreError>;
}

/// In-memory [`GameStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: HashMap<GameId, GameState>,
    players: HashMap<PlayerId, Player>,
    moves: HashMap<GameId, Vec<Move>>,
    last_game_id: u64,
    last_player_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player under the next free id.
    #[instrument(skip(self, name), fields(name = %name.as_ref()))]
    pub fn add_player(&mut self, name: impl AsRef<str>, kind: PlayerKind) -> Player {
        self.last_player_id += 1;
        let player = Player::new(
            PlayerId(self.last_player_id),
            name.as_ref().to_string(),
            kind,
        );
        info!(player_id = %player.id(), ?kind, "Player registered");
        self.players.insert(*player.id(), player.clone());
        player
    }

    /// All registered players, ordered by id.
    pub fn players(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by_key(|player| *player.id());
        players
    }

    /// Move history appended for a game, in sequence order.
    pub fn moves(&self, game_id: GameId) -> &[Move] {
        self.moves.get(&game_id).map(Vec::as_slice).unwrap_or_default()
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self))]
    fn allocate_game_id(&mut self) -> Result<GameId, StoreError> {
        self.last_game_id = self
            .last_game_id
            .checked_add(1)
            .ok_or_else(|| StoreError::new("Game id space exhausted"))?;
        Ok(GameId(self.last_game_id))
    }

    #[instrument(skip(self))]
    fn load_game(&self, id: GameId) -> Result<Option<GameState>, StoreError> {
        let game = self.games.get(&id).cloned();
        debug!(found = game.is_some(), "Loaded game");
        Ok(game)
    }

    #[instrument(skip(self))]
    fn load_player(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        Ok(self.players.get(&id).cloned())
    }

    #[instrument(skip(self, mv), fields(game_id = %mv.game_id, sequence = mv.sequence))]
    fn append_move(&mut self, mv: &Move) -> Result<(), StoreError> {
        let history = self.moves.entry(mv.game_id).or_default();
        let expected = history.len() as u32 + 1;
        if mv.sequence != expected {
            return Err(StoreError::new(format!(
                "Move {} does not extend history of game {} (expected sequence {})",
                mv.sequence, mv.game_id, expected
            )));
        }
        history.push(*mv);
        Ok(())
    }

    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn save_game(&mut self, game: &GameState) -> Result<(), StoreError> {
        self.games.insert(game.id(), game.clone());
        debug!(status = %game.status(), "Game saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Difficulty, Mark, Position};

    #[test]
    fn test_game_ids_are_sequential() {
        let mut store = MemoryStore::new();
        assert_eq!(store.allocate_game_id().unwrap(), GameId(1));
        assert_eq!(store.allocate_game_id().unwrap(), GameId(2));
    }

    #[test]
    fn test_players_roundtrip() {
        let mut store = MemoryStore::new();
        let human = store.add_player("Ada", PlayerKind::Human);
        let bot = store.add_player("Bot", PlayerKind::Computer(Difficulty::Hard));
        assert_eq!(store.load_player(*human.id()).unwrap(), Some(human.clone()));
        assert_eq!(store.players(), vec![&human, &bot]);
        assert_eq!(store.load_player(PlayerId(99)).unwrap(), None);
    }

    #[test]
    fn test_append_move_rejects_gaps() {
        let mut store = MemoryStore::new();
        let mv = Move {
            game_id: GameId(1),
            sequence: 2,
            player_number: Mark::PlayerTwo,
            player_id: PlayerId(2),
            position: Position::Center,
        };
        assert!(store.append_move(&mv).is_err());
        assert!(store.moves(GameId(1)).is_empty());

        let first = Move {
            sequence: 1,
            player_number: Mark::PlayerOne,
            player_id: PlayerId(1),
            ..mv
        };
        store.append_move(&first).unwrap();
        store.append_move(&mv).unwrap();
        assert_eq!(store.moves(GameId(1)), &[first, mv]);
    }
}
