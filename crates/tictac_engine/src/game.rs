//! The authoritative game state machine.
//!
//! A game is created `InProgress` with an empty board and moves once per
//! [`GameState::apply_move`]. The transition to `Finished` happens exactly
//! once, inside `apply_move`, and nothing leaves `Finished`.

use crate::action::Move;
use crate::error::MoveError;
use crate::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use crate::{Board, GameId, GameStatus, Mark, Outcome, PlayerId, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Complete state of one game.
///
/// Deserialization rejects a state that breaks any of the
/// [`GameInvariants`], so a corrupt record fails to load instead of failing
/// on its next move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct GameState {
    id: GameId,
    player_one_id: PlayerId,
    player_two_id: PlayerId,
    board: Board,
    status: GameStatus,
    next_move_sequence: u32,
    next_move_player: Option<Mark>,
    winner: Option<Outcome>,
    moves: Vec<Move>,
}

/// Unchecked wire form of [`GameState`].
#[derive(Deserialize)]
struct GameRecord {
    id: GameId,
    player_one_id: PlayerId,
    player_two_id: PlayerId,
    board: Board,
    status: GameStatus,
    next_move_sequence: u32,
    next_move_player: Option<Mark>,
    winner: Option<Outcome>,
    moves: Vec<Move>,
}

impl TryFrom<GameRecord> for GameState {
    type Error = InvariantViolation;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let game = Self {
            id: record.id,
            player_one_id: record.player_one_id,
            player_two_id: record.player_two_id,
            board: record.board,
            status: record.status,
            next_move_sequence: record.next_move_sequence,
            next_move_player: record.next_move_player,
            winner: record.winner,
            moves: record.moves,
        };
        game.check_invariants()?;
        Ok(game)
    }
}

impl GameState {
    /// Creates a new game: empty board, sequence 1, player one to move.
    ///
    /// Player ids are looked up by the caller before construction.
    #[instrument]
    pub fn create(id: GameId, player_one_id: PlayerId, player_two_id: PlayerId) -> Self {
        info!(game_id = %id, %player_one_id, %player_two_id, "Game created");
        Self {
            id,
            player_one_id,
            player_two_id,
            board: Board::new(),
            status: GameStatus::InProgress,
            next_move_sequence: 1,
            next_move_player: Some(Mark::PlayerOne),
            winner: None,
            moves: Vec::new(),
        }
    }

    /// Rebuilds a game by re-applying its move history in order.
    ///
    /// # Errors
    ///
    /// The first [`MoveError`] any recorded move produces.
    #[instrument(skip(moves), fields(move_count = moves.len()))]
    pub fn replay(
        id: GameId,
        player_one_id: PlayerId,
        player_two_id: PlayerId,
        moves: &[Move],
    ) -> Result<Self, MoveError> {
        let mut game = Self::create(id, player_one_id, player_two_id);
        for mv in moves {
            game.apply_move(mv.sequence, mv.player_number, mv.player_id, mv.position)?;
        }
        Ok(game)
    }

    /// Applies one move. The only mutator.
    ///
    /// Callers validate with [`crate::MoveValidator`] first. The guards here
    /// reject a move that would break the state machine without touching any
    /// field, so a skipped validation cannot corrupt the game.
    ///
    /// After the mark is placed the outcome is recomputed: a completed line
    /// or a full board finishes the game and clears the next player,
    /// otherwise the turn passes to the opponent. The sequence always advances.
    ///
    /// The move is built on a copy of the state. The copy replaces `self`
    /// only once every invariant holds for it.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameFinished`], [`MoveError::SequenceMismatch`],
    /// [`MoveError::WrongPlayerTurn`] or [`MoveError::PositionOccupied`],
    /// and [`MoveError::InvariantViolation`] if the state was already
    /// inconsistent.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn apply_move(
        &mut self,
        sequence: u32,
        mark: Mark,
        player_id: PlayerId,
        position: Position,
    ) -> Result<Move, MoveError> {
        let expected_mark = self.next_move_player.ok_or(MoveError::GameFinished)?;
        if sequence != self.next_move_sequence {
            return Err(MoveError::SequenceMismatch {
                expected: self.next_move_sequence,
                got: sequence,
            });
        }
        if mark != expected_mark {
            return Err(MoveError::WrongPlayerTurn {
                expected: self.player_id_for(expected_mark),
                got: player_id,
            });
        }

        let record = Move {
            game_id: self.id,
            sequence,
            player_number: mark,
            player_id,
            position,
        };
        let board = self.board.apply(position, mark)?;
        let mut next = self.clone();
        next.board = board;
        next.moves.push(record);
        next.next_move_sequence += 1;

        let outcome = next.board.check_winner();
        match outcome {
            Some(outcome) => {
                next.status = GameStatus::Finished;
                next.winner = Some(outcome);
                next.next_move_player = None;
            }
            None => next.next_move_player = Some(mark.opponent()),
        }

        // Postcondition
        next.check_invariants()
            .map_err(|violation| MoveError::InvariantViolation(violation.description))?;
        *self = next;

        match outcome {
            Some(outcome) => {
                info!(game_id = %self.id, %outcome, moves = self.moves.len(), "Game finished");
            }
            None => debug!(
                game_id = %self.id,
                %position,
                next_sequence = self.next_move_sequence,
                "Move applied"
            ),
        }
        Ok(record)
    }

    /// First broken invariant, logging all of them.
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        GameInvariants::check_all(self).map_err(|violations| {
            warn!(game_id = %self.id, ?violations, "Game invariants violated");
            violations
                .first()
                .copied()
                .unwrap_or(InvariantViolation::new("Unknown invariant"))
        })
    }

    /// Same game with its board swapped, bypassing every check.
    #[cfg(test)]
    pub(crate) fn with_board(self, board: Board) -> Self {
        Self { board, ..self }
    }

    /// Open positions in ascending order; empty once the game is finished.
    pub fn valid_next_positions(&self) -> Vec<Position> {
        match self.status {
            GameStatus::InProgress => self.board.valid_positions(),
            GameStatus::Finished => Vec::new(),
        }
    }

    /// Game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Id of the player seated first.
    pub fn player_one_id(&self) -> PlayerId {
        self.player_one_id
    }

    /// Id of the player seated second.
    pub fn player_two_id(&self) -> PlayerId {
        self.player_two_id
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once the game has an outcome.
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Sequence number the next move must carry.
    pub fn next_move_sequence(&self) -> u32 {
        self.next_move_sequence
    }

    /// Seat to move, `None` once finished.
    pub fn next_move_player(&self) -> Option<Mark> {
        self.next_move_player
    }

    /// Outcome, `None` while in progress.
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    /// Applied moves in sequence order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The most recent move.
    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Id of the player sitting in `mark`'s seat.
    pub fn player_id_for(&self, mark: Mark) -> PlayerId {
        match mark {
            Mark::PlayerOne => self.player_one_id,
            Mark::PlayerTwo => self.player_two_id,
        }
    }

    /// Id of the player to move, `None` once finished.
    pub fn next_move_player_id(&self) -> Option<PlayerId> {
        self.next_move_player.map(|mark| self.player_id_for(mark))
    }

    /// Id of the winning player; `None` while in progress or after a tie.
    pub fn winning_player_id(&self) -> Option<PlayerId> {
        self.winner
            .and_then(|outcome| outcome.winner())
            .map(|mark| self.player_id_for(mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game() -> GameState {
        GameState::create(GameId(1), PlayerId(10), PlayerId(20))
    }

    #[test]
    fn test_create_initial_state() {
        let game = new_game();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.next_move_sequence(), 1);
        assert_eq!(game.next_move_player(), Some(Mark::PlayerOne));
        assert_eq!(game.next_move_player_id(), Some(PlayerId(10)));
        assert_eq!(game.winner(), None);
        assert_eq!(game.valid_next_positions().len(), 9);
    }

    #[test]
    fn test_apply_move_flips_turn() {
        let mut game = new_game();
        let mv = game
            .apply_move(1, Mark::PlayerOne, PlayerId(10), Position::Center)
            .unwrap();
        assert_eq!(mv.sequence, 1);
        assert_eq!(mv.game_id, GameId(1));
        assert_eq!(game.next_move_player(), Some(Mark::PlayerTwo));
        assert_eq!(game.next_move_sequence(), 2);
        assert_eq!(game.last_move(), Some(&mv));
    }

    #[test]
    fn test_guards_leave_state_unchanged() {
        let mut game = new_game();
        game.apply_move(1, Mark::PlayerOne, PlayerId(10), Position::Center)
            .unwrap();
        let before = game.clone();

        assert_eq!(
            game.apply_move(5, Mark::PlayerTwo, PlayerId(20), Position::TopLeft),
            Err(MoveError::SequenceMismatch { expected: 2, got: 5 })
        );
        assert_eq!(
            game.apply_move(2, Mark::PlayerOne, PlayerId(10), Position::TopLeft),
            Err(MoveError::WrongPlayerTurn {
                expected: PlayerId(20),
                got: PlayerId(10)
            })
        );
        assert_eq!(
            game.apply_move(2, Mark::PlayerTwo, PlayerId(20), Position::Center),
            Err(MoveError::PositionOccupied(Position::Center))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_win_finishes_game() {
        let mut game = new_game();
        let script = [
            (Mark::PlayerOne, PlayerId(10), Position::TopLeft),
            (Mark::PlayerTwo, PlayerId(20), Position::Center),
            (Mark::PlayerOne, PlayerId(10), Position::TopCenter),
            (Mark::PlayerTwo, PlayerId(20), Position::BottomLeft),
            (Mark::PlayerOne, PlayerId(10), Position::TopRight),
        ];
        for (seq, (mark, id, pos)) in script.into_iter().enumerate() {
            game.apply_move(seq as u32 + 1, mark, id, pos).unwrap();
        }
        assert!(game.is_finished());
        assert_eq!(game.winner(), Some(Outcome::Winner(Mark::PlayerOne)));
        assert_eq!(game.winning_player_id(), Some(PlayerId(10)));
        assert_eq!(game.next_move_player(), None);
        assert_eq!(game.next_move_player_id(), None);
        assert_eq!(game.next_move_sequence(), 6);
        assert!(game.valid_next_positions().is_empty());
        assert_eq!(
            game.apply_move(6, Mark::PlayerTwo, PlayerId(20), Position::BottomRight),
            Err(MoveError::GameFinished)
        );
    }

    #[test]
    fn test_replay_reproduces_state() {
        let mut game = new_game();
        game.apply_move(1, Mark::PlayerOne, PlayerId(10), Position::Center)
            .unwrap();
        game.apply_move(2, Mark::PlayerTwo, PlayerId(20), Position::TopLeft)
            .unwrap();

        let replayed =
            GameState::replay(GameId(1), PlayerId(10), PlayerId(20), game.moves()).unwrap();
        assert_eq!(replayed, game);
    }

    #[test]
    fn test_serde_roundtrip_keeps_board_string() {
        let mut game = new_game();
        game.apply_move(1, Mark::PlayerOne, PlayerId(10), Position::Center)
            .unwrap();
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["board"], "000010000");
        assert_eq!(json["status"], "IN_PROGRESS");
        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back, game);
    }

    #[test]
    fn test_inconsistent_state_is_rejected_without_change() {
        let mut game = new_game();
        game.apply_move(1, Mark::PlayerOne, PlayerId(10), Position::Center)
            .unwrap();
        let mut game = game.with_board("110010000".parse().unwrap());
        let before = game.clone();

        let err = game
            .apply_move(2, Mark::PlayerTwo, PlayerId(20), Position::BottomRight)
            .unwrap_err();
        assert!(matches!(err, MoveError::InvariantViolation(_)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_state() {
        let mut game = new_game();
        game.apply_move(1, Mark::PlayerOne, PlayerId(10), Position::Center)
            .unwrap();
        let mut json = serde_json::to_value(&game).unwrap();
        json["board"] = serde_json::Value::from("110010000");

        let err = serde_json::from_value::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("Invariant violated"));
    }
}
