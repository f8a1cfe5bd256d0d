//! Move validation.
//!
//! Preconditions are checked in a fixed order and the first failure is
//! reported, so a rejected move always fails for exactly one reason:
//!
//! 1. the game is in progress,
//! 2. the sequence number is the one the game expects,
//! 3. the acting player is registered for the seat to move,
//! 4. the position is on the board and open.
//!
//! Validation never mutates anything.

use crate::action::MoveCommand;
use crate::error::MoveError;
use crate::{GameState, Mark, PlayerId, Position};
use tracing::{instrument, warn};

/// A move that passed every precondition against a specific game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedMove {
    /// Sequence number of the move.
    pub sequence: u32,
    /// Seat making the move, inferred from the game.
    pub player_number: Mark,
    /// Player making the move.
    pub player_id: PlayerId,
    /// Open board position.
    pub position: Position,
}

/// Precondition: the game accepts moves.
pub struct GameInProgress;

impl GameInProgress {
    /// Returns the seat to move.
    #[instrument(skip(game))]
    pub fn check(game: &GameState) -> Result<Mark, MoveError> {
        game.next_move_player().ok_or(MoveError::GameFinished)
    }
}

/// Precondition: the move carries the expected sequence number.
pub struct SequenceMatches;

impl SequenceMatches {
    /// Fails with [`MoveError::SequenceMismatch`] unless `sequence` is next.
    #[instrument(skip(game))]
    pub fn check(game: &GameState, sequence: u32) -> Result<(), MoveError> {
        let expected = game.next_move_sequence();
        if sequence != expected {
            Err(MoveError::SequenceMismatch {
                expected,
                got: sequence,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: it is this player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayerTurn`] unless `player_id` holds `mark`'s seat.
    #[instrument(skip(game))]
    pub fn check(game: &GameState, mark: Mark, player_id: PlayerId) -> Result<(), MoveError> {
        let expected = game.player_id_for(mark);
        if player_id != expected {
            Err(MoveError::WrongPlayerTurn {
                expected,
                got: player_id,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the position exists and is empty.
pub struct PositionIsOpen;

impl PositionIsOpen {
    /// Parses the position and checks it is still open.
    #[instrument(skip(game))]
    pub fn check(game: &GameState, number: u8) -> Result<Position, MoveError> {
        let position = Position::try_from(number)?;
        if game.valid_next_positions().contains(&position) {
            Ok(position)
        } else {
            Err(MoveError::PositionOccupied(position))
        }
    }
}

/// Composite precondition for a proposed move.
pub struct MoveValidator;

impl MoveValidator {
    /// Validates all preconditions for a move, in order.
    ///
    /// # Errors
    ///
    /// The [`MoveError`] of the first failing precondition.
    #[instrument(skip(game), fields(game_id = %game.id()))]
    pub fn validate(game: &GameState, command: &MoveCommand) -> Result<ValidatedMove, MoveError> {
        let result = Self::check_all(game, command);
        if let Err(err) = &result {
            warn!(game_id = %game.id(), error = %err, "Move rejected");
        }
        result
    }

    fn check_all(game: &GameState, command: &MoveCommand) -> Result<ValidatedMove, MoveError> {
        let mark = GameInProgress::check(game)?;
        SequenceMatches::check(game, command.sequence)?;
        PlayersTurn::check(game, mark, command.player_id)?;
        let position = PositionIsOpen::check(game, command.position)?;
        Ok(ValidatedMove {
            sequence: command.sequence,
            player_number: mark,
            player_id: command.player_id,
            position,
        })
    }
}

impl GameState {
    /// Applies a move that passed [`MoveValidator::validate`].
    ///
    /// # Errors
    ///
    /// As [`GameState::apply_move`], if the game changed since validation.
    pub fn apply_validated(&mut self, mv: ValidatedMove) -> Result<crate::Move, MoveError> {
        self.apply_move(mv.sequence, mv.player_number, mv.player_id, mv.position)
    }
}
