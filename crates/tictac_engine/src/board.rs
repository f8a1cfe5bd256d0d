//! The 3x3 board value type.

use crate::error::MoveError;
use crate::rules;
use crate::{Mark, Outcome, Position, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::instrument;

/// 3x3 tic-tac-toe board.
///
/// Serializes as the 9-character board-state string (`'0'` empty,
/// `'1'` player one, `'2'` player two), positions 1-9 in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    /// Squares in row-major order, indexed by [`Position::index`].
    pub(crate) squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of marked cells.
    pub fn mark_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns a new board with `mark` placed at `position`.
    ///
    /// # Errors
    ///
    /// [`MoveError::PositionOccupied`] if the cell is already marked.
    #[instrument(skip(self))]
    pub fn apply(&self, position: Position, mark: Mark) -> Result<Board, MoveError> {
        if !self.is_empty(position) {
            return Err(MoveError::PositionOccupied(position));
        }
        Ok(rules::simulate_move(self, mark, position))
    }

    /// Like [`Board::apply`], for an external 1-based position number.
    ///
    /// # Errors
    ///
    /// [`MoveError::InvalidPosition`] outside 1-9, otherwise as [`Board::apply`].
    #[instrument(skip(self))]
    pub fn apply_number(&self, number: u8, mark: Mark) -> Result<Board, MoveError> {
        self.apply(Position::try_from(number)?, mark)
    }

    /// All empty cells in ascending position order.
    pub fn valid_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Winner, tie, or `None` while the game can continue.
    pub fn check_winner(&self) -> Option<Outcome> {
        rules::check_winner(self)
    }

    /// Positions belonging to any completed line.
    pub fn winning_cells(&self) -> BTreeSet<Position> {
        rules::winning_cells(self)
    }

    /// The three rows as board-state strings, top to bottom.
    pub fn as_rows(&self) -> [String; 3] {
        let encoded = self.to_string();
        [
            encoded[0..3].to_string(),
            encoded[3..6].to_string(),
            encoded[6..9].to_string(),
        ]
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their position number so players know what to type.
    pub fn render(&self) -> String {
        let mut result = String::new();
        for (row, cells) in Position::ALL.chunks(3).enumerate() {
            for (col, pos) in cells.iter().enumerate() {
                match self.get(*pos) {
                    Square::Empty => result.push_str(&pos.number().to_string()),
                    Square::Occupied(mark) => result.push(mark.symbol()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for square in &self.squares {
            let c = match square {
                Square::Empty => '0',
                Square::Occupied(mark) => char::from(b'0' + mark.number()),
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Board-state string was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board state '{}': expected 9 characters of 0, 1 or 2", input)]
pub struct ParseBoardError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rejected = || ParseBoardError {
            input: s.to_string(),
        };
        if s.chars().count() != 9 {
            return Err(rejected());
        }
        let mut board = Board::new();
        for (slot, c) in board.squares.iter_mut().zip(s.chars()) {
            *slot = match c {
                '0' => Square::Empty,
                '1' => Square::Occupied(Mark::PlayerOne),
                '2' => Square::Occupied(Mark::PlayerTwo),
                _ => return Err(rejected()),
            };
        }
        Ok(board)
    }
}

impl TryFrom<String> for Board {
    type Error = ParseBoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}
