//! Board positions, addressed 1-9 in row-major order.

use crate::error::MoveError;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// A position on the tic-tac-toe board.
///
/// Externally positions are numbered 1 (top-left) to 9 (bottom-right).
/// [`Position::index`] is the only conversion to a 0-based array index.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    /// Top-left (position 1)
    TopLeft,
    /// Top-center (position 2)
    TopCenter,
    /// Top-right (position 3)
    TopRight,
    /// Middle-left (position 4)
    MiddleLeft,
    /// Center (position 5)
    Center,
    /// Middle-right (position 6)
    MiddleRight,
    /// Bottom-left (position 7)
    BottomLeft,
    /// Bottom-center (position 8)
    BottomCenter,
    /// Bottom-right (position 9)
    BottomRight,
}

impl Position {
    /// All 9 positions in ascending order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// The four corners in ascending order.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// The four edge midpoints in ascending order.
    pub const EDGES: [Position; 4] = [
        Position::TopCenter,
        Position::MiddleLeft,
        Position::MiddleRight,
        Position::BottomCenter,
    ];

    /// External 1-based position number.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based index into the board's cell array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Creates a position from a 0-based cell index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label for display.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// True for positions 1, 3, 7 and 9.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// True for positions 2, 4, 6 and 8.
    pub fn is_edge(self) -> bool {
        Self::EDGES.contains(&self)
    }

    /// True for position 5.
    pub fn is_center(self) -> bool {
        self == Position::Center
    }

    /// The diagonally opposite corner, or `None` if this is not a corner.
    pub fn opposite_corner(self) -> Option<Self> {
        match self {
            Position::TopLeft => Some(Position::BottomRight),
            Position::TopRight => Some(Position::BottomLeft),
            Position::BottomLeft => Some(Position::TopRight),
            Position::BottomRight => Some(Position::TopLeft),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = MoveError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1..=9 => Self::from_index(usize::from(number - 1)).ok_or(MoveError::InvalidPosition(number)),
            _ => Err(MoveError::InvalidPosition(number)),
        }
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.number()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

/// Input could not be read as a position.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("'{}' is not a board position (expected 1-9 or a label such as 'center')", input)]
pub struct ParsePositionError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses a 1-based number or a label (case-insensitive).
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rejected = || ParsePositionError {
            input: trimmed.to_string(),
        };

        if let Ok(number) = trimmed.parse::<u8>() {
            return Position::try_from(number).map_err(|_| rejected());
        }

        let wanted = trimmed.to_lowercase();
        if wanted.is_empty() {
            return Err(rejected());
        }
        Position::iter()
            .find(|pos| pos.label().to_lowercase() == wanted)
            .ok_or_else(rejected)
    }
}
