//! Win detection logic for tic-tac-toe.

use super::draw::is_full;
use crate::{Board, Mark, Outcome, Position};
use std::collections::BTreeSet;
use tracing::instrument;

/// The 8 winning lines in fixed order: rows top-to-bottom, columns
/// left-to-right, then the two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the owner of a completed line, if any.
///
/// Only the first completed line in [`LINES`] order is reported.
#[instrument(skip(board))]
pub fn line_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| completed_by(board, line))
}

/// Evaluates the board.
///
/// A completed line wins regardless of how full the board is. A full board
/// without a completed line is a tie. Otherwise the game continues (`None`).
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Outcome> {
    if let Some(mark) = line_winner(board) {
        return Some(Outcome::Winner(mark));
    }
    if is_full(board) {
        return Some(Outcome::Tie);
    }
    None
}

/// Union of the positions of every completed line. Empty without a winner.
#[instrument(skip(board))]
pub fn winning_cells(board: &Board) -> BTreeSet<Position> {
    LINES
        .iter()
        .filter(|line| completed_by(board, line).is_some())
        .flat_map(|line| line.iter().copied())
        .collect()
}

fn completed_by(board: &Board, [a, b, c]: &[Position; 3]) -> Option<Mark> {
    let mark = board.get(*a).mark()?;
    (board.get(*b).mark() == Some(mark) && board.get(*c).mark() == Some(mark)).then_some(mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
        assert!(winning_cells(&Board::new()).is_empty());
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "111220220".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Outcome::Winner(Mark::PlayerOne)));
        assert_eq!(
            winning_cells(&board),
            BTreeSet::from([Position::TopLeft, Position::TopCenter, Position::TopRight])
        );
    }

    #[test]
    fn test_winner_diagonal() {
        let board: Board = "210120002".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Outcome::Winner(Mark::PlayerTwo)));
    }

    #[test]
    fn test_win_on_full_board_is_not_tie() {
        // X X X / O O X / X O O
        let board: Board = "111221122".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Outcome::Winner(Mark::PlayerOne)));
    }

    #[test]
    fn test_double_line_cells_are_unioned() {
        // X completes the top row and the left column with the final move.
        let board: Board = "111122122".parse().unwrap();
        let cells = winning_cells(&board);
        assert_eq!(cells.len(), 5);
        assert!(cells.contains(&Position::BottomLeft));
        assert!(cells.contains(&Position::TopRight));
    }

    #[test]
    fn test_line_order_does_not_change_outcome() {
        let boards = ["111220220", "210120002", "112122211", "121212121", "120120100"];
        for text in boards {
            let board: Board = text.parse().unwrap();
            let forward = LINES.iter().find_map(|line| completed_by(&board, line));
            let backward = LINES.iter().rev().find_map(|line| completed_by(&board, line));
            assert_eq!(forward, backward, "board {text}");
        }
    }
}
