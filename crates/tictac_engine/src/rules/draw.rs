//! Draw detection logic for tic-tac-toe.

use crate::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::win::check_winner;
    use super::*;
    use crate::{Mark, Outcome, Position};

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = Board::new().apply(Position::Center, Mark::PlayerOne).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_tie_detection() {
        // X O X / X O O / O X X
        let board: Board = "121122211".parse().unwrap();
        assert!(is_full(&board));
        assert_eq!(check_winner(&board), Some(Outcome::Tie));
    }

    #[test]
    fn test_full_board_line_beats_tie() {
        let board: Board = "121212121".parse().unwrap();
        // The main diagonals hold 1-1-1 here, so this layout is a win, not a tie.
        assert_eq!(check_winner(&board), Some(Outcome::Winner(Mark::PlayerOne)));

        let board: Board = "121211212".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Outcome::Tie));
    }
}
