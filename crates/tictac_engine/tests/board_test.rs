//! Tests for board encoding and win detection.

use std::collections::BTreeSet;
use tictac_engine::rules::{LINES, check_winner, line_winner};
use tictac_engine::{Board, Mark, MoveError, Outcome, Position, Square};

fn board(text: &str) -> Board {
    text.parse().expect("valid board string")
}

#[test]
fn test_top_row_win_and_cells() {
    let b = board("111220220");
    assert_eq!(b.check_winner(), Some(Outcome::Winner(Mark::PlayerOne)));
    assert_eq!(
        b.winning_cells(),
        BTreeSet::from([Position::TopLeft, Position::TopCenter, Position::TopRight])
    );
}

#[test]
fn test_full_board_without_line_is_tie() {
    let b = board("121122211");
    assert_eq!(b.check_winner(), Some(Outcome::Tie));
    assert!(b.winning_cells().is_empty());
}

#[test]
fn test_line_on_full_board_is_a_win_not_a_tie() {
    // Full board, X holds both diagonals.
    let b = board("121212121");
    assert_eq!(b.check_winner(), Some(Outcome::Winner(Mark::PlayerOne)));
    assert_eq!(b.winning_cells().len(), 5);
}

#[test]
fn test_empty_and_partial_boards_have_no_outcome() {
    assert_eq!(Board::new().check_winner(), None);
    assert_eq!(board("120000000").check_winner(), None);
}

#[test]
fn test_line_order_does_not_change_winner() {
    let samples = ["111220220", "200210201", "120120100", "001020100", "121122211"];
    for text in samples {
        let b = board(text);
        let forward = line_winner(&b);
        let reversed = LINES.iter().rev().find_map(|line| {
            let first = b.get(line[0]).mark()?;
            line.iter()
                .all(|pos| b.get(*pos) == Square::Occupied(first))
                .then_some(first)
        });
        assert_eq!(forward, reversed, "board {}", text);
        assert_eq!(check_winner(&b), b.check_winner());
    }
}

#[test]
fn test_valid_positions_ascending() {
    let b = board("201010002");
    assert_eq!(
        b.valid_positions(),
        vec![
            Position::TopCenter,
            Position::MiddleLeft,
            Position::MiddleRight,
            Position::BottomLeft,
            Position::BottomCenter
        ]
    );
}

#[test]
fn test_apply_number_rejects_out_of_range() {
    let b = Board::new();
    assert_eq!(
        b.apply_number(0, Mark::PlayerOne),
        Err(MoveError::InvalidPosition(0))
    );
    assert_eq!(
        b.apply_number(10, Mark::PlayerOne),
        Err(MoveError::InvalidPosition(10))
    );
    let next = b.apply_number(9, Mark::PlayerTwo).unwrap();
    assert_eq!(next.to_string(), "000000002");
}

#[test]
fn test_render_and_rows() {
    let b = board("100020000");
    assert_eq!(b.render(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    assert_eq!(b.as_rows(), ["100".to_string(), "020".to_string(), "000".to_string()]);
}

#[test]
fn test_rejects_malformed_strings() {
    assert!("".parse::<Board>().is_err());
    assert!("12345678".parse::<Board>().is_err());
    assert!("000000003".parse::<Board>().is_err());
    assert!("0000000000".parse::<Board>().is_err());
}
