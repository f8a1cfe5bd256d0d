//! Side-effect free move simulation shared by the state machine and bots.

use crate::{Board, Mark, Position, Square};

/// Returns a copy of `board` with `mark` placed at `position`.
///
/// Does not check occupancy; callers simulate only open cells.
pub fn simulate_move(board: &Board, mark: Mark, position: Position) -> Board {
    let mut next = board.clone();
    next.squares[position.index()] = Square::Occupied(mark);
    next
}
