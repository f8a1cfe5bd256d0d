//! Board analysis shared by the bot tiers.
//!
//! All helpers work on a [`Board`] and simulate moves with
//! [`simulate_move`], so every tier sees positions the same way.

use crate::rules::{line_winner, simulate_move};
use crate::{Board, Mark, Position};

/// Open positions where `mark` would complete a line immediately.
pub fn winning_moves(board: &Board, mark: Mark) -> Vec<Position> {
    board
        .valid_positions()
        .into_iter()
        .filter(|pos| line_winner(&simulate_move(board, mark, *pos)) == Some(mark))
        .collect()
}

/// Open positions that stop the opponent of `mark` winning on their next move.
pub fn blocking_moves(board: &Board, mark: Mark) -> Vec<Position> {
    winning_moves(board, mark.opponent())
}

/// Open positions where `mark` would create two or more winning threats.
pub fn fork_points(board: &Board, mark: Mark) -> Vec<Position> {
    board
        .valid_positions()
        .into_iter()
        .filter(|pos| winning_moves(&simulate_move(board, mark, *pos), mark).len() >= 2)
        .collect()
}

/// True if `mark` playing `position` leaves the opponent no way to fork.
///
/// When the move creates a threat, the opponent's reply is forced; the move
/// is safe if that forced block does not hand the opponent two threats.
/// Without a threat, the move is safe if the opponent has no fork point left.
pub fn is_safe_fork_defense(board: &Board, mark: Mark, position: Position) -> bool {
    let after = simulate_move(board, mark, position);
    let opponent = mark.opponent();
    match winning_moves(&after, mark).first() {
        Some(threat) => {
            let forced = simulate_move(&after, opponent, *threat);
            winning_moves(&forced, opponent).len() < 2
        }
        None => fork_points(&after, opponent).is_empty(),
    }
}

/// Open corners in ascending order.
pub fn open_corners(board: &Board) -> Vec<Position> {
    open_among(board, &Position::CORNERS)
}

/// Open edges in ascending order.
pub fn open_edges(board: &Board) -> Vec<Position> {
    open_among(board, &Position::EDGES)
}

/// The center, if open.
pub fn open_center(board: &Board) -> Vec<Position> {
    open_among(board, &[Position::Center])
}

/// The subset of `positions` that is open, in the given order.
pub fn open_among(board: &Board, positions: &[Position]) -> Vec<Position> {
    positions
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect()
}
