//! Expert tier: opening theory plus one ply of fork awareness.
//!
//! The chain is evaluated top to bottom and the first non-empty link wins:
//!
//! 1. complete a line,
//! 2. block the opponent's line,
//! 3. opening book for the first plies, including player two's edge defense,
//! 4. create a fork,
//! 5. defuse the opponent's forks,
//! 6. center, then corners, then any open cell.

use super::medium::{seat, win_or_block};
use super::tactics::{
    fork_points, is_safe_fork_defense, open_among, open_center, open_corners, open_edges,
};
use super::{BotStrategy, Difficulty, open_positions};
use crate::error::BotError;
use crate::{GameState, Mark, Position};
use tracing::{debug, instrument};

/// Never loses from any reachable position.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpertBot;

impl ExpertBot {
    /// Known-good replies for the opening plies, empty when out of book.
    fn opening_book(game: &GameState, mark: Mark) -> Vec<Position> {
        let board = game.board();
        match (mark, game.moves()) {
            (Mark::PlayerOne, []) => open_corners(board),
            (Mark::PlayerOne, [first, reply]) => {
                let (first, reply) = (first.position, reply.position);
                if reply.is_center() {
                    first
                        .opposite_corner()
                        .map(|corner| open_among(board, &[corner]))
                        .unwrap_or_default()
                } else if reply.is_edge() {
                    open_center(board)
                } else if first.opposite_corner() == Some(reply) {
                    open_corners(board)
                } else {
                    reply
                        .opposite_corner()
                        .map(|corner| open_among(board, &[corner]))
                        .unwrap_or_default()
                }
            }
            // Corner, center, opposite corner: only an edge holds the draw.
            (Mark::PlayerTwo, [first, reply, third]) => {
                let (first, reply, third) = (first.position, reply.position, third.position);
                if first.is_corner() && reply.is_center() && first.opposite_corner() == Some(third)
                {
                    open_edges(board)
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Answers to the opponent's fork points.
    ///
    /// Occupying a fork point is not always enough: the move may leave a
    /// second fork open, or force a block that creates one. Fork points that
    /// avoid both are preferred, then any open cell that does, then the raw
    /// fork points.
    fn fork_defense(game: &GameState, mark: Mark, threats: Vec<Position>) -> Vec<Position> {
        let board = game.board();
        let safe: Vec<Position> = threats
            .iter()
            .copied()
            .filter(|pos| is_safe_fork_defense(board, mark, *pos))
            .collect();
        if !safe.is_empty() {
            return safe;
        }

        let elsewhere: Vec<Position> = board
            .valid_positions()
            .into_iter()
            .filter(|pos| is_safe_fork_defense(board, mark, *pos))
            .collect();
        if !elsewhere.is_empty() {
            debug!(?elsewhere, "No fork point is safe, defending elsewhere");
            return elsewhere;
        }

        threats
    }
}

impl BotStrategy for ExpertBot {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Expert
    }

    #[instrument(skip(self, game), fields(game_id = %game.id(), sequence = game.next_move_sequence()))]
    fn candidate_moves(&self, game: &GameState) -> Result<Vec<Position>, BotError> {
        let open = open_positions(game)?;
        let mark = seat(game)?;

        if let Some(moves) = win_or_block(game, mark) {
            return Ok(moves);
        }

        let book = Self::opening_book(game, mark);
        if !book.is_empty() {
            debug!(?book, "Playing from opening book");
            return Ok(book);
        }

        let board = game.board();
        let own_forks = fork_points(board, mark);
        if !own_forks.is_empty() {
            debug!(?own_forks, "Creating fork");
            return Ok(own_forks);
        }

        let opponent_forks = fork_points(board, mark.opponent());
        if !opponent_forks.is_empty() {
            debug!(?opponent_forks, "Defending against fork");
            return Ok(Self::fork_defense(game, mark, opponent_forks));
        }

        for fallback in [open_center(board), open_corners(board)] {
            if !fallback.is_empty() {
                return Ok(fallback);
            }
        }

        Ok(open)
    }
}
