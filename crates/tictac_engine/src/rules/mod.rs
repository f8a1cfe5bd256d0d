//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board according to
//! tic-tac-toe rules. Rules are separated from board storage so the state
//! machine, the validator, and every bot tier evaluate positions the same way.

pub mod draw;
pub mod simulate;
pub mod win;

pub use draw::is_full;
pub use simulate::simulate_move;
pub use win::{LINES, check_winner, line_winner, winning_cells};
