//! Tests for the bot tiers, including exhaustive Expert play.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;
use tictac_engine::{
    BotStrategy, Difficulty, ExpertBot, GameId, GameState, Mark, Outcome, PlayerId, Position,
};

fn game_after(positions: &[Position]) -> GameState {
    let mut game = GameState::create(GameId(1), PlayerId(1), PlayerId(2));
    for pos in positions {
        let mark = game.next_move_player().unwrap();
        let id = game.player_id_for(mark);
        game.apply_move(game.next_move_sequence(), mark, id, *pos)
            .unwrap();
    }
    game
}

/// Opponent model for exhaustive exploration.
#[derive(Clone, Copy)]
enum Opponent {
    /// Every open cell.
    Any,
    /// Every candidate of a tier.
    Tier(Difficulty),
}

impl Opponent {
    fn moves(self, game: &GameState) -> Vec<Position> {
        match self {
            Opponent::Any => game.valid_next_positions(),
            Opponent::Tier(difficulty) => difficulty.strategy().candidate_moves(game).unwrap(),
        }
    }
}

/// Walks every game reachable with Expert in `expert_seat`, returning the
/// move lists of any game Expert lost.
fn expert_losses(game: &GameState, expert_seat: Mark, opponent: Opponent) -> Vec<Vec<Position>> {
    if let Some(outcome) = game.winner() {
        return match outcome {
            Outcome::Winner(mark) if mark != expert_seat => {
                vec![game.moves().iter().map(|mv| mv.position).collect()]
            }
            _ => Vec::new(),
        };
    }

    let mark = game.next_move_player().unwrap();
    let choices = if mark == expert_seat {
        ExpertBot.candidate_moves(game).unwrap()
    } else {
        opponent.moves(game)
    };

    let mut losses = Vec::new();
    for position in choices {
        let mut next = game.clone();
        next.apply_move(
            next.next_move_sequence(),
            mark,
            next.player_id_for(mark),
            position,
        )
        .unwrap();
        losses.extend(expert_losses(&next, expert_seat, opponent));
    }
    losses
}

fn opponents() -> Vec<Opponent> {
    vec![
        Opponent::Any,
        Opponent::Tier(Difficulty::Medium),
        Opponent::Tier(Difficulty::Hard),
        Opponent::Tier(Difficulty::Expert),
    ]
}

#[test]
fn test_expert_never_loses_moving_first() {
    let start = game_after(&[]);
    for opponent in opponents() {
        let losses = expert_losses(&start, Mark::PlayerOne, opponent);
        assert!(losses.is_empty(), "Expert lost as player one: {:?}", losses);
    }
}

#[test]
fn test_expert_never_loses_moving_second() {
    let start = game_after(&[]);
    for opponent in opponents() {
        let losses = expert_losses(&start, Mark::PlayerTwo, opponent);
        assert!(losses.is_empty(), "Expert lost as player two: {:?}", losses);
    }
}

#[test]
fn test_expert_opens_in_a_corner() {
    let game = game_after(&[]);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let position = ExpertBot.calculate_next_move(&game, &mut rng).unwrap();
        assert!(position.is_corner(), "opened at {}", position);
    }
}

#[test]
fn test_every_tier_returns_open_positions() {
    let mut rng = StdRng::seed_from_u64(9);
    let game = game_after(&[Position::Center, Position::TopLeft, Position::BottomCenter]);
    for difficulty in Difficulty::iter() {
        let strategy = difficulty.strategy();
        for candidate in strategy.candidate_moves(&game).unwrap() {
            assert!(game.valid_next_positions().contains(&candidate));
        }
        let chosen = strategy.calculate_next_move(&game, &mut rng).unwrap();
        assert!(game.valid_next_positions().contains(&chosen));
    }
}

#[test]
fn test_tiers_take_wins_and_blocks() {
    // X X . / O O . / . . .  X to move: everyone but Easy completes the row.
    let game = game_after(&[
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::Center,
    ]);
    for difficulty in [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
        assert_eq!(
            difficulty.strategy().candidate_moves(&game).unwrap(),
            vec![Position::TopRight]
        );
    }

    // X X . / O . . / . . .  O to move: block.
    let game = game_after(&[Position::TopLeft, Position::MiddleLeft, Position::TopCenter]);
    for difficulty in [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
        assert_eq!(
            difficulty.strategy().candidate_moves(&game).unwrap(),
            vec![Position::TopRight]
        );
    }
}

#[test]
fn test_medium_prefers_center_and_hard_prefers_corners() {
    let game = game_after(&[]);
    assert_eq!(
        Difficulty::Medium.strategy().candidate_moves(&game).unwrap(),
        vec![Position::Center]
    );
    assert_eq!(
        Difficulty::Hard.strategy().candidate_moves(&game).unwrap(),
        Position::CORNERS.to_vec()
    );
    assert_eq!(
        Difficulty::Easy.strategy().candidate_moves(&game).unwrap(),
        Position::ALL.to_vec()
    );
}

fn pos(n: u8) -> Position {
    Position::try_from(n).expect("position 1-9")
}

fn game_after_numbers(numbers: &[u8]) -> GameState {
    let positions: Vec<Position> = numbers.iter().copied().map(pos).collect();
    game_after(&positions)
}

fn candidates(difficulty: Difficulty, game: &GameState) -> Vec<Position> {
    difficulty.strategy().candidate_moves(game).unwrap()
}

#[test]
fn test_medium_falls_back_to_any_cell_when_center_taken() {
    // X . . / . O . / . . .  X to move, nothing to win or block.
    let game = game_after_numbers(&[1, 5]);
    assert_eq!(
        candidates(Difficulty::Medium, &game),
        [2, 3, 4, 6, 7, 8, 9].into_iter().map(pos).collect::<Vec<_>>()
    );
    assert_eq!(
        candidates(Difficulty::Hard, &game),
        vec![Position::TopRight, Position::BottomLeft, Position::BottomRight]
    );
}

#[test]
fn test_hard_falls_back_to_center_when_corners_taken() {
    // X O X / . . . / O X O  X to move, every line blocked.
    let game = game_after_numbers(&[1, 2, 3, 7, 8, 9]);
    for difficulty in [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
        assert_eq!(candidates(difficulty, &game), vec![Position::Center]);
    }
}

#[test]
fn test_hard_falls_back_to_any_cell_when_corners_and_center_taken() {
    // X O X / . X . / O X O  O to move, no threats and no forks.
    let game = game_after_numbers(&[1, 2, 3, 7, 5, 9, 8]);
    for difficulty in Difficulty::iter() {
        assert_eq!(
            candidates(difficulty, &game),
            vec![Position::MiddleLeft, Position::MiddleRight]
        );
    }
}

#[test]
fn test_expert_falls_back_to_corners_after_center() {
    // X . . / . O X / . X O  O to move, out of book with no forks.
    let game = game_after_numbers(&[1, 5, 6, 9, 8]);
    assert_eq!(
        candidates(Difficulty::Expert, &game),
        vec![Position::TopRight, Position::BottomLeft]
    );
    assert_eq!(
        candidates(Difficulty::Medium, &game),
        [2, 3, 4, 7].into_iter().map(pos).collect::<Vec<_>>()
    );
}

#[test]
fn test_finished_game_has_no_moves() {
    let game = game_after(&[
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::Center,
        Position::TopRight,
    ]);
    let mut rng = StdRng::seed_from_u64(0);
    for difficulty in Difficulty::iter() {
        assert!(difficulty.strategy().calculate_next_move(&game, &mut rng).is_err());
    }
}
