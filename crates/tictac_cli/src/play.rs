//! Interactive play on the terminal.

use crate::config::AppConfig;
use anyhow::{Context, Result, anyhow};
use rand::RngCore;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use tictac_engine::{
    GameError, GameEvent, GameOrchestrator, GameState, MemoryStore, MoveCommand, MoveError, Outcome,
    Player, Position,
};
use tracing::{info, instrument, warn};

/// Seats for a game, chosen by name from the configured players.
#[derive(Debug, Clone)]
pub struct Seating {
    /// Moves first (X).
    pub player_one: Player,
    /// Moves second (O).
    pub player_two: Player,
}

impl Seating {
    /// Picks players by name, falling back to the first two configured players.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or when fewer than two players
    /// are configured and no name is given.
    pub fn choose(
        players: &[Player],
        player_one: Option<&str>,
        player_two: Option<&str>,
    ) -> Result<Self> {
        let pick = |name: Option<&str>, fallback: usize| -> Result<Player> {
            match name {
                Some(name) => players
                    .iter()
                    .find(|p| p.name() == name)
                    .cloned()
                    .ok_or_else(|| anyhow!("No configured player named '{}'", name)),
                None => players
                    .get(fallback)
                    .cloned()
                    .ok_or_else(|| anyhow!("At least two players must be configured")),
            }
        };
        Ok(Self {
            player_one: pick(player_one, 0)?,
            player_two: pick(player_two, 1)?,
        })
    }

    fn name_of(&self, game: &GameState, player_id: tictac_engine::PlayerId) -> &str {
        if player_id == game.player_one_id() {
            self.player_one.name()
        } else {
            self.player_two.name()
        }
    }
}

/// Plays one game, reading human moves from `input` and writing to `output`.
///
/// Bot moves are announced as they are committed. End of input quits the
/// game early without error.
///
/// # Errors
///
/// Returns an error on I/O failure, bot faults, or invalid configuration.
#[instrument(skip_all)]
pub fn run<R, I, W>(
    config: &AppConfig,
    player_one: Option<&str>,
    player_two: Option<&str>,
    rng: R,
    mut input: I,
    mut output: W,
) -> Result<GameState>
where
    R: RngCore,
    I: BufRead,
    W: Write,
{
    let mut store = MemoryStore::new();
    let players = config.register_players(&mut store)?;
    let seating = Seating::choose(&players, player_one, player_two)?;
    info!(
        player_one = %seating.player_one.name(),
        player_two = %seating.player_two.name(),
        "Starting game"
    );

    let (tx, rx) = mpsc::channel();
    let mut orchestrator = GameOrchestrator::new(store, rng).with_events(tx);
    writeln!(
        output,
        "{} (X) vs {} (O)",
        seating.player_one.name(),
        seating.player_two.name()
    )?;

    let mut game = orchestrator.create_game(*seating.player_one.id(), *seating.player_two.id())?;
    announce(&rx, &seating, &game, &mut output)?;

    while let Some(player_id) = game.next_move_player_id() {
        writeln!(output, "\n{}\n", game.board().render())?;
        write!(
            output,
            "{}, your move (1-9 or a name like 'center'): ",
            seating.name_of(&game, player_id)
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read move")? == 0 {
            writeln!(output, "\nGoodbye.")?;
            return Ok(game);
        }

        let position: Position = match line.parse() {
            Ok(position) => position,
            Err(err) => {
                writeln!(output, "{}", err)?;
                continue;
            }
        };
        let command = MoveCommand::new(game.next_move_sequence(), player_id, position.number());
        match orchestrator.make_move(game.id(), command) {
            Ok(next) => game = next,
            Err(GameError::Move(err)) if !matches!(err, MoveError::InvariantViolation(_)) => {
                warn!(error = %err, "Move rejected");
                writeln!(output, "{}", err)?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }
        announce(&rx, &seating, &game, &mut output)?;
    }

    writeln!(output, "\n{}\n", game.board().render())?;
    match game.winner() {
        Some(Outcome::Winner(_)) => {
            let winner = game
                .winning_player_id()
                .map(|id| seating.name_of(&game, id))
                .unwrap_or_default();
            writeln!(output, "{} wins!", winner)?;
        }
        Some(Outcome::Tie) => writeln!(output, "It's a tie.")?,
        None => {}
    }
    Ok(game)
}

/// Prints moves committed since the last call.
fn announce<W: Write>(
    rx: &Receiver<GameEvent>,
    seating: &Seating,
    game: &GameState,
    output: &mut W,
) -> Result<()> {
    for event in rx.try_iter() {
        if let GameEvent::MoveApplied(mv) = event {
            writeln!(
                output,
                "{} played {}",
                seating.name_of(game, mv.player_id),
                mv.position
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn human_vs_human() -> AppConfig {
        AppConfig::from_toml(
            r#"
[[players]]
name = "Ada"
kind = "human"

[[players]]
name = "Grace"
kind = "human"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_human_game_to_a_win() {
        let input = Cursor::new("1\n4\n2\n5\n3\n");
        let mut output = Vec::new();
        let game = run(
            &human_vs_human(),
            None,
            None,
            StdRng::seed_from_u64(1),
            input,
            &mut output,
        )
        .unwrap();

        assert!(game.is_finished());
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Ada wins!"));
        assert!(text.contains("Grace played 5 (Center)"));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let input = Cursor::new("zero\n5\n5\n");
        let mut output = Vec::new();
        let game = run(
            &human_vs_human(),
            None,
            None,
            StdRng::seed_from_u64(1),
            input,
            &mut output,
        )
        .unwrap();

        // "zero" is unparseable and the second 5 is occupied; input then ends.
        assert_eq!(game.moves().len(), 1);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("already occupied"));
        assert!(text.contains("Goodbye."));
    }

    #[test]
    fn test_bot_replies_against_default_config() {
        let input = Cursor::new("center\n");
        let mut output = Vec::new();
        let game = run(
            &AppConfig::default(),
            None,
            None,
            StdRng::seed_from_u64(5),
            input,
            &mut output,
        )
        .unwrap();

        assert_eq!(game.moves().len(), 2);
        assert!(game.moves()[1].position.is_corner());
        assert!(String::from_utf8(output).unwrap().contains("Expert Bot played"));
    }

    #[test]
    fn test_unknown_seat_name() {
        let result = run(
            &human_vs_human(),
            Some("Linus"),
            None,
            StdRng::seed_from_u64(1),
            Cursor::new(""),
            Vec::new(),
        );
        assert!(result.is_err());
    }
}
