//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tictac_engine::{Difficulty, MemoryStore, Player, PlayerKind};
use tracing::{debug, info, instrument};

/// Top-level configuration.
///
/// ```toml
/// seed = 42
/// log_filter = "info,tictac_engine=debug"
///
/// [[players]]
/// name = "Ada"
/// kind = "human"
///
/// [[players]]
/// name = "Expert Bot"
/// kind = "computer"
/// difficulty = "expert"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fixed RNG seed for reproducible bot play.
    #[serde(default)]
    seed: Option<u64>,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Players available to `play`, in seating order.
    #[serde(default = "default_players")]
    players: Vec<PlayerConfig>,
}

/// Whether a configured player is driven from the terminal or by a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    /// Moves typed on stdin.
    #[display("human")]
    Human,
    /// Moves chosen by a bot.
    #[display("computer")]
    Computer,
}

/// One `[[players]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name, unique within the file.
    name: String,
    /// Human or computer.
    kind: SeatKind,
    /// Bot tier for computer players, parsed case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<String>,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_players() -> Vec<PlayerConfig> {
    vec![
        PlayerConfig::human("Player"),
        PlayerConfig::computer("Expert Bot", Difficulty::Expert),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_filter: default_log_filter(),
            players: default_players(),
        }
    }
}

impl PlayerConfig {
    /// A human player entry.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Human,
            difficulty: None,
        }
    }

    /// A computer player entry.
    pub fn computer(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Computer,
            difficulty: Some(difficulty.to_string()),
        }
    }

    /// Engine-side kind of this player.
    ///
    /// A computer without a difficulty plays at [`Difficulty::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the difficulty is not a known tier.
    pub fn player_kind(&self) -> Result<PlayerKind, ConfigError> {
        match (self.kind, &self.difficulty) {
            (SeatKind::Human, _) => Ok(PlayerKind::Human),
            (SeatKind::Computer, None) => Ok(PlayerKind::Computer(Difficulty::default())),
            (SeatKind::Computer, Some(text)) => text
                .parse::<Difficulty>()
                .map(PlayerKind::Computer)
                .map_err(|_| {
                    ConfigError::new(format!(
                        "Unknown difficulty '{}' for player '{}'",
                        text, self.name
                    ))
                }),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse, or
    /// names an unknown difficulty or the same player twice.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(players = config.players.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Like [`AppConfig::from_file`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// As [`AppConfig::from_file`] when the file exists.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on invalid TOML or invalid player entries.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.name.as_str()) {
                return Err(ConfigError::new(format!(
                    "Player '{}' is configured more than once",
                    player.name
                )));
            }
            player.player_kind()?;
        }
        Ok(())
    }

    /// Registers every configured player in `store`, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an entry has an unknown difficulty.
    #[instrument(skip(self, store))]
    pub fn register_players(&self, store: &mut MemoryStore) -> Result<Vec<Player>, ConfigError> {
        self.players
            .iter()
            .map(|entry| -> Result<Player, ConfigError> {
                Ok(store.add_player(&entry.name, entry.player_kind()?))
            })
            .collect()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
