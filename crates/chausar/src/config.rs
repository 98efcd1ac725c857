//! Game configuration.

use crate::dice::{DiceSource, RandomDice};
use crate::error::{ConfigError, SetupError};
use crate::session::{self, GameSession};
use crate::types::{MAX_PLAYERS, MIN_PLAYERS};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for starting a game.
///
/// ```toml
/// player_count = 3
/// names = ["Ravi", "Asha", "Bela"]
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats at the table (2-4).
    #[serde(default = "default_player_count")]
    player_count: usize,

    /// Player names in seat order. Missing names become `Player N`.
    #[serde(default)]
    names: Vec<String>,

    /// Seed for reproducible dice. Entropy-seeded when absent.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_player_count() -> usize {
    4
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: default_player_count(),
            names: Vec::new(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Creates a config for `player_count` seats with the given names.
    #[instrument(skip(names))]
    pub fn new(player_count: usize, names: Vec<String>) -> Self {
        Self {
            player_count,
            names,
            seed: None,
        }
    }

    /// Returns the config with a fixed dice seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(player_count = config.player_count, "Config loaded successfully");
        Ok(config)
    }

    /// Loads a config file and checks it describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or the
    /// seat count or names are invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid config TOML.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Returns one name per seat, filling gaps with `Player N`.
    pub fn resolved_names(&self) -> Vec<String> {
        (0..self.player_count)
            .map(|seat| {
                self.names
                    .get(seat)
                    .cloned()
                    .unwrap_or_else(|| format!("Player {}", seat + 1))
            })
            .collect()
    }

    /// Checks the seat count and names.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the count is out of range, more names than
    /// seats were given, or a name is blank.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(SetupError::PlayerCount(self.player_count));
        }
        if self.names.len() > self.player_count {
            return Err(SetupError::NameCount {
                expected: self.player_count,
                got: self.names.len(),
            });
        }
        session::validate_setup(self.player_count, &self.resolved_names())
    }

    /// Builds a session with the configured dice.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the config does not validate.
    #[instrument(skip(self))]
    pub fn into_session(self) -> Result<GameSession, SetupError> {
        match self.seed {
            Some(seed) => self.into_session_with(RandomDice::seeded(seed)),
            None => self.into_session_with(RandomDice::from_entropy()),
        }
    }

    /// Builds a session with caller-supplied dice.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the config does not validate.
    pub fn into_session_with(self, dice: impl DiceSource + 'static) -> Result<GameSession, SetupError> {
        self.validate()?;
        GameSession::new_game(self.player_count, &self.resolved_names(), dice)
    }
}
