//! Match configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_othello::{Color, DEFAULT_ILLEGAL_MOVE_LIMIT, RetryPolicy};
use tracing::{debug, info, instrument};

/// Who sits on one side of the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PlayerKind {
    /// Moves typed at the terminal.
    Human,
    /// Uniformly random legal moves.
    Random,
    /// Flips the most discs.
    Greedy,
    /// Weighted squares.
    Positional,
    /// Starves the opponent of moves.
    Mobility,
    /// Maximizes stable discs.
    StableDiscs,
    /// Keeps its own disc count low.
    Evaporation,
    /// Keeps its own frontier small.
    FrontierEvaporation,
}

impl PlayerKind {
    /// Whether this kind needs a person at the keyboard.
    pub fn is_human(self) -> bool {
        self == PlayerKind::Human
    }
}

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Black player.
    #[serde(default = "default_black")]
    black: PlayerKind,

    /// White player.
    #[serde(default = "default_white")]
    white: PlayerKind,

    /// Consecutive illegal squares allowed per ply; `None` is unlimited.
    #[serde(default)]
    illegal_move_limit: Option<u32>,

    /// Seed for random choices; `None` seeds from the operating system.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_black() -> PlayerKind {
    PlayerKind::Human
}

#[instrument]
fn default_white() -> PlayerKind {
    PlayerKind::Positional
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            black: default_black(),
            white: default_white(),
            illegal_move_limit: Some(DEFAULT_ILLEGAL_MOVE_LIMIT),
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Creates a configuration for the given players with default limits.
    pub fn new(black: PlayerKind, white: PlayerKind) -> Self {
        Self {
            black,
            white,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(black = %config.black, white = %config.white, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Player kind seated at `color`.
    pub fn kind(&self, color: Color) -> PlayerKind {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Whether a person plays `color`.
    pub fn seats_human(&self, color: Color) -> bool {
        self.kind(color).is_human()
    }

    /// Retry policy for the orchestrator.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_limit(self.illegal_move_limit)
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
