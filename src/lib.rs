//! Strictly Othello application library
//!
//! Everything the `othello` binary needs beyond the pure game logic in
//! `strictly_othello`: TOML match configuration, the terminal player and
//! the wiring that turns configuration into a [`Match`](strictly_othello::Match).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod setup;
mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, MatchConfig, PlayerKind};

// Crate-level exports - Players and matches
pub use setup::{build_match, build_player, seed_for, strategy_for};
pub use terminal::TerminalPlayer;
