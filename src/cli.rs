//! Command-line interface for the othello binary.

use clap::{Parser, Subcommand};
use strictly_othello_app::PlayerKind;

/// Strictly Othello - Othello/Reversi in the terminal
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(about = "Play Othello against people or computer strategies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game, printing the board after every move
    Play {
        /// Path to a TOML match configuration
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Black player (overrides the config file)
        #[arg(long, value_enum)]
        black: Option<PlayerKind>,

        /// White player (overrides the config file)
        #[arg(long, value_enum)]
        white: Option<PlayerKind>,

        /// Seed for computer players (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the result as JSON instead of boards
        #[arg(long)]
        json: bool,
    },

    /// Play several computer-vs-computer games and tally the results
    Series {
        /// Black player
        #[arg(long, value_enum)]
        black: PlayerKind,

        /// White player
        #[arg(long, value_enum)]
        white: PlayerKind,

        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Seed for the first game; later games use consecutive seeds
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Replay a recorded game such as "d3c5f6f5"
    Replay {
        /// Squares in play order, concatenated
        moves: String,
    },

    /// Show the starting position and black's legal moves
    Board,
}
