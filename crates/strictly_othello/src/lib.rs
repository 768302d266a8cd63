//! Strictly Othello - type-safe Othello/Reversi game logic
//!
//! Pure game logic with no I/O: the board state machine, move contracts,
//! the turn state machine with the pass rule, computer strategies and an
//! orchestrator that drives a match between two players.
//!
//! # Architecture
//!
//! - **Board**: 8×8 cells plus incrementally maintained occupied and
//!   potential-move sets; legality and the flip algorithm
//! - **Game**: whose turn it is, history, pass rule and final outcome
//! - **Contracts**: move preconditions and postconditions
//! - **Players**: the [`Player`] capability, scripted players and the
//!   [`Strategy`]-driven [`ComputerPlayer`]
//! - **Heuristics**: one-ply board evaluation
//!
//! # Example
//!
//! ```
//! use strictly_othello::{ComputerPlayer, Color, Match, Strategy};
//!
//! let black = ComputerPlayer::seeded(Color::Black, Strategy::Greedy, 1);
//! let white = ComputerPlayer::seeded(Color::White, Strategy::Mobility, 2);
//! let outcome = Match::new(Box::new(black), Box::new(white)).play().unwrap();
//! println!("{}", outcome);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod color;
mod contracts;
mod direction;
mod game;
mod invariants;
mod orchestrator;
mod outcome;
mod player;
mod scripted;
mod square;
mod strategies;

pub mod heuristics;

// Crate-level exports - Board primitives
pub use board::{Board, BoardParseError};
pub use color::Color;
pub use direction::{Direction, Ray};
pub use square::{SIZE, SQUARES, Square, SquareParseError};

// Crate-level exports - Moves and game state
pub use action::{Move, MoveError};
pub use game::{GameStatus, Othello, Transition};
pub use outcome::{Outcome, Winner};

// Crate-level exports - Contracts and invariants
pub use contracts::{Contract, GameInProgress, LegalMove, LegalSquare, MoveContract, PlayersTurn};
pub use invariants::{
    BoardInvariants, DisjointSets, Invariant, InvariantSet, InvariantViolation,
    OccupiedMatchesDiscs, PotentialMovesExact,
};

// Crate-level exports - Players and orchestration
pub use heuristics::{Heuristic, Optimize, best_next_square};
pub use orchestrator::{DEFAULT_ILLEGAL_MOVE_LIMIT, GameEvent, Match, PlyError, RetryPolicy};
pub use player::{Player, PlayerError, legal_moves_or_err};
pub use scripted::{MoveScript, ScriptedPlayer};
pub use strategies::{ComputerPlayer, Strategy};
