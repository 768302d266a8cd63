//! First-class move type and move errors.
//!
//! A move is the intent to put a disc of some color on some square. It can
//! be checked against a game before anything is applied.

use crate::{Color, Square};
use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A disc of `color` placed on `square`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Color of the disc being placed.
    pub color: Color,
    /// Where the disc goes.
    pub square: Square,
}

impl Move {
    /// Returns the color making this move.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the target square.
    pub fn square(&self) -> Square {
        self.square
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.color, self.square)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The square is occupied or the disc would not bracket any opponent disc.
    #[display("{square} is not a legal move for {color}")]
    IllegalMove {
        /// The rejected square.
        square: Square,
        /// The color that tried to move there.
        color: Color,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this color's turn.
    #[display("It's not {_0}'s turn")]
    WrongPlayer(Color),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
