//! Final result of a game.

use crate::Color;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Who won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// Black has more discs.
    Black,
    /// White has more discs.
    White,
    /// Equal disc counts.
    Tie,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Winner::Black,
            Color::White => Winner::White,
        }
    }
}

/// Outcome of a game, derived from the final disc counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Winning color, or a tie.
    winner: Winner,
    /// Disc count of the winner (either count on a tie).
    winner_score: u32,
    /// Disc count of the loser (either count on a tie).
    loser_score: u32,
}

impl Outcome {
    /// Compares disc counts: strictly more discs wins, equal counts tie.
    pub fn who_won(black_score: u32, white_score: u32) -> Self {
        let (winner, winner_score, loser_score) = match black_score.cmp(&white_score) {
            Ordering::Greater => (Winner::from(Color::Black), black_score, white_score),
            Ordering::Less => (Winner::from(Color::White), white_score, black_score),
            Ordering::Equal => (Winner::Tie, white_score, black_score),
        };

        Self {
            winner,
            winner_score,
            loser_score,
        }
    }

    /// Returns the winner.
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Disc count of the winner.
    pub fn winner_score(&self) -> u32 {
        self.winner_score
    }

    /// Disc count of the loser.
    pub fn loser_score(&self) -> u32 {
        self.loser_score
    }

    /// Returns the winning color, if the game was not tied.
    pub fn winning_color(&self) -> Option<Color> {
        match self.winner {
            Winner::Black => Some(Color::Black),
            Winner::White => Some(Color::White),
            Winner::Tie => None,
        }
    }

    /// Returns true if the game was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self.winner, Winner::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Winner::Tie => write!(f, "It's a tie! ({}-{})", self.winner_score, self.loser_score),
            winner => write!(
                f,
                "{} wins! ({}-{})",
                winner, self.winner_score, self.loser_score
            ),
        }
    }
}
