//! Square coordinates and algebraic notation.

use crate::direction::{Direction, Ray};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side length of the board.
pub const SIZE: usize = 8;

/// Number of squares on the board.
pub const SQUARES: usize = SIZE * SIZE;

/// A square on the board, identified by rank and file.
///
/// Rank 0 is the top row (algebraic rank `1`), file 0 is the left column
/// (algebraic file `a`). A square is a plain coordinate: the disc on it,
/// if any, lives in the [`Board`](crate::Board), so a square keeps its
/// identity across every mutation of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Creates a square, or `None` if either coordinate is off the board.
    pub const fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < SIZE && file < SIZE {
            Some(Self {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Creates a square from its arena index (`rank * 8 + file`).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 64`.
    pub const fn from_index(index: usize) -> Self {
        assert!(index < SQUARES, "square index out of range");
        Self {
            rank: (index / SIZE) as u8,
            file: (index % SIZE) as u8,
        }
    }

    /// Row, 0 at the top.
    pub const fn rank(self) -> usize {
        self.rank as usize
    }

    /// Column, 0 at the left.
    pub const fn file(self) -> usize {
        self.file as usize
    }

    /// Arena index, `rank * 8 + file`.
    pub const fn index(self) -> usize {
        self.rank as usize * SIZE + self.file as usize
    }

    /// All 64 squares in rank-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARES).map(Square::from_index)
    }

    /// Whether the square is one of the four corners.
    pub fn is_corner(self) -> bool {
        let edge = |c: u8| c == 0 || c as usize == SIZE - 1;
        edge(self.rank) && edge(self.file)
    }

    /// The adjacent square in `direction`, if it is on the board.
    pub fn neighbor(self, direction: Direction) -> Option<Square> {
        direction.step(self)
    }

    /// The on-board neighbors of this square (3, 5 or 8 of them).
    pub fn neighbors(self) -> impl Iterator<Item = Square> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| direction.step(self))
    }

    /// Walks away from this square in `direction`, excluding the square itself.
    pub fn ray(self, direction: Direction) -> Ray {
        Ray::new(self, direction)
    }

    /// Algebraic notation, e.g. `d4`.
    pub fn algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }

    /// Parses algebraic notation (`a1`..`h8`, case-insensitive).
    pub fn from_algebraic(notation: &str) -> Result<Self, SquareParseError> {
        let invalid = || SquareParseError::new(notation);
        let trimmed = notation.trim();
        let mut chars = trimmed.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }

        Square::new(rank as usize - '1' as usize, file as usize - 'a' as usize).ok_or_else(invalid)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algebraic())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

/// Input that is not a square in algebraic notation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{input:?} is invalid algebraic notation")]
pub struct SquareParseError {
    /// The rejected input.
    pub input: String,
}

impl SquareParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}
