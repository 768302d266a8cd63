//! Compass directions and rays across the board.

use crate::square::{SIZE, SQUARES, Square};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// One of the eight compass directions.
///
/// North is toward rank 0 (algebraic rank `1`), west toward file 0.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Up and left.
    NW,
    /// Up.
    N,
    /// Up and right.
    NE,
    /// Right.
    E,
    /// Down and right.
    SE,
    /// Down.
    S,
    /// Down and left.
    SW,
    /// Left.
    W,
}

impl Direction {
    /// All eight directions.
    pub const ALL: [Direction; 8] = [
        Direction::NW,
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
    ];

    /// `(rank, file)` delta of a single step.
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::NW => (-1, -1),
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
        }
    }

    /// The direction pointing the other way.
    pub const fn reverse(self) -> Self {
        match self {
            Direction::NW => Direction::SE,
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
        }
    }

    /// One step from `from`, or `None` at the edge of the board.
    pub fn step(self, from: Square) -> Option<Square> {
        NEIGHBORS[from.index()][self as usize]
    }
}

/// Neighbor of every square in every direction, fixed at compile time.
static NEIGHBORS: [[Option<Square>; 8]; SQUARES] = build_neighbors();

const fn build_neighbors() -> [[Option<Square>; 8]; SQUARES] {
    let mut table = [[None; 8]; SQUARES];
    let mut index = 0;
    while index < SQUARES {
        let rank = (index / SIZE) as i8;
        let file = (index % SIZE) as i8;
        let mut d = 0;
        while d < Direction::ALL.len() {
            let (dr, df) = Direction::ALL[d].offset();
            let (r, f) = (rank + dr, file + df);
            if r >= 0 && r < SIZE as i8 && f >= 0 && f < SIZE as i8 {
                table[index][d] = Square::new(r as usize, f as usize);
            }
            d += 1;
        }
        index += 1;
    }
    table
}

/// Cursor walking the board in one direction.
///
/// Yields the squares after the start, one step at a time, and ends the
/// moment a step would leave the board. It never wraps.
#[derive(Debug, Clone)]
pub struct Ray {
    current: Square,
    direction: Direction,
}

impl Ray {
    /// Starts a ray at `start` (which is not yielded).
    pub fn new(start: Square, direction: Direction) -> Self {
        Self {
            current: start,
            direction,
        }
    }

    /// Whether another square lies ahead.
    pub fn has_next(&self) -> bool {
        self.direction.step(self.current).is_some()
    }
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = self.direction.step(self.current)?;
        self.current = next;
        Some(next)
    }
}

impl FusedIterator for Ray {}
