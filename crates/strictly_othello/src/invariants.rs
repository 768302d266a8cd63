//! First-class board invariants.
//!
//! Invariants are logical properties that must hold after every mutation of
//! a board. They are checked in debug builds and tested independently.

use crate::Board;
use crate::square::Square;
use std::collections::BTreeSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn record<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        record::<S, A>(state, &mut violations);
        record::<S, B>(state, &mut violations);
        record::<S, C>(state, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: `occupied` lists exactly the squares holding a disc.
pub struct OccupiedMatchesDiscs;

impl Invariant<Board> for OccupiedMatchesDiscs {
    fn holds(board: &Board) -> bool {
        Square::all().all(|square| board.is_occupied(square) == board.occupied().contains(&square))
    }

    fn description() -> &'static str {
        "Occupied set lists exactly the squares holding a disc"
    }
}

/// Invariant: no square is both occupied and a potential move.
pub struct DisjointSets;

impl Invariant<Board> for DisjointSets {
    fn holds(board: &Board) -> bool {
        board.occupied().is_disjoint(board.potential_moves())
    }

    fn description() -> &'static str {
        "Occupied and potential-move sets are disjoint"
    }
}

/// Invariant: potential moves are exactly the empty squares next to a disc.
pub struct PotentialMovesExact;

impl Invariant<Board> for PotentialMovesExact {
    fn holds(board: &Board) -> bool {
        let expected: BTreeSet<Square> = Square::all()
            .filter(|&square| !board.is_occupied(square))
            .filter(|square| square.neighbors().any(|n| board.is_occupied(n)))
            .collect();
        &expected == board.potential_moves()
    }

    fn description() -> &'static str {
        "Potential moves are exactly the empty squares adjacent to a disc"
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (OccupiedMatchesDiscs, DisjointSets, PotentialMovesExact);
