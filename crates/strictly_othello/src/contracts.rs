//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} move {Q}. The orchestrator checks `pre` before it applies anything so
//! that a rejected move leaves the game untouched.

use crate::action::{Move, MoveError};
use crate::game::Othello;
use crate::invariants::{BoardInvariants, InvariantSet};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the game has not ended.
pub struct GameInProgress;

impl GameInProgress {
    /// Fails with [`MoveError::GameOver`] once neither color can move.
    #[instrument(skip(game))]
    pub fn check(game: &Othello) -> Result<(), MoveError> {
        if game.is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayer`] if another color is on turn.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &Othello) -> Result<(), MoveError> {
        if game.to_move() != Some(mov.color) {
            Err(MoveError::WrongPlayer(mov.color))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the square is empty, touches a disc and brackets a run.
pub struct LegalSquare;

impl LegalSquare {
    /// Fails with [`MoveError::IllegalMove`] if the board rejects the square.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &Othello) -> Result<(), MoveError> {
        if game.board().is_legal_move(mov.square, mov.color) {
            Ok(())
        } else {
            Err(MoveError::IllegalMove {
                square: mov.square,
                color: mov.color,
            })
        }
    }
}

/// Composite precondition for a move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions in order: game running, turn, square.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &Othello) -> Result<(), MoveError> {
        GameInProgress::check(game)?;
        PlayersTurn::check(mov, game)?;
        LegalSquare::check(mov, game)?;
        Ok(())
    }
}

/// Contract for move actions.
///
/// Preconditions:
/// - The game is still running
/// - The mover is on turn
/// - The square is a legal move for the mover
///
/// Postconditions:
/// - Board invariants hold
/// - Exactly one more square is occupied
/// - History grew by exactly one move
pub struct MoveContract;

impl Contract<Othello, Move> for MoveContract {
    fn pre(game: &Othello, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &Othello, after: &Othello) -> Result<(), MoveError> {
        BoardInvariants::check_all(after.board()).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let placed = after.board().occupied().len();
        let expected = before.board().occupied().len() + 1;
        if placed != expected {
            warn!(placed, expected, "Disc count did not grow by one");
            return Err(MoveError::InvariantViolation(format!(
                "Expected {} occupied squares, found {}",
                expected, placed
            )));
        }

        if after.history().len() != before.history().len() + 1 {
            return Err(MoveError::InvariantViolation(
                "History must grow by exactly one move".to_string(),
            ));
        }

        Ok(())
    }
}
