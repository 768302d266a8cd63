//! Players that replay a recorded list of moves.

use crate::game::Othello;
use crate::player::{Player, PlayerError};
use crate::square::SquareParseError;
use crate::{Color, Square};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

/// A recorded sequence of squares, shared by both colors in play order.
///
/// Passes need no marker: whichever color is on turn takes the next square.
#[derive(Debug, Clone, Default)]
pub struct MoveScript {
    squares: Arc<Mutex<VecDeque<Square>>>,
}

impl MoveScript {
    /// Builds a script from squares in play order.
    pub fn new(squares: impl IntoIterator<Item = Square>) -> Self {
        Self {
            squares: Arc::new(Mutex::new(squares.into_iter().collect())),
        }
    }

    /// Parses concatenated algebraic squares such as `"d3c5f6"`.
    ///
    /// Whitespace and commas between squares are ignored.
    #[instrument]
    pub fn parse(moves: &str) -> Result<Self, SquareParseError> {
        let chars: Vec<char> = moves
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();

        let squares = chars
            .chunks(2)
            .map(|pair| Square::from_algebraic(&pair.iter().collect::<String>()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = squares.len(), "Parsed move script");
        Ok(Self::new(squares))
    }

    /// Squares not yet played.
    pub fn remaining(&self) -> usize {
        self.queue().len()
    }

    /// A player for `color` drawing from this script.
    pub fn player(&self, color: Color) -> ScriptedPlayer {
        ScriptedPlayer {
            name: format!("script ({})", color),
            color,
            script: self.clone(),
        }
    }

    fn next(&self) -> Option<Square> {
        self.queue().pop_front()
    }

    // A panic while holding the lock cannot leave the queue half-updated.
    fn queue(&self) -> MutexGuard<'_, VecDeque<Square>> {
        self.squares.lock().unwrap_or_else(|poisoned| {
            warn!("Move script lock was poisoned, continuing with the queue as is");
            poisoned.into_inner()
        })
    }
}

/// Plays the next square of a shared [`MoveScript`].
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    name: String,
    color: Color,
    script: MoveScript,
}

impl Player for ScriptedPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, _game: &Othello) -> Result<Square, PlayerError> {
        self.script.next().ok_or(PlayerError::InputClosed)
    }
}
