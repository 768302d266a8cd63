//! The player capability shared by humans and computer strategies.

use crate::action::MoveError;
use crate::game::Othello;
use crate::{Color, Square};
use derive_more::Display;

/// Error a player can return instead of a square.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PlayerError {
    /// Asked to move when the color has no legal move.
    #[display("{_0} has no legal move")]
    NoLegalMove(Color),

    /// The input source closed before a move was read.
    #[display("Input closed before a move was entered")]
    InputClosed,

    /// Reading input or writing a prompt failed.
    #[display("Player I/O failed: {_0}")]
    Io(String),
}

impl std::error::Error for PlayerError {}

impl From<std::io::Error> for PlayerError {
    fn from(error: std::io::Error) -> Self {
        PlayerError::Io(error.to_string())
    }
}

/// Something that picks squares for one color.
///
/// The match driver calls [`begin`](Player::begin) once per ply, then
/// [`get_move`](Player::get_move) until it returns a legal square,
/// [`fail`](Player::fail) after each rejected square and
/// [`done`](Player::done) once the move has been applied.
pub trait Player: Send {
    /// The color this player moves for.
    fn color(&self) -> Color;

    /// Display name.
    fn name(&self) -> &str;

    /// Chooses a square for [`color`](Player::color) in the current game.
    fn get_move(&mut self, game: &Othello) -> Result<Square, PlayerError>;

    /// Called when the player's turn begins.
    fn begin(&mut self, _game: &Othello) {}

    /// Called after the player's move has been applied.
    fn done(&mut self, _game: &Othello) {}

    /// Called when the square returned by `get_move` was rejected.
    fn fail(&mut self, _game: &Othello, _error: &MoveError) {}
}

/// Legal moves for `color`, or [`PlayerError::NoLegalMove`] if there are none.
pub fn legal_moves_or_err(game: &Othello, color: Color) -> Result<Vec<Square>, PlayerError> {
    let moves = game.board().legal_moves_for(color);
    if moves.is_empty() {
        Err(PlayerError::NoLegalMove(color))
    } else {
        Ok(moves)
    }
}
