//! Turn state machine for a single game.

use crate::action::{Move, MoveError};
use crate::contracts::{Contract, MoveContract};
use crate::outcome::Outcome;
use crate::{Board, Color, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Whose turn it is, or that the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// `Color` is to move.
    Playing(Color),
    /// Neither color can move.
    GameOver,
}

impl GameStatus {
    /// Returns the color to move, if the game is still going.
    pub fn to_move(&self) -> Option<Color> {
        match self {
            GameStatus::Playing(color) => Some(*color),
            GameStatus::GameOver => None,
        }
    }
}

/// Result of applying a move: what flipped and what comes next.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Transition {
    /// The move that was applied.
    mov: Move,
    /// Discs flipped by the move.
    flipped: Vec<Square>,
    /// Status after the move.
    status: GameStatus,
}

impl Transition {
    /// Whether the mover keeps the turn because the opponent must pass.
    pub fn is_pass(&self) -> bool {
        self.status == GameStatus::Playing(self.mov.color)
    }
}

/// An Othello game: the board, whose turn it is and the moves so far.
#[derive(Debug, Clone)]
pub struct Othello {
    board: Board,
    status: GameStatus,
    history: Vec<Move>,
}

impl Othello {
    /// Creates a new game; black moves first.
    #[instrument]
    pub fn new() -> Self {
        Self::from_board(Board::init(), Color::Black)
    }

    /// Resumes play on an arbitrary position with `to_move` on turn.
    ///
    /// The pass rule applies immediately: if `to_move` has no legal move the
    /// opponent is on turn, and if neither has one the game is already over.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let status = next_status(&board, to_move.opposite());
        Self {
            board,
            status,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the color to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Color> {
        self.status.to_move()
    }

    /// Whether the game is over.
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Moves applied so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of plies played so far.
    pub fn turns_played(&self) -> usize {
        self.history.len()
    }

    /// Number of the ply about to be played, starting at 1.
    pub fn turn_number(&self) -> usize {
        self.history.len() + 1
    }

    /// Legal moves for the color on turn (empty once the game is over).
    pub fn legal_moves(&self) -> Vec<Square> {
        self.to_move()
            .map(|color| self.board.legal_moves_for(color))
            .unwrap_or_default()
    }

    /// Plays `square` for the color on turn.
    pub fn play(&mut self, square: Square) -> Result<Transition, MoveError> {
        let color = self.to_move().ok_or(MoveError::GameOver)?;
        self.make_move(Move::new(color, square))
    }

    /// Applies a move after checking its preconditions.
    ///
    /// # Errors
    ///
    /// - `MoveError::GameOver` if the game has ended.
    /// - `MoveError::WrongPlayer` if it is not the mover's turn.
    /// - `MoveError::IllegalMove` if the square is not a legal move.
    ///
    /// Nothing changes when an error is returned.
    #[instrument(skip(self), fields(mov = %mov))]
    pub fn make_move(&mut self, mov: Move) -> Result<Transition, MoveError> {
        MoveContract::pre(self, &mov)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let flipped = self.board.set_piece(mov.square, mov.color)?;
        self.history.push(mov);
        self.status = next_status(&self.board, mov.color);

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        match self.status {
            GameStatus::Playing(next) if next == mov.color => {
                info!(passing = %next.opposite(), "No legal move, turn passes");
            }
            GameStatus::GameOver => {
                info!(outcome = %self.outcome(), "Game over");
            }
            GameStatus::Playing(_) => {
                debug!(flipped = flipped.len(), "Move applied");
            }
        }

        Ok(Transition {
            mov,
            flipped,
            status: self.status,
        })
    }

    /// Tallies the discs on the board into an outcome.
    ///
    /// Final once [`is_over`](Self::is_over) returns true.
    pub fn outcome(&self) -> Outcome {
        let black = self.board.count(Color::Black) as u32;
        let white = self.board.count(Color::White) as u32;
        if !self.is_over() {
            warn!(black, white, "Outcome requested before game over");
        }
        Outcome::who_won(black, white)
    }
}

impl Default for Othello {
    fn default() -> Self {
        Self::new()
    }
}

/// Status after `moved` has played: the opponent if it can move, otherwise
/// `moved` again, otherwise game over.
fn next_status(board: &Board, moved: Color) -> GameStatus {
    let next = moved.opposite();
    if board.has_move_for(next) {
        GameStatus::Playing(next)
    } else if board.has_move_for(moved) {
        GameStatus::Playing(moved)
    } else {
        GameStatus::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Winner;

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    fn fixture(rows: &[&str; 8]) -> Board {
        Board::from_fixture(&rows.join("/")).unwrap()
    }

    #[test]
    fn test_new_game_black_to_move() {
        let game = Othello::new();
        assert_eq!(game.status(), GameStatus::Playing(Color::Black));
        assert_eq!(game.turn_number(), 1);
        assert_eq!(game.legal_moves().len(), 4);
    }

    #[test]
    fn test_legal_move_passes_turn() {
        let mut game = Othello::new();

        let transition = game.play(sq("c4")).unwrap();

        assert_eq!(transition.flipped(), &vec![sq("d4")]);
        assert_eq!(transition.status(), &GameStatus::Playing(Color::White));
        assert!(!transition.is_pass());
        assert_eq!(game.turns_played(), 1);
        assert_eq!(
            game.board(),
            &fixture(&[
                "        ",
                "        ",
                "        ",
                "  bbb   ",
                "   bw   ",
                "        ",
                "        ",
                "        ",
            ])
        );
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut game = Othello::new();

        let result = game.play(sq("a1"));

        assert!(matches!(result, Err(MoveError::IllegalMove { .. })));
        assert_eq!(game.board(), &Board::init());
        assert_eq!(game.turns_played(), 0);
        assert_eq!(game.to_move(), Some(Color::Black));
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut game = Othello::new();
        let result = game.make_move(Move::new(Color::White, sq("e3")));
        assert_eq!(result, Err(MoveError::WrongPlayer(Color::White)));
    }

    #[test]
    fn test_other_player_has_legal_move() {
        let board = fixture(&[
            "        ",
            "        ",
            "   ww   ",
            "  bbwb  ",
            "  wbbw  ",
            "    bbw ",
            "     w  ",
            "        ",
        ]);
        let mut game = Othello::from_board(board, Color::White);

        let transition = game.play(sq("d6")).unwrap();

        assert_eq!(transition.status(), &GameStatus::Playing(Color::Black));
    }

    #[test]
    fn test_other_player_has_no_legal_move() {
        let board = fixture(&[
            "        ",
            "        ",
            " wwwwwwb",
            "wwwwwwbb",
            "bwwwbbbb",
            "bbwbbbbb",
            "bbbbbbbb",
            "bbbbbbbb",
        ]);
        let mut game = Othello::from_board(board, Color::Black);

        let transition = game.play(sq("h2")).unwrap();

        assert!(transition.is_pass());
        assert_eq!(game.to_move(), Some(Color::Black));
    }

    #[test]
    fn test_neither_player_has_legal_move() {
        let board = fixture(&[
            "wwwwwwww",
            "wwwwwwwb",
            "wbbbbbb ",
            "wwwwwwb ",
            "wwwwww  ",
            "wwwwww b",
            "wwwwwww ",
            "wwwwwwww",
        ]);
        let mut game = Othello::from_board(board, Color::White);

        let transition = game.play(sq("h3")).unwrap();

        assert_eq!(transition.status(), &GameStatus::GameOver);
        assert!(game.is_over());
        assert_eq!(game.play(sq("h4")), Err(MoveError::GameOver));
    }

    #[test]
    fn test_stuck_position_is_over_immediately() {
        let board = fixture(&[
            "wbwwwwww",
            "wbbbbwwb",
            "wbwbwwwb",
            "wbbwbbwb",
            "wbwwwbwb",
            "wbwwbbbb",
            "wbwwbbbb",
            "bbbbbbbb",
        ]);
        let game = Othello::from_board(board, Color::Black);

        assert!(game.is_over());
        assert!(game.legal_moves().is_empty());

        let outcome = game.outcome();
        assert_eq!(outcome.winner(), Winner::Black);
        assert_eq!(outcome.winner_score(), 35);
        assert_eq!(outcome.loser_score(), 29);
    }

    #[test]
    fn test_tie_outcome() {
        let board = fixture(&[
            "wwwwwwwb",
            "bbbwwwwb",
            "wbwwwbwb",
            "wbwwbbwb",
            "wbwbwwwb",
            "wwbbbwbb",
            "wwwbbbwb",
            "bbbbbbbb",
        ]);
        let game = Othello::from_board(board, Color::Black);

        let outcome = game.outcome();
        assert!(game.is_over());
        assert_eq!(outcome.winner(), Winner::Tie);
        assert_eq!(outcome.winner_score(), 32);
        assert_eq!(outcome.loser_score(), 32);
    }

    #[test]
    fn test_from_board_skips_color_without_moves() {
        let board = fixture(&[
            "        ",
            "        ",
            " wwwwwwb",
            "wwwwwwbb",
            "bwwwbbbb",
            "bbwbbbbb",
            "bbbbbbbb",
            "bbbbbbbb",
        ]);
        let game = Othello::from_board(board, Color::White);
        assert_eq!(game.to_move(), Some(Color::Black));
    }
}
