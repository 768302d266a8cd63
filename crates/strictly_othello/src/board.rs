//! The board state machine.
//!
//! The board owns 64 cells plus two sets derived from them:
//!
//! - `occupied`: squares holding a disc;
//! - `potential_moves`: empty squares next to at least one disc.
//!
//! Both are kept up to date by [`Board::set_piece`] as discs are placed, so
//! legality searches only ever look at `potential_moves` instead of the whole
//! grid.

use crate::action::MoveError;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::square::{SIZE, SQUARES, Square, SquareParseError};
use crate::{Color, Direction};
use derive_more::Display;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use tracing::{instrument, trace, warn};

/// An 8×8 Othello board.
///
/// Cloning a board is a deep copy: the clone shares nothing with the
/// original. Equality and hashing look only at the disc on each square.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Option<Color>; SQUARES],
    occupied: BTreeSet<Square>,
    potential_moves: BTreeSet<Square>,
}

impl Board {
    fn empty() -> Self {
        Self {
            cells: [None; SQUARES],
            occupied: BTreeSet::new(),
            potential_moves: BTreeSet::new(),
        }
    }

    /// Creates the board for a new game: white on d4 and e5, black on e4 and d5.
    #[instrument]
    pub fn init() -> Self {
        let (n, s) = (SIZE / 2 - 1, SIZE / 2);
        let (w, e) = (SIZE / 2 - 1, SIZE / 2);
        let placements = [
            (n, w, Color::White),
            (n, e, Color::Black),
            (s, w, Color::Black),
            (s, e, Color::White),
        ];

        Self::from_placements(
            placements
                .into_iter()
                .filter_map(|(rank, file, color)| Square::new(rank, file).map(|sq| (sq, color))),
        )
    }

    /// Builds a board holding exactly the given discs.
    ///
    /// `occupied` and `potential_moves` are derived from the placements. A
    /// square listed twice keeps the last color given for it.
    pub fn from_placements(placements: impl IntoIterator<Item = (Square, Color)>) -> Self {
        let mut board = Self::empty();
        for (square, color) in placements {
            board.cells[square.index()] = Some(color);
            board.occupied.insert(square);
        }

        board.potential_moves = board
            .occupied
            .iter()
            .flat_map(|square| square.neighbors())
            .filter(|square| board.cells[square.index()].is_none())
            .collect();
        board
    }

    /// Builds a board from a fixture string.
    ///
    /// The fixture lists the 64 squares rank by rank, starting at a1, h1 is
    /// the eighth character. `b` and `w` (either case) are discs; a space,
    /// `.` or `-` is an empty square. `/` and line breaks between ranks are
    /// ignored, so `" wwwww  /  wwwbb /..."` and a single 64-character string
    /// describe the same board.
    pub fn from_fixture(fixture: &str) -> Result<Self, BoardParseError> {
        let symbols: Vec<char> = fixture
            .chars()
            .filter(|&c| !matches!(c, '/' | '\n' | '\r'))
            .collect();
        if symbols.len() != SQUARES {
            return Err(BoardParseError::WrongLength {
                actual: symbols.len(),
            });
        }

        let mut placements = Vec::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            match symbol {
                ' ' | '.' | '-' => {}
                other => {
                    let color = Color::from_symbol(other)
                        .ok_or(BoardParseError::UnknownSymbol { symbol: other, index })?;
                    placements.push((Square::from_index(index), color));
                }
            }
        }

        Ok(Self::from_placements(placements))
    }

    /// Renders the board as a fixture string, ranks separated by `/`.
    pub fn to_fixture(&self) -> String {
        let mut result = String::with_capacity(SQUARES + SIZE);
        for square in Square::all() {
            if square.file() == 0 && square.rank() > 0 {
                result.push('/');
            }
            result.push(self.color_at(square).map_or(' ', Color::symbol));
        }
        result
    }

    /// Returns the square at `(rank, file)`, or `None` off the board.
    pub fn square(&self, rank: usize, file: usize) -> Option<Square> {
        Square::new(rank, file)
    }

    /// Returns the square named in algebraic notation.
    pub fn square_at(&self, notation: &str) -> Result<Square, SquareParseError> {
        Square::from_algebraic(notation)
    }

    /// Color of the disc on `square`, if any.
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.cells[square.index()]
    }

    /// Whether `square` holds a disc.
    pub fn is_occupied(&self, square: Square) -> bool {
        self.cells[square.index()].is_some()
    }

    /// Squares holding a disc.
    pub fn occupied(&self) -> &BTreeSet<Square> {
        &self.occupied
    }

    /// Empty squares adjacent to at least one disc.
    pub fn potential_moves(&self) -> &BTreeSet<Square> {
        &self.potential_moves
    }

    /// Number of `color` discs on the board.
    pub fn count(&self, color: Color) -> usize {
        self.occupied
            .iter()
            .filter(|&&square| self.color_at(square) == Some(color))
            .count()
    }

    /// Whether every square holds a disc.
    pub fn is_full(&self) -> bool {
        self.occupied.len() == SQUARES
    }

    /// Whether `color` may place a disc on `square`.
    ///
    /// The square must be empty, and in at least one direction the
    /// neighboring disc must be the opponent's with an unbroken run of
    /// opponent discs ending at a `color` disc.
    #[instrument(level = "trace", skip(self))]
    pub fn is_legal_move(&self, square: Square, color: Color) -> bool {
        !self.is_occupied(square)
            && square.neighbors().any(|neighbor| self.is_occupied(neighbor))
            && Direction::ALL
                .into_iter()
                .any(|direction| self.bracketed(square, color, direction).is_some())
    }

    /// Length of the opponent run that a `color` disc on `square` would
    /// bracket in `direction`, or `None` if the direction flips nothing.
    fn bracketed(&self, square: Square, color: Color, direction: Direction) -> Option<usize> {
        let mut run = 0;
        for next in square.ray(direction) {
            match self.color_at(next) {
                None => return None,
                Some(c) if c == color => return (run > 0).then_some(run),
                Some(_) => run += 1,
            }
        }
        None
    }

    /// Discs that `color` playing on `square` would flip, without playing.
    ///
    /// Empty if the move is illegal.
    pub fn flips_for(&self, square: Square, color: Color) -> Vec<Square> {
        if self.is_occupied(square) {
            return Vec::new();
        }

        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                self.bracketed(square, color, direction)
                    .map(|run| square.ray(direction).take(run))
            })
            .flatten()
            .collect()
    }

    /// Puts a `color` disc on `square` and flips every bracketed run.
    ///
    /// Returns the flipped squares. An illegal move is rejected with
    /// [`MoveError::IllegalMove`] and leaves the board untouched.
    #[instrument(level = "debug", skip_all, fields(square = %square, color = %color))]
    pub fn set_piece(&mut self, square: Square, color: Color) -> Result<Vec<Square>, MoveError> {
        if !self.is_legal_move(square, color) {
            warn!("Rejected illegal placement");
            return Err(MoveError::IllegalMove { square, color });
        }

        let runs: Vec<(Direction, usize)> = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                self.bracketed(square, color, direction)
                    .map(|run| (direction, run))
            })
            .collect();

        self.cells[square.index()] = Some(color);

        let mut flipped = Vec::new();
        for (direction, run) in runs {
            for disc in square.ray(direction).take(run) {
                self.cells[disc.index()] = Some(color);
                flipped.push(disc);
            }
        }

        self.occupied.insert(square);
        self.potential_moves.remove(&square);
        for neighbor in square.neighbors() {
            if !self.is_occupied(neighbor) {
                self.potential_moves.insert(neighbor);
            }
        }

        trace!(flipped = flipped.len(), "Placed disc");
        debug_assert!(
            BoardInvariants::check_all(self).is_ok(),
            "Board invariants violated after set_piece"
        );
        Ok(flipped)
    }

    /// Legal moves for `color`, in rank-major order.
    #[instrument(level = "trace", skip(self))]
    pub fn legal_moves_for(&self, color: Color) -> Vec<Square> {
        self.potential_moves
            .iter()
            .copied()
            .filter(|&square| self.is_legal_move(square, color))
            .collect()
    }

    /// Whether `color` has any legal move.
    #[instrument(level = "trace", skip(self))]
    pub fn has_move_for(&self, color: Color) -> bool {
        self.potential_moves
            .iter()
            .any(|&square| self.is_legal_move(square, color))
    }

    /// Returns an independent copy of this board.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Human-readable board with file letters and rank numbers.
    pub fn pretty(&self) -> String {
        let mut result = String::from("  abcdefgh");
        for square in Square::all() {
            if square.file() == 0 {
                result.push_str(&format!("\n{} ", square.rank() + 1));
            }
            result.push(match self.color_at(square) {
                Some(Color::White) => '\u{25cb}',
                Some(Color::Black) => '\u{25cf}',
                None => ' ',
            });
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::init()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// A fixture string that does not describe a board.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardParseError {
    /// The fixture does not have exactly 64 squares.
    #[display("Board fixture has {actual} squares, expected 64")]
    WrongLength {
        /// Number of squares found.
        actual: usize,
    },

    /// A character other than `b`, `w`, space, `.` or `-`.
    #[display("Unknown fixture symbol {symbol:?} at square {index}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Its square index.
        index: usize,
    },
}

impl std::error::Error for BoardParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    #[test]
    fn test_invariants_report_every_violation() {
        let mut board = Board::init();
        board.potential_moves.insert(sq("d4"));

        let violations = BoardInvariants::check_all(&board).unwrap_err();

        let descriptions: Vec<&str> = violations.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(
            descriptions,
            [
                "Occupied and potential-move sets are disjoint",
                "Potential moves are exactly the empty squares adjacent to a disc",
            ]
        );
    }

    fn squares(notations: &[&str]) -> BTreeSet<Square> {
        notations.iter().map(|n| sq(n)).collect()
    }

    fn fixture(rows: &[&str; 8]) -> Board {
        Board::from_fixture(&rows.join("/")).unwrap()
    }

    #[test]
    fn test_init_occupied() {
        let board = Board::init();

        assert_eq!(board.occupied(), &squares(&["d4", "e4", "d5", "e5"]));
        assert_eq!(board.color_at(sq("d4")), Some(Color::White));
        assert_eq!(board.color_at(sq("e4")), Some(Color::Black));
        assert_eq!(board.color_at(sq("d5")), Some(Color::Black));
        assert_eq!(board.color_at(sq("e5")), Some(Color::White));
    }

    #[test]
    fn test_init_potential_moves() {
        let board = Board::init();

        assert_eq!(
            board.potential_moves(),
            &squares(&[
                "c3", "c4", "c5", "c6", "d3", "d6", "e3", "e6", "f3", "f4", "f5", "f6"
            ])
        );
    }

    #[test]
    fn test_init_legal_moves() {
        let board = Board::init();

        assert_eq!(
            board.legal_moves_for(Color::Black),
            vec![sq("d3"), sq("c4"), sq("f5"), sq("e6")]
        );
        assert_eq!(
            board.legal_moves_for(Color::White),
            vec![sq("e3"), sq("f4"), sq("c5"), sq("d6")]
        );
    }

    #[test]
    fn test_fixture_roundtrip() {
        let board = Board::init();
        let text = board.to_fixture();
        assert_eq!(Board::from_fixture(&text).unwrap(), board);
        assert_eq!(text.split('/').nth(3), Some("   wb   "));
    }

    #[test]
    fn test_fixture_errors() {
        assert_eq!(
            Board::from_fixture("bw"),
            Err(BoardParseError::WrongLength { actual: 2 })
        );

        let bad = format!("x{}", " ".repeat(63));
        assert_eq!(
            Board::from_fixture(&bad),
            Err(BoardParseError::UnknownSymbol { symbol: 'x', index: 0 })
        );
    }

    #[test]
    fn test_is_legal_move_cases() {
        let board = fixture(&[
            "  wwww  ",
            "b bwbw  ",
            "bbbwbwww",
            "bwwbbwww",
            "bwbbwwww",
            " wwwwwww",
            "        ",
            "        ",
        ]);

        // occupied
        assert!(!board.is_legal_move(sq("a2"), Color::Black));
        // no bracketing line in any direction
        assert!(!board.is_legal_move(sq("h2"), Color::White));
        // ray hits an empty square
        assert!(!board.is_legal_move(sq("b1"), Color::Black));
        // ray runs off the board
        assert!(!board.is_legal_move(sq("f7"), Color::White));

        assert!(board.is_legal_move(sq("a6"), Color::Black));
    }

    #[test]
    fn test_occupied_squares_never_legal() {
        let board = fixture(&[
            " wwwww  ",
            "  wwwbb ",
            "w wwwbbb",
            "wwbbbwbb",
            "wwwbwbwb",
            "wwbbbbbb",
            " bbbww  ",
            "  bww   ",
        ]);

        for &square in board.occupied() {
            assert!(!board.is_legal_move(square, Color::Black));
            assert!(!board.is_legal_move(square, Color::White));
        }
    }

    #[test]
    fn test_isolated_square_not_legal() {
        let board = Board::init();
        assert!(!board.is_legal_move(sq("a1"), Color::Black));
        assert!(!board.is_legal_move(sq("h8"), Color::White));
    }

    #[test]
    fn test_set_piece_updates_board() {
        let mut board = fixture(&[
            "        ",
            "   w    ",
            "  bww   ",
            "  bwb   ",
            "  wwbb  ",
            "  w wb  ",
            "        ",
            "        ",
        ]);

        let flipped = board.set_piece(sq("e2"), Color::Black).unwrap();

        assert_eq!(
            board,
            fixture(&[
                "        ",
                "   wb   ",
                "  bbb   ",
                "  bwb   ",
                "  wwbb  ",
                "  w wb  ",
                "        ",
                "        ",
            ])
        );
        let flipped: BTreeSet<Square> = flipped.into_iter().collect();
        assert_eq!(flipped, squares(&["d3", "e3"]));
    }

    #[test]
    fn test_set_piece_flips_whole_run() {
        let mut board = fixture(&[
            " wwwww  ",
            "  wwwbb ",
            "w wwwbbb",
            "wwbbbwbb",
            "wwwbwbwb",
            "wwbbbbbb",
            " bbbww  ",
            "  bww   ",
        ]);

        board.set_piece(sq("b3"), Color::White).unwrap();

        assert_eq!(
            board,
            fixture(&[
                " wwwww  ",
                "  wwwbb ",
                "wwwwwbbb",
                "wwwbbwbb",
                "wwwwwbwb",
                "wwbbwbbb",
                " bbbww  ",
                "  bww   ",
            ])
        );
    }

    #[test]
    fn test_set_piece_updates_occupied() {
        let mut board = fixture(&[
            "        ",
            "   w    ",
            "  bww   ",
            "  bwb   ",
            "  wwbb  ",
            "  w wb  ",
            "        ",
            "        ",
        ]);
        let mut expected = board.occupied().clone();
        expected.insert(sq("e2"));

        board.set_piece(sq("e2"), Color::Black).unwrap();

        assert_eq!(board.occupied(), &expected);
    }

    #[test]
    fn test_set_piece_updates_potential_moves() {
        let mut board = fixture(&[
            "        ",
            "   w    ",
            "  bww   ",
            "  bwb   ",
            "  wwbb  ",
            "  w wb  ",
            "        ",
            "        ",
        ]);
        let mut expected = board.potential_moves().clone();
        expected.extend(sq("e2").neighbors());
        expected.retain(|&square| square != sq("e2") && !board.is_occupied(square));

        board.set_piece(sq("e2"), Color::Black).unwrap();

        assert_eq!(board.potential_moves(), &expected);
        assert!(board.occupied().is_disjoint(board.potential_moves()));
    }

    #[test]
    fn test_set_piece_rejects_illegal_move() {
        let mut board = fixture(&[
            "        ",
            "   w    ",
            "  bww   ",
            "  bwb   ",
            "  wwbb  ",
            "  w wb  ",
            "        ",
            "        ",
        ]);
        let before = board.clone();

        let result = board.set_piece(sq("a1"), Color::Black);

        assert_eq!(
            result,
            Err(MoveError::IllegalMove {
                square: sq("a1"),
                color: Color::Black,
            })
        );
        assert_eq!(board, before);
        assert_eq!(board.occupied(), before.occupied());
        assert_eq!(board.potential_moves(), before.potential_moves());
    }

    #[test]
    fn test_flips_for_matches_set_piece() {
        let board = Board::init();
        let preview = board.flips_for(sq("c4"), Color::Black);
        assert_eq!(preview, vec![sq("d4")]);

        let mut copy = board.deep_copy();
        assert_eq!(copy.set_piece(sq("c4"), Color::Black).unwrap(), preview);
        assert!(board.flips_for(sq("a1"), Color::Black).is_empty());
        assert!(board.flips_for(sq("d4"), Color::Black).is_empty());
    }

    #[test]
    fn test_has_move_for() {
        let board = fixture(&[
            "wwwwwwww",
            "wwwwwwww",
            "wwwwwwww",
            "wwwwwww ",
            "wwwwww  ",
            "wwwwww b",
            "wwwwwww ",
            "wwwwwwww",
        ]);
        assert!(!board.has_move_for(Color::White));
        assert!(!board.has_move_for(Color::Black));

        let board = fixture(&[
            "   www  ",
            "  bwwb b",
            "wbwwwwbb",
            "wwwwbwbb",
            "wwwbwwbb",
            "wwwwwbbb",
            "  bbbbbb",
            " bbbbbbb",
        ]);
        assert!(board.has_move_for(Color::White));
        assert!(board.has_move_for(Color::Black));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let board = fixture(&[
            " wwwww  ",
            "  wwwbb ",
            "w wwwbbb",
            "wwbbbwbb",
            "wwwbwbwb",
            "wwbbbbbb",
            " bbbww  ",
            "  bww   ",
        ]);
        let mut copy = board.deep_copy();

        assert_eq!(copy, board);
        assert_eq!(copy.occupied(), board.occupied());
        assert_eq!(copy.potential_moves(), board.potential_moves());

        copy.set_piece(sq("b3"), Color::White).unwrap();

        assert_ne!(copy, board);
        assert!(!board.is_occupied(sq("b3")));
        assert!(!board.occupied().contains(&sq("b3")));
        assert!(board.potential_moves().contains(&sq("b3")));
    }

    #[test]
    fn test_equality_ignores_set_history() {
        let mut played = Board::init();
        played.set_piece(sq("c4"), Color::Black).unwrap();

        let built = fixture(&[
            "        ",
            "        ",
            "        ",
            "  bbb   ",
            "   bw   ",
            "        ",
            "        ",
            "        ",
        ]);

        assert_eq!(played, built);
        assert_eq!(played.potential_moves(), built.potential_moves());
    }

    #[test]
    fn test_count() {
        let board = Board::init();
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 2);
        assert!(!board.is_full());
    }

    #[test]
    fn test_pretty() {
        let pretty = Board::init().pretty();
        let lines: Vec<&str> = pretty.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "  abcdefgh");
        assert_eq!(lines[4], "4    \u{25cb}\u{25cf}   ");
    }
}
