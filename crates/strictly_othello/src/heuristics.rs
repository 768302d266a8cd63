//! Static evaluation of board positions.
//!
//! Every heuristic scores a board from one color's point of view, higher
//! being better for that color. [`best_next_square`] applies each legal move
//! to a copy of the board and keeps the square whose copy scores best.

use crate::square::SIZE;
use crate::{Board, Color, Direction, Square};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Per-square weights, indexed `[rank][file]`.
pub type Weights = [[i64; SIZE]; SIZE];

/// Corner-heavy weight table; X-squares next to the corners are penalized.
pub const DEFAULT_WEIGHTS: Weights = [
    [99, -8, 8, 6, 6, 8, -8, 99],
    [-8, -24, -4, -3, -3, -4, -24, -8],
    [8, -4, 7, 4, 4, 7, -4, 8],
    [6, -3, 4, 0, 0, 4, -3, 6],
    [6, -3, 4, 0, 0, 4, -3, 6],
    [8, -4, 7, 4, 4, 7, -4, 8],
    [-8, -24, -4, -3, -3, -4, -24, -8],
    [99, -8, 8, 6, 6, 8, -8, 99],
];

/// Weight of `square` in `weights`.
pub fn weight(weights: &Weights, square: Square) -> i64 {
    weights[square.rank()][square.file()]
}

/// Number of `color` discs.
pub fn greedy(board: &Board, color: Color) -> i64 {
    board.count(color) as i64
}

/// [`positional_with`] using [`DEFAULT_WEIGHTS`].
pub fn positional(board: &Board, color: Color) -> i64 {
    positional_with(board, color, &DEFAULT_WEIGHTS)
}

/// Weights of `color`'s squares minus weights of the opponent's squares.
pub fn positional_with(board: &Board, color: Color, weights: &Weights) -> i64 {
    board
        .occupied()
        .iter()
        .map(|&square| {
            let value = weight(weights, square);
            if board.color_at(square) == Some(color) {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Negated number of legal replies left to the opponent.
pub fn mobility(board: &Board, color: Color) -> i64 {
    -(board.legal_moves_for(color.opposite()).len() as i64)
}

/// Stable `color` discs minus stable opponent discs.
pub fn stable_discs(board: &Board, color: Color) -> i64 {
    stable_squares(board)
        .into_iter()
        .map(|square| {
            if board.color_at(square) == Some(color) {
                1
            } else {
                -1
            }
        })
        .sum()
}

/// Negated number of `color` discs; having none at all loses the game.
pub fn evaporation(board: &Board, color: Color) -> i64 {
    match board.count(color) {
        0 => -i64::MAX,
        count => -(count as i64),
    }
}

/// Negated number of `color` discs that touch an empty square.
pub fn frontier_evaporation(board: &Board, color: Color) -> i64 {
    let frontier = board
        .occupied()
        .iter()
        .filter(|&&square| board.color_at(square) == Some(color))
        .filter(|square| square.neighbors().any(|n| !board.is_occupied(n)))
        .count();
    -(frontier as i64)
}

/// Corners with the two edge directions that lead away from them.
const CORNER_FLOODS: [(usize, usize, [Direction; 2]); 4] = [
    (0, 0, [Direction::E, Direction::S]),
    (0, SIZE - 1, [Direction::W, Direction::S]),
    (SIZE - 1, 0, [Direction::E, Direction::N]),
    (SIZE - 1, SIZE - 1, [Direction::W, Direction::N]),
];

/// Discs that can never be flipped again.
///
/// A disc is stable if it is reached from an occupied corner by stepping
/// away from that corner through discs of the corner's color, or if every
/// line through it is already full.
#[instrument(level = "trace", skip(board))]
pub fn stable_squares(board: &Board) -> BTreeSet<Square> {
    let mut stable = BTreeSet::new();

    for (rank, file, directions) in CORNER_FLOODS {
        let Some(corner) = Square::new(rank, file) else {
            continue;
        };
        let Some(color) = board.color_at(corner) else {
            continue;
        };

        let mut reached = BTreeSet::new();
        let mut frontier = vec![corner];
        while let Some(current) = frontier.pop() {
            if !reached.insert(current) {
                continue;
            }
            frontier.extend(
                directions
                    .into_iter()
                    .filter_map(|direction| current.neighbor(direction))
                    .filter(|&next| board.color_at(next) == Some(color)),
            );
        }
        stable.extend(reached);
    }

    let full_lines: Vec<Square> = board
        .occupied()
        .iter()
        .copied()
        .filter(|square| !stable.contains(square))
        .filter(|square| {
            Direction::ALL
                .into_iter()
                .all(|direction| square.ray(direction).all(|s| board.is_occupied(s)))
        })
        .collect();
    stable.extend(full_lines);

    trace!(stable = stable.len(), "Counted stable discs");
    stable
}

/// Whether a heuristic's best value is its largest or its smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum Optimize {
    /// Higher scores win.
    #[default]
    Maximize,
    /// Lower scores win.
    Minimize,
}

impl Optimize {
    /// Whether `candidate` strictly beats `incumbent`.
    pub fn prefers(self, candidate: i64, incumbent: i64) -> bool {
        match self {
            Optimize::Maximize => candidate > incumbent,
            Optimize::Minimize => candidate < incumbent,
        }
    }

    /// The opposite ordering.
    pub fn reversed(self) -> Self {
        match self {
            Optimize::Maximize => Optimize::Minimize,
            Optimize::Minimize => Optimize::Maximize,
        }
    }
}

type ScoreFn = dyn Fn(&Board, Color) -> i64 + Send + Sync;

/// A named scoring function plus the direction it is optimized in.
#[derive(Clone)]
pub struct Heuristic {
    name: String,
    score: Arc<ScoreFn>,
    optimize: Optimize,
}

impl Heuristic {
    /// Wraps an arbitrary scoring function.
    pub fn new(
        name: impl Into<String>,
        optimize: Optimize,
        score: impl Fn(&Board, Color) -> i64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            score: Arc::new(score),
            optimize,
        }
    }

    /// Maximizes [`greedy`].
    pub fn greedy() -> Self {
        Self::new("greedy", Optimize::Maximize, greedy)
    }

    /// Maximizes [`positional`].
    pub fn positional() -> Self {
        Self::new("positional", Optimize::Maximize, positional)
    }

    /// Maximizes [`mobility`].
    pub fn mobility() -> Self {
        Self::new("mobility", Optimize::Maximize, mobility)
    }

    /// Maximizes [`stable_discs`].
    pub fn stable_discs() -> Self {
        Self::new("stable-discs", Optimize::Maximize, stable_discs)
    }

    /// Maximizes [`evaporation`].
    pub fn evaporation() -> Self {
        Self::new("evaporation", Optimize::Maximize, evaporation)
    }

    /// Maximizes [`frontier_evaporation`].
    pub fn frontier_evaporation() -> Self {
        Self::new(
            "frontier-evaporation",
            Optimize::Maximize,
            frontier_evaporation,
        )
    }

    /// The same scoring function with the ordering inverted.
    pub fn minimizing(self) -> Self {
        Self {
            optimize: self.optimize.reversed(),
            ..self
        }
    }

    /// Name used in logs and player names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direction of optimization.
    pub fn optimize(&self) -> Optimize {
        self.optimize
    }

    /// Scores `board` for `color`.
    pub fn score(&self, board: &Board, color: Color) -> i64 {
        (self.score)(board, color)
    }

    /// Best legal square for `color` under this heuristic.
    pub fn best_next_square(&self, board: &Board, color: Color) -> Option<Square> {
        best_next_square(board, color, |copy| self.score(copy, color), self.optimize)
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heuristic")
            .field("name", &self.name)
            .field("optimize", &self.optimize)
            .finish_non_exhaustive()
    }
}

/// Plays each legal move for `color` on a copy of `board`, scores the copy
/// and returns the best square. Ties go to the first square in rank-major
/// order; `None` if `color` has no legal move.
#[instrument(level = "debug", skip(board, score))]
pub fn best_next_square(
    board: &Board,
    color: Color,
    mut score: impl FnMut(&Board) -> i64,
    optimize: Optimize,
) -> Option<Square> {
    let candidates = board.legal_moves_for(color).into_iter().filter_map(|square| {
        let mut copy = board.deep_copy();
        copy.set_piece(square, color).ok()?;
        let value = score(&copy);
        trace!(square = %square, value, "Scored candidate");
        Some((square, value))
    });
    pick(candidates, optimize)
}

/// First candidate whose value is not beaten by any later one.
pub(crate) fn pick(
    candidates: impl IntoIterator<Item = (Square, i64)>,
    optimize: Optimize,
) -> Option<Square> {
    let mut best: Option<(Square, i64)> = None;
    for (square, value) in candidates {
        let better = match best {
            None => true,
            Some((_, incumbent)) => optimize.prefers(value, incumbent),
        };
        if better {
            best = Some((square, value));
        }
    }
    best.map(|(square, _)| square)
}
