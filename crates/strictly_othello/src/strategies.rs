//! Computer strategies behind a single player type.

use crate::game::Othello;
use crate::heuristics::{self, Heuristic, Optimize, Weights, best_next_square, pick, weight};
use crate::player::{Player, PlayerError, legal_moves_or_err};
use crate::{Board, Color, Square};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// How a [`ComputerPlayer`] picks among its legal moves.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Uniformly random legal move.
    Random,
    /// The move that flips the most discs.
    Greedy,
    /// The move whose square plus flipped discs weigh the most.
    Positional(Weights),
    /// The move that leaves the opponent the fewest replies.
    Mobility,
    /// The move that leaves the most stable discs.
    StableDiscs,
    /// Any heuristic, one ply deep.
    Heuristic(Heuristic),
}

impl Strategy {
    /// Positional strategy with the default weight table.
    pub fn positional() -> Self {
        Strategy::Positional(heuristics::DEFAULT_WEIGHTS)
    }

    /// Short label used in player names.
    pub fn label(&self) -> &str {
        match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Positional(_) => "positional",
            Strategy::Mobility => "mobility",
            Strategy::StableDiscs => "stable-discs",
            Strategy::Heuristic(heuristic) => heuristic.name(),
        }
    }

    /// Chooses a legal square for `color`, or `None` if there is none.
    ///
    /// Every strategy except [`Strategy::Random`] is deterministic; ties go
    /// to the first square in rank-major order.
    #[instrument(level = "debug", skip(self, board, rng), fields(strategy = self.label()))]
    pub fn choose(&self, board: &Board, color: Color, rng: &mut StdRng) -> Option<Square> {
        let legal = board.legal_moves_for(color);
        match self {
            Strategy::Random => legal.choose(rng).copied(),
            Strategy::Greedy => pick(
                legal
                    .into_iter()
                    .map(|square| (square, board.flips_for(square, color).len() as i64)),
                Optimize::Maximize,
            ),
            Strategy::Positional(weights) => pick(
                legal.into_iter().map(|square| {
                    let flipped: i64 = board
                        .flips_for(square, color)
                        .into_iter()
                        .map(|disc| weight(weights, disc))
                        .sum();
                    (square, weight(weights, square) + flipped)
                }),
                Optimize::Maximize,
            ),
            Strategy::Mobility => best_next_square(
                board,
                color,
                |copy| copy.legal_moves_for(color.opposite()).len() as i64,
                Optimize::Minimize,
            ),
            Strategy::StableDiscs => best_next_square(
                board,
                color,
                |copy| heuristics::stable_discs(copy, color),
                Optimize::Maximize,
            ),
            Strategy::Heuristic(heuristic) => heuristic.best_next_square(board, color),
        }
    }
}

/// A player driven by a [`Strategy`].
#[derive(Debug)]
pub struct ComputerPlayer {
    name: String,
    color: Color,
    strategy: Strategy,
    rng: StdRng,
}

impl ComputerPlayer {
    /// Creates a player seeded from the operating system.
    pub fn new(color: Color, strategy: Strategy) -> Self {
        Self::with_rng(color, strategy, StdRng::from_os_rng())
    }

    /// Creates a player whose random choices are reproducible.
    pub fn seeded(color: Color, strategy: Strategy, seed: u64) -> Self {
        Self::with_rng(color, strategy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(color: Color, strategy: Strategy, rng: StdRng) -> Self {
        Self {
            name: format!("{} ({})", strategy.label(), color),
            color,
            strategy,
            rng,
        }
    }

    /// Returns the strategy.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }
}

impl Player for ComputerPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, game: &Othello) -> Result<Square, PlayerError> {
        legal_moves_or_err(game, self.color)?;
        let square = self
            .strategy
            .choose(game.board(), self.color, &mut self.rng)
            .ok_or(PlayerError::NoLegalMove(self.color))?;
        debug!(player = %self.name, square = %square, "Computer chose move");
        Ok(square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(rows: &[&str; 8]) -> Board {
        Board::from_fixture(&rows.join("/")).unwrap()
    }

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    fn choose(strategy: Strategy, board: &Board, color: Color) -> Option<Square> {
        strategy.choose(board, color, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_greedy_flips_most() {
        let board = fixture(&[
            "        ",
            "        ",
            "    w   ",
            "  bbbb  ",
            "  wbbb  ",
            "   wwww ",
            "     b  ",
            "        ",
        ]);
        assert_eq!(choose(Strategy::Greedy, &board, Color::Black), Some(sq("d7")));
    }

    #[test]
    fn test_positional_weighs_square_and_flips() {
        let board = fixture(&[
            "        ",
            "        ",
            "        ",
            "   wb   ",
            "   wbb  ",
            "   www  ",
            "    bw  ",
            "        ",
        ]);
        assert_eq!(
            choose(Strategy::positional(), &board, Color::Black),
            Some(sq("f8"))
        );
    }

    #[test]
    fn test_mobility_minimizes_replies() {
        let board = fixture(&[
            "    bbb ",
            "    wb  ",
            " wbwwbbb",
            "bbwbwbbb",
            "wbwwwbbb",
            " bwwwww ",
            "  bwwwww",
            "        ",
        ]);
        assert_eq!(choose(Strategy::Mobility, &board, Color::Black), Some(sq("a6")));
    }

    #[test]
    fn test_stable_discs_prefers_corner_run() {
        let board = fixture(&[
            "   b    ",
            "  wwwww ",
            "   ww w ",
            "bwwww wb",
            "bbwwwwwb",
            "bbwbwbwb",
            "bbwwbbb ",
            "b wbbb  ",
        ]);
        assert_eq!(
            choose(Strategy::StableDiscs, &board, Color::Black),
            Some(sq("b8"))
        );
    }

    #[test]
    fn test_stable_discs_takes_only_gain() {
        let board = fixture(&[
            "  w     ",
            "  wwww  ",
            "bbbbwwww",
            " wbwbbww",
            "wwbbwbww",
            "w bbbww ",
            "  bbbbw ",
            "   bbb  ",
        ]);
        assert_eq!(
            choose(Strategy::StableDiscs, &board, Color::Black),
            Some(sq("h8"))
        );
    }

    #[test]
    fn test_random_always_legal() {
        let board = fixture(&[
            "        ",
            "   w    ",
            "  ww    ",
            "  wwbw  ",
            " bbbbb  ",
            "   b    ",
            "        ",
            "        ",
        ]);
        let legal = board.legal_moves_for(Color::Black);
        assert_eq!(legal.len(), 10);

        for seed in 0..20 {
            let square = Strategy::Random
                .choose(&board, Color::Black, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(legal.contains(&square));
        }
    }

    #[test]
    fn test_seeded_player_is_reproducible() {
        let game = Othello::new();
        let mut first = ComputerPlayer::seeded(Color::Black, Strategy::Random, 42);
        let mut second = ComputerPlayer::seeded(Color::Black, Strategy::Random, 42);
        assert_eq!(first.get_move(&game), second.get_move(&game));
    }

    #[test]
    fn test_player_without_moves_errors() {
        let game = Othello::new();
        let mut player = ComputerPlayer::new(Color::White, Strategy::Greedy);
        let stuck = fixture(&["bbbbbbbb"; 8]);
        let stuck_game = Othello::from_board(stuck, Color::White);

        assert!(player.get_move(&game).is_ok());
        assert_eq!(
            player.get_move(&stuck_game),
            Err(PlayerError::NoLegalMove(Color::White))
        );
    }

    #[test]
    fn test_player_name() {
        let player = ComputerPlayer::new(Color::White, Strategy::Mobility);
        assert_eq!(player.name(), "mobility (WHITE)");
        assert_eq!(player.color(), Color::White);
    }
}
