//! Turning configuration into players and matches.

use crate::config::{MatchConfig, PlayerKind};
use crate::terminal::TerminalPlayer;
use strictly_othello::{Color, ComputerPlayer, Heuristic, Match, Player, Strategy};
use tracing::{debug, instrument};

/// Strategy behind a computer kind; `None` for [`PlayerKind::Human`].
pub fn strategy_for(kind: PlayerKind) -> Option<Strategy> {
    let strategy = match kind {
        PlayerKind::Human => return None,
        PlayerKind::Random => Strategy::Random,
        PlayerKind::Greedy => Strategy::Greedy,
        PlayerKind::Positional => Strategy::positional(),
        PlayerKind::Mobility => Strategy::Mobility,
        PlayerKind::StableDiscs => Strategy::StableDiscs,
        PlayerKind::Evaporation => Strategy::Heuristic(Heuristic::evaporation()),
        PlayerKind::FrontierEvaporation => {
            Strategy::Heuristic(Heuristic::frontier_evaporation())
        }
    };
    Some(strategy)
}

/// Builds a player of `kind` for `color`.
///
/// Humans play on standard input and output. Computer players are seeded
/// from `seed` when given, so a seeded match replays identically.
#[instrument]
pub fn build_player(kind: PlayerKind, color: Color, seed: Option<u64>) -> Box<dyn Player> {
    match (strategy_for(kind), seed) {
        (None, _) => Box::new(TerminalPlayer::stdio(color)),
        (Some(strategy), Some(seed)) => Box::new(ComputerPlayer::seeded(color, strategy, seed)),
        (Some(strategy), None) => Box::new(ComputerPlayer::new(color, strategy)),
    }
}

/// Per-color seed derived from a match seed.
pub fn seed_for(seed: Option<u64>, color: Color) -> Option<u64> {
    seed.map(|seed| match color {
        Color::Black => seed,
        Color::White => seed.wrapping_add(1),
    })
}

/// Builds a fresh match from configuration.
#[instrument(skip(config))]
pub fn build_match(config: &MatchConfig) -> Match {
    debug!(?config, "Building match");
    let black = build_player(
        *config.black(),
        Color::Black,
        seed_for(*config.seed(), Color::Black),
    );
    let white = build_player(
        *config.white(),
        Color::White,
        seed_for(*config.seed(), Color::White),
    );
    Match::new(black, white).with_retry_policy(config.retry_policy())
}
