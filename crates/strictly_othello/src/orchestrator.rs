//! Game orchestration between two players.

use crate::action::{Move, MoveError};
use crate::contracts::{Contract, MoveContract};
use crate::game::{GameStatus, Othello};
use crate::outcome::Outcome;
use crate::player::{Player, PlayerError};
use crate::{Color, Square};
use derive_more::Display;
use std::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Default number of consecutive illegal squares tolerated per ply.
pub const DEFAULT_ILLEGAL_MOVE_LIMIT: u32 = 3;

/// How many consecutive illegal squares a player may submit in one ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    limit: Option<u32>,
}

impl RetryPolicy {
    /// Gives up after `limit` illegal squares in a row.
    pub fn limited(limit: u32) -> Self {
        Self { limit: Some(limit) }
    }

    /// Re-prompts forever.
    pub fn unlimited() -> Self {
        Self { limit: None }
    }

    /// Builds a policy from an optional limit; `None` is unlimited.
    pub fn from_limit(limit: Option<u32>) -> Self {
        Self { limit }
    }

    /// The limit, if any.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.limit.is_some_and(|limit| attempts >= limit)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::limited(DEFAULT_ILLEGAL_MOVE_LIMIT)
    }
}

/// Messages sent from the orchestrator to an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was applied.
    MoveMade {
        /// The applied move.
        mov: Move,
        /// Discs it flipped.
        flipped: Vec<Square>,
    },
    /// A player submitted a square that was rejected.
    IllegalMove {
        /// The rejected move.
        mov: Move,
        /// Consecutive rejections so far this ply.
        attempts: u32,
    },
    /// `Color` had no legal move and lost its turn.
    Passed(Color),
    /// Game ended.
    GameOver(Outcome),
}

/// Error that ends a ply without a move being applied.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PlyError {
    /// The player could not produce a square.
    #[display("Player failed: {_0}")]
    Player(PlayerError),

    /// The player kept submitting illegal squares.
    #[display("{color} made {attempts} illegal moves in a row")]
    TooManyIllegalMoves {
        /// The offending color.
        color: Color,
        /// Consecutive illegal attempts.
        attempts: u32,
    },

    /// The game rejected the move outright.
    #[display("Move failed: {_0}")]
    Move(MoveError),
}

impl std::error::Error for PlyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlyError::Player(error) => Some(error),
            PlyError::Move(error) => Some(error),
            PlyError::TooManyIllegalMoves { .. } => None,
        }
    }
}

impl From<PlayerError> for PlyError {
    fn from(error: PlayerError) -> Self {
        PlyError::Player(error)
    }
}

impl From<MoveError> for PlyError {
    fn from(error: MoveError) -> Self {
        PlyError::Move(error)
    }
}

/// Orchestrates a game between a black and a white player.
pub struct Match {
    game: Othello,
    black: Box<dyn Player>,
    white: Box<dyn Player>,
    retry: RetryPolicy,
    observer: Option<mpsc::Sender<GameEvent>>,
}

impl Match {
    /// Creates a match on a fresh board.
    pub fn new(black: Box<dyn Player>, white: Box<dyn Player>) -> Self {
        Self::from_game(Othello::new(), black, white)
    }

    /// Creates a match that continues `game`.
    pub fn from_game(game: Othello, black: Box<dyn Player>, white: Box<dyn Player>) -> Self {
        if black.color() != Color::Black || white.color() != Color::White {
            warn!(
                black = %black.color(),
                white = %white.color(),
                "Players seated against their declared colors"
            );
        }

        Self {
            game,
            black,
            white,
            retry: RetryPolicy::default(),
            observer: None,
        }
    }

    /// Sets the retry policy for illegal squares.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sends every [`GameEvent`] to `observer`.
    pub fn with_observer(mut self, observer: mpsc::Sender<GameEvent>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Returns the game.
    pub fn game(&self) -> &Othello {
        &self.game
    }

    /// Returns the player for `color`.
    pub fn player(&self, color: Color) -> &dyn Player {
        match color {
            Color::Black => self.black.as_ref(),
            Color::White => self.white.as_ref(),
        }
    }

    /// Plays one ply for the color on turn.
    ///
    /// Illegal squares are reported to the player through
    /// [`Player::fail`] and the player is asked again, until the retry
    /// policy runs out.
    #[instrument(skip(self), fields(turn = self.game.turn_number()))]
    pub fn next_ply(&mut self) -> Result<GameStatus, PlyError> {
        let color = self.game.to_move().ok_or(MoveError::GameOver)?;
        let player = match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        };

        debug!(player = %player.name(), "Waiting for move");
        player.begin(&self.game);

        let mut attempts = 0;
        let transition = loop {
            let square = player.get_move(&self.game)?;
            let mov = Move::new(color, square);

            match MoveContract::pre(&self.game, &mov) {
                Ok(()) => break self.game.make_move(mov)?,
                Err(error) => {
                    attempts += 1;
                    warn!(player = %player.name(), %error, attempts, "Illegal move");
                    player.fail(&self.game, &error);
                    emit(&self.observer, GameEvent::IllegalMove { mov, attempts });
                    if self.retry.exhausted(attempts) {
                        return Err(PlyError::TooManyIllegalMoves { color, attempts });
                    }
                }
            }
        };

        player.done(&self.game);
        emit(
            &self.observer,
            GameEvent::MoveMade {
                mov: *transition.mov(),
                flipped: transition.flipped().clone(),
            },
        );

        let status = *transition.status();
        if transition.is_pass() {
            emit(&self.observer, GameEvent::Passed(color.opposite()));
        }
        if status == GameStatus::GameOver {
            emit(&self.observer, GameEvent::GameOver(self.game.outcome()));
        }
        Ok(status)
    }

    /// Plays until neither color can move and returns the outcome.
    #[instrument(skip(self))]
    pub fn play(&mut self) -> Result<Outcome, PlyError> {
        info!(
            black = %self.black.name(),
            white = %self.white.name(),
            "Starting match"
        );

        while !self.game.is_over() {
            self.next_ply()?;
        }

        let outcome = self.game.outcome();
        info!(%outcome, turns = self.game.turns_played(), "Match finished");
        Ok(outcome)
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("game", &self.game)
            .field("black", &self.black.name())
            .field("white", &self.white.name())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

fn emit(observer: &Option<mpsc::Sender<GameEvent>>, event: GameEvent) {
    if let Some(tx) = observer {
        if tx.send(event).is_err() {
            debug!("Event observer hung up");
        }
    }
}
