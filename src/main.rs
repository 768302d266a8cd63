//! Strictly Othello - command-line front end
//!
//! Plays games between humans and computer strategies.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc;
use strictly_othello::{
    Board, Color, GameEvent, Match, MoveScript, Othello, Outcome, RetryPolicy, Winner,
};
use strictly_othello_app::{MatchConfig, PlayerKind, build_match};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            black,
            white,
            seed,
            json,
        } => run_play(config, black, white, seed, json),
        Command::Series {
            black,
            white,
            games,
            seed,
        } => run_series(black, white, games, seed),
        Command::Replay { moves } => run_replay(&moves),
        Command::Board => run_board(),
    }
}

/// Result of a single game, as printed by `play --json`.
#[derive(Debug, Serialize)]
struct GameSummary {
    black: String,
    white: String,
    outcome: Outcome,
    turns: usize,
    moves: Vec<String>,
}

impl GameSummary {
    fn new(game: &Match, outcome: Outcome) -> Self {
        Self {
            black: game.player(Color::Black).name().to_string(),
            white: game.player(Color::White).name().to_string(),
            outcome,
            turns: game.game().turns_played(),
            moves: game
                .game()
                .history()
                .iter()
                .map(|mov| mov.square.algebraic())
                .collect(),
        }
    }
}

/// Play one game
#[instrument(skip(config_path))]
fn run_play(
    config_path: Option<PathBuf>,
    black: Option<PlayerKind>,
    white: Option<PlayerKind>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => MatchConfig::from_file(path)?,
        None => MatchConfig::default(),
    };
    if let Some(black) = black {
        config = config.with_black(black);
    }
    if let Some(white) = white {
        config = config.with_white(white);
    }
    if seed.is_some() {
        config = config.with_seed(seed);
    }

    info!(black = %config.black(), white = %config.white(), "Starting game");

    let (tx, rx) = mpsc::channel();
    let mut game = build_match(&config).with_observer(tx);
    let outcome = drive(&mut game, &rx, !json, |color| config.seats_human(color))?;

    if json {
        let summary = GameSummary::new(&game, outcome);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", outcome);
    }
    Ok(())
}

/// Wins per side over a series.
#[derive(Debug, Default, Serialize)]
struct Tally {
    black: u32,
    white: u32,
    ties: u32,
}

impl Tally {
    fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Black => self.black += 1,
            Winner::White => self.white += 1,
            Winner::Tie => self.ties += 1,
        }
    }
}

/// Play several computer games
#[instrument]
fn run_series(black: PlayerKind, white: PlayerKind, games: u32, seed: Option<u64>) -> Result<()> {
    if black.is_human() || white.is_human() {
        bail!("A series needs two computer players");
    }

    let mut tally = Tally::default();
    for index in 0..games {
        // Each game seeds both colors, so consecutive games step by two
        let game_seed = seed.map(|seed| seed.wrapping_add(u64::from(index) * 2));
        let config = MatchConfig::new(black, white).with_seed(game_seed);
        let outcome = build_match(&config)
            .play()
            .with_context(|| format!("Game {} of the series failed", index + 1))?;
        info!(game = index + 1, %outcome, "Series game finished");
        tally.record(outcome.winner());
    }

    println!("{} (BLACK): {} wins", black, tally.black);
    println!("{} (WHITE): {} wins", white, tally.white);
    println!("ties: {}", tally.ties);
    Ok(())
}

/// Replay a recorded game
#[instrument]
fn run_replay(moves: &str) -> Result<()> {
    let script = MoveScript::parse(moves)?;
    let (tx, rx) = mpsc::channel();
    let mut game = Match::new(
        Box::new(script.player(Color::Black)),
        Box::new(script.player(Color::White)),
    )
    .with_retry_policy(RetryPolicy::limited(1))
    .with_observer(tx);

    let outcome = drive(&mut game, &rx, true, |_| false).context("Recorded game could not be replayed")?;
    println!("{}", outcome);
    Ok(())
}

/// Show the starting position
fn run_board() -> Result<()> {
    let game = Othello::new();
    println!("{}", Board::init().pretty());
    let moves: Vec<String> = game.legal_moves().iter().map(|s| s.algebraic()).collect();
    println!("Legal moves for {}: {}", Color::Black, moves.join(" "));
    Ok(())
}

/// Plays `game` to the end, printing each move when `show` is set.
///
/// Colors for which `prints_own_board` holds draw the board themselves at the
/// start of their turn, so it is not printed again before their move.
fn drive(
    game: &mut Match,
    events: &mpsc::Receiver<GameEvent>,
    show: bool,
    prints_own_board: impl Fn(Color) -> bool,
) -> Result<Outcome> {
    let board_due = |game: &Othello| game.to_move().is_none_or(|color| !prints_own_board(color));

    if show && board_due(game.game()) {
        println!("{}", game.game().board().pretty());
    }

    while !game.game().is_over() {
        game.next_ply()?;
        for event in events.try_iter() {
            if show {
                report(&event, game.game(), board_due(game.game()));
            }
        }
    }

    Ok(game.game().outcome())
}

fn report(event: &GameEvent, game: &Othello, with_board: bool) {
    match event {
        GameEvent::MoveMade { mov, flipped } => {
            println!("\n{} flips {}", mov, flipped.len());
            if with_board {
                println!("{}", game.board().pretty());
            }
        }
        GameEvent::Passed(color) => println!("{} has no legal move and passes", color),
        GameEvent::GameOver(_) => println!("Game over"),
        // The offending player hears about it through `Player::fail`
        GameEvent::IllegalMove { .. } => {}
    }
}
