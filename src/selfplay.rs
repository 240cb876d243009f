//! Self-play game generation.
//!
//! Plays full games between AI seats and records how each one went: the
//! starting position, elimination order, winner, round count and attack
//! statistics. Useful for tuning strategies and for spotting stalemates.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::ai::GreedyAi;
use crate::board::PlayerId;
use crate::config::{BoardSize, ConfigError, Configuration};
use crate::dice::RandomDice;
use crate::game::{AiStep, Game, SelectionResult};
use crate::protocol::notation::encode_board;

/// Errors that stop a self-play run before any game is played.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// Configuration for a self-play run.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Active AI seats per game.
    pub players: usize,
    pub board_size: BoardSize,
    pub random_reinforce: bool,
    pub colorless_territory: bool,
    /// Attack threshold handed to every `GreedyAi`.
    pub threshold: i32,
    /// Games still running after this round are recorded as draws.
    pub max_rounds: u32,
    /// Shuffle seat order before each game.
    pub shuffle_seats: bool,
    /// Number of worker threads. 1 plays sequentially.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 4,
            board_size: BoardSize::Medium,
            random_reinforce: true,
            colorless_territory: false,
            threshold: 1,
            max_rounds: 200,
            shuffle_seats: true,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    /// Builds the game configuration shared by every game of the run.
    pub fn game_config(&self) -> Result<Configuration, ConfigError> {
        let mut config = Configuration::all_ai(self.players, self.board_size)?;
        config.set_random_reinforce(self.random_reinforce);
        config.set_colorless_territory(self.colorless_territory);
        Ok(config)
    }
}

/// Record of one finished (or abandoned) game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// Dice seed the game was played with.
    pub dice_seed: u64,
    /// Seat names in turn order.
    pub seats: Vec<String>,
    /// Board notation right after the deal.
    pub initial_board: String,
    /// Winner's name, or None if the round cap was hit first.
    pub winner: Option<String>,
    /// Eliminated seats, first out first.
    pub eliminations: Vec<String>,
    pub rounds: u32,
    pub attacks: usize,
    pub captures: usize,
    /// Territories held per seat at the end, in seat order.
    pub final_territories: Vec<usize>,
}

impl GameRecord {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Plays a single game to completion or to the round cap.
pub fn play_game(
    config: &SelfPlayConfig,
    base: &Configuration,
    game_id: usize,
    rng: &mut SmallRng,
) -> GameRecord {
    let mut game_config = base.clone();
    if config.shuffle_seats {
        game_config.randomize_player_order(rng);
    }
    let dice_seed: u64 = rng.gen();
    let mut game = Game::with_dice(game_config, Box::new(RandomDice::seeded(dice_seed)));
    if let Err(e) = game.start() {
        warn!(game_id, error = %e, "self-play game failed to start");
    }
    let initial_board = encode_board(game.board()).unwrap_or_default();

    let mut ai = GreedyAi::new(config.threshold);
    let mut attacks = 0;
    let mut captures = 0;
    while !game.is_over() && game.round_num() <= config.max_rounds {
        match game.ai_step(&mut ai) {
            Ok(AiStep::Selection(SelectionResult::Attacked(outcome))) => {
                attacks += 1;
                if outcome.attacker_won() {
                    captures += 1;
                }
            }
            Ok(AiStep::Selection(_)) | Ok(AiStep::PrimaryAction) => {}
            Ok(AiStep::Idle) | Ok(AiStep::Stalled) => break,
            Err(e) => {
                warn!(game_id, error = %e, "self-play game aborted");
                break;
            }
        }
    }

    let seats: Vec<String> = game.players().iter().map(|p| p.name.clone()).collect();
    let final_territories = (0..seats.len())
        .map(|i| game.board().count_owned(PlayerId(i as u8)))
        .collect();
    let eliminations = game
        .closed_players()
        .iter()
        .filter_map(|&id| game.player(id))
        .map(|p| p.name.clone())
        .collect();
    let winner = game
        .results()
        .and_then(|r| r.winner.as_ref())
        .map(|p| p.name.clone());

    GameRecord {
        game_id,
        dice_seed,
        seats,
        initial_board,
        winner,
        eliminations,
        rounds: game.round_num(),
        attacks,
        captures,
        final_territories,
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally (e.g. write to disk)
/// rather than waiting for all games to finish.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    let base = config.game_config()?;
    if config.threads > 1 {
        run_self_play_parallel(config, &base, on_game)
    } else {
        run_self_play_sequential(config, &base, on_game);
        Ok(())
    }
}

fn seeded_rng(seed: u64) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed)
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    info!(
        game = n,
        of = config.num_games,
        winner = game.winner.as_deref().unwrap_or("draw"),
        rounds = game.rounds,
        secs = started.elapsed().as_secs_f64(),
        "self-play game finished"
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, base: &Configuration, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = seeded_rng(config.seed);
    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(config, base, i, &mut rng);
        log_game(config, i + 1, &game, started);
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(
    config: &SelfPlayConfig,
    base: &Configuration,
    mut on_game: F,
) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<GameRecord>();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config_clone = config.clone();
    let base_clone = base.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let seed = if config_clone.seed != 0 {
                        config_clone.seed.wrapping_add(i as u64)
                    } else {
                        0
                    };
                    let mut rng = seeded_rng(seed);
                    let started = Instant::now();
                    let game = play_game(&config_clone, &base_clone, i, &mut rng);
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_game(&config_clone, n, &game, started);
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the main thread and pass to callback.
    for game in rx {
        on_game(game);
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate numbers over a batch of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub draws: usize,
    pub avg_rounds: f64,
    pub avg_attacks: f64,
    /// Wins per seat name.
    pub wins: BTreeMap<String, usize>,
}

pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut rounds = 0u64;
    let mut attacks = 0usize;
    for game in games {
        rounds += u64::from(game.rounds);
        attacks += game.attacks;
        match &game.winner {
            Some(w) => *summary.wins.entry(w.clone()).or_insert(0) += 1,
            None => summary.draws += 1,
        }
    }
    let n = games.len().max(1) as f64;
    summary.avg_rounds = rounds as f64 / n;
    summary.avg_attacks = attacks as f64 / n;
    summary
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let summary = summarize(games);
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", summary.games);
    eprintln!("Avg rounds/game: {:.1}", summary.avg_rounds);
    eprintln!("Avg attacks/game: {:.1}", summary.avg_attacks);
    eprintln!("Draws (round cap): {}", summary.draws);
    eprintln!("Win distribution:");
    for (name, &wins) in &summary.wins {
        let pct = 100.0 * wins as f64 / summary.games.max(1) as f64;
        eprintln!("  {:>8}: {} ({:.1}%)", name, wins, pct);
    }
}
