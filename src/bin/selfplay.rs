//! Self-play game generation CLI.
//!
//! Plays AI-only games and writes one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 10)
//!   --players N      AI seats per game, 2-6 (default: 4)
//!   --size S         Board size: small, medium, large (default: medium)
//!   --manual         Use the greedy manual placement instead of random reinforcement
//!   --colorless      Leave some territories colorless
//!   --threshold N    Minimum dice advantage to attack (default: 1)
//!   --max-rounds N   Round cap, games past it count as draws (default: 200)
//!   --no-shuffle     Keep seat order fixed
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::prelude::*;

use dicewars::config::BoardSize;
use dicewars::selfplay::{self, SelfPlayConfig};

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {flag} value");
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value(&args, i, "--games");
            }
            "--players" => {
                i += 1;
                config.players = value(&args, i, "--players");
            }
            "--size" => {
                i += 1;
                let name: String = value(&args, i, "--size");
                config.board_size = match BoardSize::from_name(&name) {
                    Some(size) => size,
                    None => {
                        eprintln!("unknown board size: {name}");
                        process::exit(1);
                    }
                };
            }
            "--manual" => {
                config.random_reinforce = false;
            }
            "--colorless" => {
                config.colorless_territory = true;
            }
            "--threshold" => {
                i += 1;
                config.threshold = value(&args, i, "--threshold");
            }
            "--max-rounds" => {
                i += 1;
                config.max_rounds = value(&args, i, "--max-rounds");
            }
            "--no-shuffle" => {
                config.shuffle_seats = false;
            }
            "--threads" => {
                i += 1;
                config.threads = value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(value(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;
    let default_level = if quiet { "warn" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if !quiet {
        eprintln!(
            "Self-play: {} games, {} players, {:?} board, threshold {}, max {} rounds, {} threads",
            config.num_games,
            config.players,
            config.board_size,
            config.threshold,
            config.max_rounds,
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("self-play failed: {e}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/s)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(1e-9)
        );
        selfplay::print_summary(&games);
    }

    let written = match output_path {
        Some(path) => File::create(&path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)?;
            if !quiet {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
            Ok(())
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --players N      AI seats per game, 2-6 (default: 4)");
    eprintln!("  --size S         Board size: small, medium, large (default: medium)");
    eprintln!("  --manual         Greedy manual placement instead of random reinforcement");
    eprintln!("  --colorless      Leave some territories colorless");
    eprintln!("  --threshold N    Minimum dice advantage to attack (default: 1)");
    eprintln!("  --max-rounds N   Round cap, games past it count as draws (default: 200)");
    eprintln!("  --no-shuffle     Keep seat order fixed");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
