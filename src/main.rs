//! Dice Wars -- an interactive text front end.
//!
//! Reads one command per line from stdin and writes responses to stdout.
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
//!
//! Usage:
//!   dicewars [--config FILE] [--seed N]
//!
//! With `--seed` a game starts immediately; otherwise send `new`.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

use tracing_subscriber::prelude::*;

use dicewars::config::Configuration;
use dicewars::engine::Engine;
use dicewars::protocol::parser::{parse_command, Command, CommandError};

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(path: &str) -> Result<Configuration, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    Configuration::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn usage_exit() -> ! {
    eprintln!("Usage: dicewars [--config FILE] [--seed N]");
    process::exit(1);
}

/// Runs the command loop, reading from stdin and writing to stdout.
fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let mut config = Configuration::default();
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else { usage_exit() };
                config = match load_config(path) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("{e}");
                        process::exit(1);
                    }
                };
            }
            "--seed" => {
                i += 1;
                seed = match args.get(i).map(|s| s.parse()) {
                    Some(Ok(s)) => Some(s),
                    _ => usage_exit(),
                };
            }
            "--help" | "-h" => {
                eprintln!("Usage: dicewars [--config FILE] [--seed N]");
                return;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                usage_exit();
            }
        }
        i += 1;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config);

    if let Err(e) = run(&mut engine, seed, stdin.lock(), &mut out) {
        eprintln!("io error: {e}");
        process::exit(1);
    }
}

fn run<R: BufRead, W: Write>(
    engine: &mut Engine,
    seed: Option<u64>,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    if seed.is_some() {
        engine.new_game(seed, out)?;
    }

    for line in input.lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Ok(c) => c,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                writeln!(out, "error {e}")?;
                out.flush()?;
                continue;
            }
        };

        match cmd {
            Command::NewGame { seed } => engine.new_game(seed, out)?,
            Command::Position { notation } => engine.set_position(&notation, out)?,
            Command::Select { row, col } => engine.handle_select(row, col, out)?,
            Command::Pick { id } => engine.handle_pick(id, out)?,
            Command::End => engine.handle_end(out)?,
            Command::Show => engine.handle_show(out)?,
            Command::Status => engine.handle_status(out)?,
            Command::Results => engine.handle_results(out)?,
            Command::Help => engine.handle_help(out)?,
            Command::Quit => break,
        }
        out.flush()?;
    }
    out.flush()
}
