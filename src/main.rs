//! Conquest -- a territory-conquest order engine.
//!
//! This binary reads driver commands from stdin and writes responses to
//! stdout. Diagnostics and the game log go to stderr through `tracing`;
//! set `RUST_LOG` to adjust verbosity. An optional first argument names a
//! JSON rules file.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use conquest::engine::Engine;
use conquest::protocol::parser::{parse_command, Command};
use conquest::report::TracingLog;
use conquest::rules::Rules;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let rules = match std::env::args().nth(1) {
        Some(path) => match Rules::load(Path::new(&path)) {
            Ok(rules) => rules,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Rules::default(),
    };

    let engine = match Engine::new(rules, Box::new(TracingLog)) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(engine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("output error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the main command loop until `quit` or end of input.
fn run(mut engine: Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Player { name } => {
                if let Err(e) = engine.add_player(&name) {
                    tracing::warn!("{}", e);
                }
            }
            Command::Territory { name, owner, armies } => {
                if let Err(e) = engine.add_territory(&name, &owner, armies) {
                    tracing::warn!("{}", e);
                }
            }
            Command::Order { raw } => {
                if let Err(e) = engine.issue_order(&raw) {
                    tracing::warn!("{}", e);
                }
            }
            Command::Orders { player } => {
                engine.handle_orders(&player, &mut out)?;
            }
            Command::Move { player, from, to } => match engine.move_order(&player, from, to) {
                Ok(true) => {}
                Ok(false) => tracing::warn!("move ignored: index out of range"),
                Err(e) => tracing::warn!("{}", e),
            },
            Command::Remove { player, index } => {
                if let Err(e) = engine.remove_order(&player, index) {
                    tracing::warn!("{}", e);
                }
            }
            Command::Execute => {
                engine.handle_execute(&mut out)?;
            }
            Command::Board => {
                engine.handle_board(&mut out)?;
            }
            Command::Quit => {
                break;
            }
        }
    }
    out.flush()
}
