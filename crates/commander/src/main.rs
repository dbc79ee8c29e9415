use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use charisma::{Attribute, Config, Session};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod dev;
mod render;

#[derive(Parser, Debug)]
#[command(name = "commander", about = "Lead a chess army that has opinions about your orders")]
struct Args {
    /// TOML file with optional [tuning], [services] and [game] sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for profile rolls and every in-game roll.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the Lichess and Ollama adapters entirely.
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Log filter such as `charisma=debug`. Falls back to RUST_LOG, then `warn`.
    #[arg(long)]
    log: Option<String>,

    /// Print each turn report as one JSON line.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // Narratives own stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let mut config = match &args.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.game.seed = args.seed;
    }
    if args.offline {
        config.services.enabled = false;
    }

    let mut session = Session::new(&config).context("starting session")?;
    if let Some((evaluation, dialogue)) = oracles::connect(&config.services) {
        session = session.with_evaluation(evaluation).with_dialogue(dialogue);
    }
    let (evaluation, dialogue) = session.service_names();
    info!(evaluation, dialogue, seed = ?config.game.seed, "session ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render::banner(&session))?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let text = line.trim();
        let words: Vec<&str> = text.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit" | "exit"] => break,
            ["board"] => writeln!(stdout, "{}", render::board(session.position()))?,
            ["status"] => writeln!(stdout, "{}", render::status(&session, None))?,
            ["status", attr] => match attr.parse::<Attribute>() {
                Ok(attr) => writeln!(stdout, "{}", render::status(&session, Some(attr)))?,
                Err(err) => writeln!(stdout, "{err}")?,
            },
            ["set", tag, attr, value] => {
                writeln!(stdout, "{}", dev::apply_setting(&mut session, tag, attr, value))?
            }
            _ => {
                let report = session.command(text);
                if args.json {
                    writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
                } else {
                    for narrative in report.lines() {
                        writeln!(stdout, "{narrative}")?;
                    }
                    writeln!(stdout, "[{} army: {}]", session.commander(), report.status)?;
                }
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod dev_tests;
