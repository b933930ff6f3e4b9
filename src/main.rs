//! Cube Blast command line runner.
//!
//! `play` runs a scripted sequence of clicks against a level file and prints
//! every event as a JSON line, ending with a snapshot. `serve` hosts one shared
//! game over TCP.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use cube_blast::adapter::{
    run_server, EventMessage, LevelFile, ServerConfig, ServerMessage, SnapshotMessage,
};
use cube_blast::core::GameState;
use cube_blast::types::Position;

#[derive(Debug, Parser)]
#[command(name = "cube-blast", version, about = "Tile-matching puzzle engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a level offline and print the resulting events as JSON lines.
    Play {
        /// Level file (JSON).
        #[arg(long)]
        level: PathBuf,
        /// Seed for random cubes and refills.
        #[arg(long, default_value_t = 1)]
        seed: u32,
        /// Cell to click, as `X,Y` with `Y = 0` the bottom row. Repeatable.
        #[arg(long = "click", value_parser = parse_click)]
        clicks: Vec<Position>,
    },
    /// Serve one shared game over TCP (line-delimited JSON).
    Serve {
        /// Overrides CUBE_BLAST_HOST.
        #[arg(long)]
        host: Option<String>,
        /// Overrides CUBE_BLAST_PORT.
        #[arg(long)]
        port: Option<u16>,
        /// Overrides CUBE_BLAST_SEED.
        #[arg(long)]
        seed: Option<u32>,
    },
}

fn parse_click(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {:?}", s))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {:?}", s))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {:?}", s))?;
    Ok(Position::new(x, y))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Play { level, seed, clicks } => play(level, seed, &clicks),
        Command::Serve { host, port, seed } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
            runtime.block_on(run_server(config, None))
        }
    }
}

fn play(path: PathBuf, seed: u32, clicks: &[Position]) -> Result<()> {
    let file = LevelFile::load(&path)?;
    let mut game = GameState::new(file.to_spec(), seed)
        .with_context(|| format!("cannot start {}", path.display()))?;
    info!("playing {} with seed {}", path.display(), seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for &pos in clicks {
        for event in game.click(pos)? {
            writeln!(out, "{}", serde_json::to_string(&EventMessage::from(&event))?)?;
        }
    }

    let snapshot = ServerMessage::Snapshot(SnapshotMessage::from(&game.snapshot()));
    writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
    Ok(())
}
