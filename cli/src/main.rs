use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cubesweeper_core::{CellCount, Coord, GameEngine};
use std::io;
use std::path::PathBuf;

mod command;
mod render;
mod session;
mod settings;

/// Minesweeper on a cubic grid, played from the terminal.
#[derive(Parser, Debug)]
#[command(name = "cubesweeper", version, about)]
struct Args {
    /// Edge length of the board
    #[arg(long)]
    size: Option<Coord>,

    /// Number of mines
    #[arg(long)]
    mines: Option<CellCount>,

    /// Seed for reproducible mine layouts
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with `size`, `mines` and `seed`, flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read JSON intents and write JSON events, one per line
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let overrides = settings::Overrides {
        size: args.size,
        mines: args.mines,
        seed: args.seed,
    };
    let config = settings::load(args.config.as_deref(), overrides)?;
    let mut engine = GameEngine::new(config).context("starting game")?;
    log::info!("Layout seed {:?}", engine.seed());

    let input = io::stdin().lock();
    let output = io::stdout().lock();
    if args.json {
        session::run_json(&mut engine, input, output)
    } else {
        session::run_text(&mut engine, input, output)
    }
}
