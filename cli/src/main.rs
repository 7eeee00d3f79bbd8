use std::io;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{CellCount, Coord, Game, GameConfig, GameStatus, RandomMineGenerator};

mod render;
mod session;

/// Minesweeper in the terminal. Enter moves as `<column> <row> <free|mine>`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of mines, asked for interactively when omitted
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Board height in rows
    #[arg(long, default_value_t = GameConfig::DEFAULT_SIZE.0)]
    height: Coord,

    /// Board width in columns
    #[arg(long, default_value_t = GameConfig::DEFAULT_SIZE.1)]
    width: Coord,

    /// Seed for mine placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let mines = match args.mines {
        Some(mines) => mines,
        None => session::ask_mines(&mut input, &mut output)?,
    };
    let config = GameConfig::new((args.height, args.width), mines)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut game = Game::new(config, RandomMineGenerator::new(seed));
    log::info!("Starting {:?} with seed {}", game.config(), seed);

    let status = session::play(&mut game, &mut input, &mut output)?;
    if !matches!(status, GameStatus::Won | GameStatus::Lost) {
        log::info!("Game left unfinished");
    }
    Ok(())
}
