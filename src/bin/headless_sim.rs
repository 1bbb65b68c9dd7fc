//! Headless Dominion runner
//!
//! Runs a world to completion (or a tick limit) without a terminal view and
//! prints the final board, scoreboard and event tally. Optionally writes the
//! full snapshot as JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use dominion::core::error::Result;
use dominion::core::types::Point;
use dominion::core::RunConfig;
use dominion::render::scoreboard;
use dominion::render::text::{render_ansi, render_plain, render_scoreboard};
use dominion::setup::{self, SetupError};
use dominion::sim::{World, WorldSnapshot};

/// Tick limit when neither the config nor the flags set one
const DEFAULT_MAX_TICKS: u64 = 5000;

/// Headless Dominion runner
#[derive(Parser, Debug)]
#[command(name = "headless_sim")]
#[command(about = "Run a Dominion world without the terminal view and report the outcome")]
struct Args {
    /// TOML run configuration (seed, max_ticks, map)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map file with dimensions, positions and an optional literal grid
    #[arg(long)]
    map: Option<PathBuf>,

    /// Grid width in columns
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// Grid height in rows
    #[arg(long, default_value_t = 20)]
    height: i32,

    /// Starting position as row,column; repeat once per domain
    #[arg(long = "domain", value_parser = setup::parse_position_arg)]
    domains: Vec<Point>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks before stopping without a winner
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write the final snapshot as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Color the board with ANSI escapes
    #[arg(long)]
    color: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.max_ticks.is_some() {
        config.max_ticks = args.max_ticks;
    }
    if args.map.is_some() {
        config.map = args.map.clone();
    }
    config.validate()?;

    let setup = match &config.map {
        Some(path) => setup::load_map_file(path)?,
        None if args.domains.is_empty() => {
            return Err(SetupError::MissingField("--map or at least one --domain").into())
        }
        None => setup::from_flags(args.width, args.height, args.domains.clone())?,
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    let max_ticks = config.max_ticks.unwrap_or(DEFAULT_MAX_TICKS);

    println!("Starting Dominion run");
    println!("=====================");
    println!(
        "Map: {}x{}, {} domains, seed {}",
        setup.dimensions.width,
        setup.dimensions.height,
        setup.positions.len(),
        seed
    );
    println!("Tick limit: {}", max_ticks);
    println!();

    let mut world = World::new(&setup, ChaCha8Rng::seed_from_u64(seed));

    let start = Instant::now();
    let mut conquests = 0usize;
    while world.tick() < max_ticks {
        let summary = world.update();
        conquests += summary.conquests;
        if summary.winner.is_some() {
            break;
        }
    }
    let elapsed = start.elapsed();

    let board = if args.color {
        render_ansi(&world)
    } else {
        render_plain(&world)
    };
    print!("{}", board);
    println!();

    // Population figures are display noise, drawn from their own stream
    let mut display_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    print!(
        "{}",
        render_scoreboard(&scoreboard(&world, &mut display_rng), args.color)
    );
    println!();

    let snapshot = WorldSnapshot::capture(&world);
    println!("{}", snapshot.summary());
    println!("Tiles changed hands: {}", conquests);
    println!(
        "Actual time: {:.2}ms ({} ticks)",
        elapsed.as_secs_f64() * 1000.0,
        world.tick()
    );

    if let Some(path) = &args.output {
        std::fs::write(path, snapshot.to_json()?)?;
        println!("\nFull output written to {}", path.display());
    }

    Ok(())
}
