//! Dominion - Entry Point
//!
//! Builds a world from a map file, command-line flags or the interactive
//! prompt, then runs it in a full-screen terminal view until a single domain
//! holds the map or the user quits.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use dominion::core::error::Result;
use dominion::core::types::Point;
use dominion::core::RunConfig;
use dominion::render::{scoreboard, tui};
use dominion::setup::{self, Setup};
use dominion::sim::{World, WorldSnapshot};
use dominion::ui::{terminal, ViewCommand, ViewState};

/// Grid used when positions are given without dimensions
const DEFAULT_WIDTH: i32 = 60;
const DEFAULT_HEIGHT: i32 = 25;

/// Dominion - watch domains compete for a bordered grid
#[derive(Parser, Debug)]
#[command(name = "dominion")]
#[command(about = "Watch domains spread, fortify and fall on a bordered grid")]
struct Args {
    /// TOML run configuration (seed, frame_ms, max_ticks, map)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map file with dimensions, positions and an optional literal grid
    #[arg(long)]
    map: Option<PathBuf>,

    /// Grid width in columns
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in rows
    #[arg(long)]
    height: Option<i32>,

    /// Starting position as row,column; repeat once per domain
    #[arg(long = "domain", value_parser = setup::parse_position_arg)]
    domains: Vec<Point>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Stop advancing after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(frame_ms) = self.frame_ms {
            config.frame_ms = frame_ms;
        }
        if self.max_ticks.is_some() {
            config.max_ticks = self.max_ticks;
        }
        if self.map.is_some() {
            config.map = self.map.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn flag_setup(&self) -> Result<Option<Setup>> {
        if self.domains.is_empty() && self.width.is_none() && self.height.is_none() {
            return Ok(None);
        }
        let setup = setup::from_flags(
            self.width.unwrap_or(DEFAULT_WIDTH),
            self.height.unwrap_or(DEFAULT_HEIGHT),
            self.domains.clone(),
        )?;
        Ok(Some(setup))
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; keep them quiet so the alternate screen stays clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = args.run_config()?;

    let setup = match (&config.map, args.flag_setup()?) {
        (Some(path), _) => setup::load_map_file(path)?,
        (None, Some(setup)) => setup,
        (None, None) => setup::run_wizard(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, domains = setup.positions.len(), "Starting run");

    let mut world = World::new(&setup, ChaCha8Rng::seed_from_u64(seed));

    terminal::install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut view = Terminal::new(CrosstermBackend::new(stdout))?;

    let outcome = run(&mut view, &mut world, &config);

    terminal::restore()?;
    view.show_cursor()?;
    outcome?;

    println!("{}", WorldSnapshot::capture(&world).summary());
    println!("Seed: {}", seed);
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    world: &mut World,
    config: &RunConfig,
) -> Result<()> {
    let mut view = ViewState::new(Duration::from_millis(config.frame_ms));
    // Population noise must not touch the simulation's RNG
    let mut display_rng = ChaCha8Rng::from_entropy();
    let mut scores = scoreboard(world, &mut display_rng);
    let mut finished = false;

    loop {
        terminal.draw(|frame| tui::draw(frame, world, &scores, &view))?;

        let deadline = Instant::now() + view.frame;
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(remaining)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    view.apply(ViewCommand::from_key(key.code));
                }
            }
            if view.quit {
                return Ok(());
            }
        }

        if finished {
            continue;
        }

        let out_of_ticks = config.max_ticks.is_some_and(|limit| world.tick() >= limit);
        if world.winner().is_some() || out_of_ticks {
            finished = true;
            if out_of_ticks {
                view.log(format!("Stopped after {} ticks", world.tick()));
            }
            continue;
        }

        if view.should_advance() {
            let summary = world.update();
            tracing::debug!(
                tick = summary.tick,
                attempts = summary.attempts,
                conquests = summary.conquests,
                "Tick complete"
            );
            scores = scoreboard(world, &mut display_rng);
        }
    }
}
