use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{DEFAULT_GRID_SIZE, EngineConfig, MAX_GRID_SIZE, MIN_GRID_SIZE};
use grid_snake::game::{RunState, SimulationEngine};
use grid_snake::input::{GameInput, poll_input};
use grid_snake::renderer::{self, FrameInfo};
use grid_snake::scheduler::DeadlineScheduler;
use grid_snake::storage::FileStore;
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use grid_snake::ui::view::ShellView;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Longest wait for input while no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);

type TerminalEngine = SimulationEngine<DeadlineScheduler, StdRng, FileStore>;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side length of the square grid.
    #[arg(
        long = "grid-size",
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_SIZE)..=i64::from(MAX_GRID_SIZE))
    )]
    grid_size: u16,

    /// Seed for item placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Store high scores in this file instead of the platform data dir.
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    install_panic_hook();
    run(&cli)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(cli: &Cli) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut shell_rng = StdRng::from_entropy();
    let mut engine = new_engine(cli);
    let mut view = ShellView::from_engine(&engine);

    loop {
        for event in engine.drain_events() {
            view.apply(event, &mut shell_rng);
        }

        session.draw(|frame| {
            renderer::render(
                frame,
                FrameInfo {
                    view: &view,
                    grid: engine.config().grid,
                    state: engine.run_state(),
                    end_reason: engine.end_reason(),
                },
            );
        })?;

        let timeout = engine
            .scheduler()
            .time_until_due(Instant::now())
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));

        if let Some(game_input) = poll_input(timeout)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Confirm if engine.run_state() == RunState::Ended => {
                    engine = new_engine(cli);
                    view = ShellView::from_engine(&engine);
                }
                GameInput::Confirm | GameInput::Toggle => engine.toggle(),
                GameInput::Direction(direction) => engine.steer(direction),
            }
        }

        if engine.scheduler_mut().take_due(Instant::now()) {
            engine.step();
        }
    }

    Ok(())
}

fn new_engine(cli: &Cli) -> TerminalEngine {
    let config = if cli.grid_size == DEFAULT_GRID_SIZE {
        EngineConfig::default()
    } else {
        EngineConfig::with_grid_size(cli.grid_size)
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = match &cli.scores_file {
        Some(path) => FileStore::new(path),
        None => FileStore::open_default(),
    };

    log::info!("new run on {}x{} grid", config.grid.width, config.grid.height);
    SimulationEngine::new(config, DeadlineScheduler::new(), rng, store)
}
