use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use neural_snake::agent::{TrainingBackend, default_device};
use neural_snake::config::AppConfig;
use neural_snake::game::GameConfig;
use neural_snake::modes::{AgentMode, HumanMode, TrainConfig, TrainMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neural_snake")]
#[command(version, about = "Snake with an agent that teaches itself from hindsight labels")]
struct Cli {
    /// Game mode
    #[arg(long, value_enum, default_value = "agent")]
    mode: Mode,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Number of episodes to play in train mode
    #[arg(long, default_value = "1000")]
    episodes: usize,

    /// Log statistics every N episodes in train mode
    #[arg(long, default_value = "100")]
    log_frequency: usize,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks without food before an episode ends
    #[arg(long)]
    starvation_limit: Option<u32>,

    /// JSON file with `game` and `predictor` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal modes log nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch the agent play and learn between episodes
    Agent,
    /// Train the agent headless as fast as possible
    Train,
}

/// Install the tracing subscriber
///
/// The terminal modes own the screen, so they only log when given a file.
fn init_tracing(mode: Mode, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (log_file, mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Train) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        (None, _) => {}
    }

    Ok(())
}

/// Apply CLI overrides on top of a base game configuration
fn apply_overrides(mut game: GameConfig, cli: &Cli) -> GameConfig {
    if let Some(size) = cli.grid_size {
        game = game.with_grid_size(size);
    }
    if cli.seed.is_some() {
        game.seed = cli.seed;
    }
    if cli.starvation_limit.is_some() {
        game.starvation_limit = cli.starvation_limit;
    }
    game
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.mode, cli.log_file.as_deref())?;

    let app_config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.mode {
        Mode::Human => {
            let config = apply_overrides(GameConfig::manual(), &cli);
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Agent => {
            let config = apply_overrides(app_config.game, &cli);
            let mut agent_mode = AgentMode::<TrainingBackend>::new(
                config,
                app_config.predictor,
                default_device(),
            )?;
            agent_mode.run().await?;
        }
        Mode::Train => {
            let mut train_config = TrainConfig::new(cli.episodes);
            train_config.log_frequency = cli.log_frequency;
            train_config.game_config = apply_overrides(app_config.game, &cli);
            train_config.predictor_config = app_config.predictor;

            let mut train_mode = TrainMode::<TrainingBackend>::new(train_config, default_device())?;
            let stats = train_mode.run();

            println!("\nTraining complete!");
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}
