//! Headless self-play training
//!
//! Runs a fixed number of episodes back to back with no terminal output
//! besides logging, training the predictor after each one.
//!
//! # Example
//!
//! ```rust,no_run
//! use neural_snake::agent::{TrainingBackend, default_device};
//! use neural_snake::modes::{TrainConfig, TrainMode};
//!
//! let config = TrainConfig::new(500);
//! let mut train_mode = TrainMode::<TrainingBackend>::new(config, default_device())?;
//! let stats = train_mode.run();
//! println!("{}", stats.format_summary());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Result, bail};
use burn::tensor::backend::AutodiffBackend;
use tracing::info;

use crate::agent::{AgentSession, EpisodeSummary, PredictorConfig, TickOutcome};
use crate::game::GameConfig;
use crate::metrics::EpisodeStats;

/// Configuration for headless training
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Log rolling statistics every N episodes
    pub log_frequency: usize,

    /// Window for rolling averages
    pub stats_window: usize,

    pub game_config: GameConfig,

    pub predictor_config: PredictorConfig,
}

impl TrainConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            log_frequency: 100,
            stats_window: 100,
            game_config: GameConfig::agent(),
            predictor_config: PredictorConfig::default(),
        }
    }
}

pub struct TrainMode<B: AutodiffBackend> {
    session: AgentSession<B>,
    stats: EpisodeStats,
    config: TrainConfig,
}

impl<B: AutodiffBackend> TrainMode<B> {
    pub fn new(config: TrainConfig, device: B::Device) -> Result<Self> {
        // Without starvation a looping snake would never end its episode
        if config.game_config.starvation_limit.is_none() {
            bail!("Headless training requires a starvation limit");
        }
        if config.log_frequency == 0 {
            bail!("log_frequency must be at least 1");
        }

        let session = AgentSession::new(
            config.game_config.clone(),
            config.predictor_config.clone(),
            device,
        )?;

        Ok(Self {
            session,
            stats: EpisodeStats::new(config.stats_window),
            config,
        })
    }

    /// Play every configured episode and return the final statistics
    pub fn run(&mut self) -> &EpisodeStats {
        info!(
            episodes = self.config.num_episodes,
            grid_size = self.config.game_config.grid_size,
            learning_rate = self.config.predictor_config.learning_rate,
            "training started"
        );

        for episode in 1..=self.config.num_episodes {
            let summary = self.run_episode();
            self.stats.record(&summary);

            if episode % self.config.log_frequency == 0 {
                info!(
                    "[Episode {}/{}] {}",
                    episode,
                    self.config.num_episodes,
                    self.stats.format_summary()
                );
            }
        }

        info!(
            summary = %self.stats.format_summary(),
            fit_steps = self.session.predictor().fit_steps(),
            "training complete"
        );

        &self.stats
    }

    /// Tick until the current episode ends
    fn run_episode(&mut self) -> EpisodeSummary {
        loop {
            if let TickOutcome::Terminated(summary) = self.session.tick() {
                return summary;
            }
        }
    }
}
