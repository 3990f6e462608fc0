//! Self-play episode loop
//!
//! One [`AgentSession`] owns the engine, the live game state, the predictor
//! and the move log. Each tick encodes the state, asks the predictor for a
//! relative move and commits it. When the episode ends the logged feature
//! vectors are labelled in hindsight and replayed through `fit`, oldest
//! first, before the board is reset for the next generation.

use anyhow::{Context, Result};
use burn::tensor::backend::AutodiffBackend;
use tracing::{debug, info};

use super::config::PredictorConfig;
use super::features::{FeatureVector, encode_features};
use super::heuristic::expected_move;
use super::predictor::Predictor;
use crate::game::{
    Action, GameConfig, GameEngine, GameState, RelativeMove, StepInfo, TerminationCause,
};

/// What a finished episode looked like, and how training on it went
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// Generation number of the episode that just ended (0-based)
    pub generation: usize,
    pub cause: Option<TerminationCause>,
    pub score: u32,
    /// Ticks played, including the fatal one
    pub ticks: u32,
    pub length: usize,
    /// Number of logged vectors replayed through `fit`
    pub samples: usize,
    /// Mean pre-step loss over the replay, 0.0 when nothing was replayed
    pub mean_loss: f32,
}

/// Result of a single session tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The snake moved and is still alive
    Running(StepInfo),
    /// The episode ended; the predictor has been trained and the board reset
    Terminated(EpisodeSummary),
}

/// Drives self-play episodes and trains the predictor between them
pub struct AgentSession<B: AutodiffBackend> {
    engine: GameEngine,
    state: GameState,
    predictor: Predictor<B>,
    move_log: Vec<FeatureVector>,
    generation: usize,
    last_summary: Option<EpisodeSummary>,
}

impl<B: AutodiffBackend> AgentSession<B> {
    pub fn new(
        game_config: GameConfig,
        predictor_config: PredictorConfig,
        device: B::Device,
    ) -> Result<Self> {
        game_config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid game configuration")?;
        let predictor = Predictor::new(predictor_config, device)?;

        info!(
            grid_size = game_config.grid_size,
            starvation_limit = ?game_config.starvation_limit,
            seed = ?game_config.seed,
            "agent session started"
        );

        let mut engine = GameEngine::new(game_config);
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            predictor,
            move_log: Vec::new(),
            generation: 0,
            last_summary: None,
        })
    }

    /// Play one tick with the predictor's move
    pub fn tick(&mut self) -> TickOutcome {
        let features = encode_features(&self.state);
        let mv = self.predictor.predict(&features);
        self.commit(features, mv)
    }

    /// Play one tick with a move chosen by the caller
    ///
    /// The tick is logged and trained on exactly like a predicted one.
    pub fn tick_with_move(&mut self, mv: RelativeMove) -> TickOutcome {
        let features = encode_features(&self.state);
        self.commit(features, mv)
    }

    fn commit(&mut self, features: FeatureVector, mv: RelativeMove) -> TickOutcome {
        self.move_log.push(features);

        let result = self.engine.step(&mut self.state, Action::Turn(mv));
        if !result.terminated {
            return TickOutcome::Running(result.info);
        }

        TickOutcome::Terminated(self.finish_episode(result.info.termination))
    }

    /// Replay the move log through the predictor and start a new episode
    fn finish_episode(&mut self, cause: Option<TerminationCause>) -> EpisodeSummary {
        let samples = self.move_log.len();
        let mut total_loss = 0.0;
        for features in self.move_log.drain(..) {
            let label = expected_move(&features);
            total_loss += self.predictor.fit(&features, label);
        }

        let summary = EpisodeSummary {
            generation: self.generation,
            cause,
            score: self.state.score,
            ticks: self.state.steps,
            length: self.state.snake.len(),
            samples,
            mean_loss: if samples == 0 {
                0.0
            } else {
                total_loss / samples as f32
            },
        };

        debug!(
            generation = summary.generation,
            cause = ?summary.cause,
            score = summary.score,
            ticks = summary.ticks,
            mean_loss = summary.mean_loss,
            "episode finished"
        );

        self.generation += 1;
        self.state = self.engine.reset();
        self.last_summary = Some(summary.clone());
        summary
    }

    /// Abandon the current episode without training on it
    pub fn restart(&mut self) {
        debug!(
            discarded = self.move_log.len(),
            "episode restarted, move log discarded"
        );
        self.move_log.clear();
        self.state = self.engine.reset();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of finished episodes
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn move_log(&self) -> &[FeatureVector] {
        &self.move_log
    }

    pub fn predictor(&self) -> &Predictor<B> {
        &self.predictor
    }

    pub fn last_summary(&self) -> Option<&EpisodeSummary> {
        self.last_summary.as_ref()
    }

    pub fn game_config(&self) -> &GameConfig {
        self.engine.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{TrainingBackend, default_device};
    use crate::game::{Direction, Position};

    fn create_session(mut config: GameConfig) -> AgentSession<TrainingBackend> {
        config.seed = Some(42);
        AgentSession::new(config, PredictorConfig::default(), default_device()).unwrap()
    }

    #[test]
    fn test_session_starts_at_centre() {
        let session = create_session(GameConfig::agent());

        assert_eq!(session.state().snake.head(), Position::new(10, 10));
        assert_eq!(session.state().snake.heading, None);
        assert_eq!(session.state().snake.len(), 1);
        assert_eq!(session.generation(), 0);
        assert!(session.move_log().is_empty());
        assert!(session.last_summary().is_none());
    }

    #[test]
    fn test_invalid_game_config_is_rejected() {
        let mut config = GameConfig::agent();
        config.grid_size = 0;
        let session =
            AgentSession::<TrainingBackend>::new(config, PredictorConfig::default(), default_device());
        assert!(session.is_err());
    }

    #[test]
    fn test_forward_run_eats_food() {
        let mut session = create_session(GameConfig::agent());
        session.state.food = Position::new(10, 5);

        let outcome = session.tick_with_move(RelativeMove::Forward);
        assert!(matches!(outcome, TickOutcome::Running(_)));
        assert_eq!(session.state().snake.heading, Some(Direction::Up));
        assert_eq!(session.state().snake.head(), Position::new(10, 9));

        let mut last = outcome;
        for _ in 0..4 {
            last = session.tick_with_move(RelativeMove::Forward);
        }

        match last {
            TickOutcome::Running(info) => assert!(info.ate_food),
            TickOutcome::Terminated(summary) => panic!("episode ended early: {summary:?}"),
        }
        let state = session.state();
        assert_eq!(state.snake.head(), Position::new(10, 5));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);
        assert_eq!(state.ticks_since_food, 0);
        assert_eq!(session.move_log().len(), 5);
    }

    #[test]
    fn test_wall_ends_episode_and_trains() {
        let mut session = create_session(GameConfig::agent());
        session.state.food = Position::new(0, 0);

        // Ten forwards reach the top row, the eleventh leaves the grid
        for tick in 0..10 {
            let outcome = session.tick_with_move(RelativeMove::Forward);
            assert!(matches!(outcome, TickOutcome::Running(_)), "tick {tick}");
        }
        assert_eq!(session.state().snake.head(), Position::new(10, 0));

        let summary = match session.tick_with_move(RelativeMove::Forward) {
            TickOutcome::Terminated(summary) => summary,
            TickOutcome::Running(_) => panic!("expected wall collision"),
        };

        assert_eq!(summary.cause, Some(TerminationCause::Wall));
        assert_eq!(summary.generation, 0);
        assert_eq!(summary.samples, 11);
        assert_eq!(summary.ticks, 11);
        assert!(summary.mean_loss.is_finite());

        assert!(session.move_log().is_empty());
        assert_eq!(session.predictor().fit_steps(), 11);
        assert_eq!(session.generation(), 1);
        assert_eq!(session.last_summary(), Some(&summary));

        let state = session.state();
        assert!(state.is_alive);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.snake.heading, None);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks_since_food, 0);
    }

    #[test]
    fn test_starvation_ends_episode() {
        let mut session = create_session(GameConfig::agent());
        session.state.food = Position::new(0, 0);

        // Right turns trace a 2x2 square that never reaches the food
        for tick in 1..75 {
            let outcome = session.tick_with_move(RelativeMove::Right);
            assert!(matches!(outcome, TickOutcome::Running(_)), "tick {tick}");
        }

        match session.tick_with_move(RelativeMove::Right) {
            TickOutcome::Terminated(summary) => {
                assert_eq!(summary.cause, Some(TerminationCause::Starvation));
                assert_eq!(summary.samples, 75);
            }
            TickOutcome::Running(_) => panic!("expected starvation on tick 75"),
        }
    }

    #[test]
    fn test_restart_discards_log() {
        let mut session = create_session(GameConfig::agent());
        session.state.food = Position::new(0, 0);

        for _ in 0..3 {
            session.tick_with_move(RelativeMove::Left);
        }
        assert_eq!(session.move_log().len(), 3);

        session.restart();

        assert!(session.move_log().is_empty());
        assert_eq!(session.generation(), 0);
        assert_eq!(session.predictor().fit_steps(), 0);
        assert_eq!(session.state().snake.head(), Position::new(10, 10));
    }

    #[test]
    fn test_predicted_play_reaches_termination() {
        let mut session = create_session(GameConfig::small());

        let mut finished = None;
        for _ in 0..10_000 {
            if let TickOutcome::Terminated(summary) = session.tick() {
                finished = Some(summary);
                break;
            }
            let head = session.state().snake.head();
            assert!(session.state().is_in_bounds(head));
        }

        let summary = finished.expect("episode should end within the tick limit");
        assert!(summary.cause.is_some());
        assert_eq!(summary.samples, summary.ticks as usize);
        assert_eq!(session.generation(), 1);
        assert!(session.move_log().is_empty());
    }
}
