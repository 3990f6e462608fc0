//! Live self-play in the terminal
//!
//! The agent steers itself; every finished episode is trained on and the
//! next one starts straight away, with no game-over screen.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart the episode without training on it
//! - 1-4: Speed control (slow, normal, fast, turbo)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use burn::tensor::backend::AutodiffBackend;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::info;

use super::terminal::{Tui, restore_terminal, setup_terminal};
use crate::agent::{AgentSession, PredictorConfig, TickOutcome};
use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction, PlaybackSpeed};
use crate::metrics::EpisodeStats;
use crate::render::{HudInfo, HudMode, Renderer};

pub struct AgentMode<B: AutodiffBackend> {
    session: AgentSession<B>,
    stats: EpisodeStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    speed: PlaybackSpeed,
}

impl<B: AutodiffBackend> AgentMode<B> {
    pub fn new(
        game_config: GameConfig,
        predictor_config: PredictorConfig,
        device: B::Device,
    ) -> Result<Self> {
        let session = AgentSession::new(game_config, predictor_config, device)?;

        Ok(Self {
            session,
            stats: EpisodeStats::new(100),
            renderer: Renderer::new(),
            input_handler: InputHandler::agent(),
            should_quit: false,
            paused: false,
            speed: PlaybackSpeed::Normal,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_agent_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;
        info!(summary = %self.stats.format_summary(), "agent mode closed");

        result
    }

    async fn run_agent_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.tick_timer();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                        self.draw(terminal)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.step();
                    }
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance the session one tick, recording the episode if it ended
    fn step(&mut self) {
        if let TickOutcome::Terminated(summary) = self.session.tick() {
            self.stats.record(&summary);
            info!(
                generation = summary.generation,
                cause = ?summary.cause,
                score = summary.score,
                best = self.stats.best_score(),
                mean_loss = summary.mean_loss,
                "episode trained"
            );
        }
    }

    fn tick_timer(&self) -> Interval {
        let normal = self.session.game_config().tick_interval_ms;
        let mut timer = interval(Duration::from_millis(self.speed.interval_ms(normal)));
        // Training at episode end can outlast several ticks
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        timer
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::Restart => self.session.restart(),
            KeyAction::SetSpeed(speed) => {
                self.speed = speed;
                *tick_timer = self.tick_timer();
            }
            _ => {}
        }
    }

    fn hud(&self) -> HudInfo {
        HudInfo {
            high_score: self.stats.best_score().max(self.session.state().score),
            mode: HudMode::Agent {
                generation: self.session.generation(),
                last_loss: self.session.last_summary().map(|s| s.mean_loss),
                paused: self.paused,
                speed: self.speed,
            },
        }
    }

    fn draw(&self, terminal: &mut Tui) -> Result<()> {
        let hud = self.hud();
        terminal
            .draw(|frame| self.renderer.render(frame, self.session.state(), &hud))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{TrainingBackend, default_device};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_mode() -> AgentMode<TrainingBackend> {
        let mut config = GameConfig::small();
        config.seed = Some(11);
        AgentMode::new(config, PredictorConfig::default(), default_device()).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_controls() {
        let mut mode = create_mode();
        let mut timer = mode.tick_timer();

        mode.handle_event(key(KeyCode::Char(' ')), &mut timer);
        assert!(mode.paused);
        mode.handle_event(key(KeyCode::Char(' ')), &mut timer);
        assert!(!mode.paused);

        mode.handle_event(key(KeyCode::Char('3')), &mut timer);
        assert_eq!(mode.speed, PlaybackSpeed::Fast);
        assert_eq!(timer.period(), Duration::from_millis(20));

        mode.handle_event(key(KeyCode::Char('q')), &mut timer);
        assert!(mode.should_quit);
    }

    #[test]
    fn test_episodes_feed_stats() {
        let mut mode = create_mode();

        while mode.stats.total_episodes() < 2 {
            mode.step();
        }

        assert_eq!(mode.session.generation(), 2);
        match mode.hud().mode {
            HudMode::Agent {
                generation,
                last_loss,
                ..
            } => {
                assert_eq!(generation, 2);
                assert!(last_loss.is_some());
            }
            HudMode::Manual { .. } => panic!("agent mode should show the agent HUD"),
        }
    }
}
