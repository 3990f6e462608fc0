use std::time::{Duration, Instant};

/// Per-game clock and best score for keyboard play
///
/// The clock stops when a game ends so the game-over panel shows the
/// length of the finished game.
pub struct GameMetrics {
    started: Instant,
    elapsed: Duration,
    running: bool,
    high_score: u32,
    games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            elapsed: Duration::ZERO,
            running: true,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the elapsed time while a game is in progress
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed = self.started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started = Instant::now();
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.tick();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
