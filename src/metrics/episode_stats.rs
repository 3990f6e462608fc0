//! Rolling statistics over self-play episodes
//!
//! Tracks scores, episode lengths and mean replay loss over a fixed window,
//! plus lifetime totals and the best score seen.

use std::collections::VecDeque;

use crate::agent::EpisodeSummary;

/// Episode statistics with rolling averages
///
/// # Example
///
/// ```rust
/// use neural_snake::agent::EpisodeSummary;
/// use neural_snake::metrics::EpisodeStats;
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record(&EpisodeSummary {
///     generation: 0,
///     cause: None,
///     score: 4,
///     ticks: 120,
///     length: 5,
///     samples: 120,
///     mean_loss: 0.21,
/// });
///
/// assert_eq!(stats.best_score(), 4);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    scores: VecDeque<u32>,
    lengths: VecDeque<u32>,
    losses: VecDeque<f32>,
    total_episodes: usize,
    total_ticks: u64,
    best_score: u32,
    window_size: usize,
}

impl EpisodeStats {
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            scores: VecDeque::with_capacity(window_size),
            lengths: VecDeque::with_capacity(window_size),
            losses: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_ticks: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record a finished episode
    pub fn record(&mut self, summary: &EpisodeSummary) {
        Self::push_deque(&mut self.scores, summary.score, self.window_size);
        Self::push_deque(&mut self.lengths, summary.ticks, self.window_size);
        // Episodes with nothing to replay have no loss to report
        if summary.samples > 0 {
            Self::push_deque(&mut self.losses, summary.mean_loss, self.window_size);
        }

        self.total_episodes += 1;
        self.total_ticks += u64::from(summary.ticks);
        self.best_score = self.best_score.max(summary.score);
    }

    pub fn mean_score(&self) -> f32 {
        Self::mean(self.scores.iter().map(|&s| s as f32), self.scores.len())
    }

    /// Mean episode length in ticks
    pub fn mean_length(&self) -> f32 {
        Self::mean(self.lengths.iter().map(|&l| l as f32), self.lengths.len())
    }

    pub fn mean_loss(&self) -> f32 {
        Self::mean(self.losses.iter().copied(), self.losses.len())
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Ticks: {} | Score: {:.2} | Best: {} | Len: {:.1} | Loss: {:.4}",
            self.total_episodes,
            self.total_ticks,
            self.mean_score(),
            self.best_score,
            self.mean_length(),
            self.mean_loss(),
        )
    }

    fn mean(values: impl Iterator<Item = f32>, count: usize) -> f32 {
        if count == 0 {
            0.0
        } else {
            values.sum::<f32>() / count as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
