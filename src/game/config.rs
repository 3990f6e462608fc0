use serde::{Deserialize, Serialize};

use super::{action::Direction, state::Position};

/// Largest accepted grid side; keeps cell coordinates well inside `i32`
pub const MAX_GRID_SIZE: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Cell the snake head starts on
    pub start: Position,
    /// Heading at the start of a game; `None` waits for the first move
    pub initial_heading: Option<Direction>,
    /// Ticks without food before the game ends; `None` disables starvation
    pub starvation_limit: Option<u32>,
    /// Milliseconds between game ticks in the terminal modes
    pub tick_interval_ms: u64,
    /// Seed for food placement; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::agent()
    }
}

impl GameConfig {
    /// Agent self-play: centre start, zero heading, starvation after 75 ticks
    pub fn agent() -> Self {
        Self {
            grid_size: 20,
            start: Position::new(10, 10),
            initial_heading: None,
            starvation_limit: Some(75),
            tick_interval_ms: 60,
            seed: None,
        }
    }

    /// Keyboard play: start at (5, 5) moving right, no starvation
    pub fn manual() -> Self {
        Self {
            grid_size: 20,
            start: Position::new(5, 5),
            initial_heading: Some(Direction::Right),
            starvation_limit: None,
            tick_interval_ms: 100,
            seed: None,
        }
    }

    /// Resize the grid, moving the start cell to the centre for agent play
    /// and clamping it inside the grid otherwise
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        if self.initial_heading.is_none() {
            let centre = (size / 2) as i32;
            self.start = Position::new(centre, centre);
        } else {
            let max = size.saturating_sub(1) as i32;
            self.start = Position::new(self.start.x.min(max), self.start.y.min(max));
        }
        self
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::agent().with_grid_size(10)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 2 {
            return Err(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            ));
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "grid_size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            ));
        }

        let size = self.grid_size as i32;
        if !(0..size).contains(&self.start.x) || !(0..size).contains(&self.start.y) {
            return Err(format!(
                "start {:?} is outside the {}x{} grid",
                self.start, self.grid_size, self.grid_size
            ));
        }

        if self.starvation_limit == Some(0) {
            return Err("starvation_limit must be at least 1".to_string());
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.start, Position::new(10, 10));
        assert_eq!(config.initial_heading, None);
        assert_eq!(config.starvation_limit, Some(75));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_manual_config() {
        let config = GameConfig::manual();
        assert_eq!(config.start, Position::new(5, 5));
        assert_eq!(config.initial_heading, Some(Direction::Right));
        assert_eq!(config.starvation_limit, None);
        assert_eq!(config.tick_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_grid_size() {
        let config = GameConfig::agent().with_grid_size(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.start, Position::new(7, 7));

        let config = GameConfig::manual().with_grid_size(4);
        assert_eq!(config.start, Position::new(3, 3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = GameConfig::agent();
        config.grid_size = 1;
        assert!(config.validate().is_err());

        let mut config = GameConfig::agent();
        config.start = Position::new(20, 3);
        assert!(config.validate().is_err());

        let mut config = GameConfig::agent();
        config.starvation_limit = Some(0);
        assert!(config.validate().is_err());

        let mut config = GameConfig::agent();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let mut config = GameConfig::agent();
        config.grid_size = MAX_GRID_SIZE;
        assert!(config.validate().is_ok());

        config.grid_size = MAX_GRID_SIZE + 1;
        assert!(config.validate().is_err());

        // Would wrap to 1 as an i32 and pass the start-cell check
        config.grid_size = usize::try_from((1u64 << 32) + 1).unwrap_or(usize::MAX);
        config.start = Position::new(0, 0);
        let err = config.validate().unwrap_err();
        assert!(err.contains("at most"));
    }
}
