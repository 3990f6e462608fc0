//! Predictor hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the move predictor
///
/// # Example
///
/// ```rust
/// use neural_snake::agent::PredictorConfig;
///
/// let config = PredictorConfig {
///     learning_rate: 5e-4,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Width of the input feature vector
    ///
    /// Default: 5
    pub input_size: usize,

    /// Widths of the three hidden layers
    ///
    /// Default: [256, 512, 256]
    pub hidden_sizes: [usize; 3],

    /// Number of move classes (left, forward, right)
    ///
    /// Default: 3
    pub num_moves: usize,

    /// Learning rate for the Adam optimizer
    ///
    /// Default: 1e-3
    pub learning_rate: f64,
}

impl PredictorConfig {
    /// Validate configuration parameters
    ///
    /// `input_size` and `num_moves` are fixed by the feature encoder and the
    /// move set, so only those exact values are accepted.
    pub fn validate(&self) -> Result<(), String> {
        if self.input_size != super::features::FEATURE_COUNT {
            return Err(format!(
                "input_size must be {}, got {}",
                super::features::FEATURE_COUNT,
                self.input_size
            ));
        }

        if self.num_moves != 3 {
            return Err(format!("num_moves must be 3, got {}", self.num_moves));
        }

        if let Some(width) = self.hidden_sizes.iter().find(|&&w| w == 0) {
            return Err(format!("hidden layer widths must be positive, got {width}"));
        }

        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            input_size: 5,
            hidden_sizes: [256, 512, 256],
            num_moves: 3,
            learning_rate: 1e-3,
        }
    }
}
