//! Top-level configuration file
//!
//! A JSON document with optional `game` and `predictor` sections; missing
//! sections and fields fall back to the agent defaults.
//!
//! ```json
//! {
//!   "game": { "grid_size": 16, "start": { "x": 8, "y": 8 }, "starvation_limit": 100 },
//!   "predictor": { "learning_rate": 0.0005 }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::agent::PredictorConfig;
use crate::game::GameConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub predictor: PredictorConfig,
}

impl AppConfig {
    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.game
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid game configuration")?;
        self.predictor
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid predictor configuration")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = write_config(
            r#"{
                "game": { "grid_size": 16, "start": { "x": 8, "y": 8 } },
                "predictor": { "learning_rate": 0.0005 }
            }"#,
        );

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.game.grid_size, 16);
        assert_eq!(config.game.start, Position::new(8, 8));
        assert_eq!(config.game.starvation_limit, Some(75));
        assert_eq!(config.predictor.learning_rate, 5e-4);
        assert_eq!(config.predictor.hidden_sizes, [256, 512, 256]);
    }

    #[test]
    fn test_empty_object_is_default() {
        let file = write_config("{}");
        assert_eq!(AppConfig::load(file.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_config(r#"{ "game": { "grid_size": 4, "start": { "x": 9, "y": 9 } } }"#);
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("outside"));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_config("{ not json");
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
