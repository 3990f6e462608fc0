//! Supervised self-play agent
//!
//! The snake's view of the board is reduced to a five-value
//! [`FeatureVector`], a small feed-forward [`Predictor`] picks a relative
//! move from it, and the [`AgentSession`] trains the predictor on
//! hindsight labels from [`expected_move`] after each episode.

pub mod backend;
pub mod config;
pub mod features;
pub mod heuristic;
pub mod network;
pub mod predictor;
pub mod session;

pub use backend::{TrainingBackend, default_device};
pub use config::PredictorConfig;
pub use features::{FEATURE_COUNT, FeatureVector, encode_features};
pub use heuristic::expected_move;
pub use network::{MoveNetwork, MoveNetworkConfig};
pub use predictor::Predictor;
pub use session::{AgentSession, EpisodeSummary, TickOutcome};
