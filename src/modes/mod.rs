pub mod agent;
pub mod human;
pub mod terminal;
pub mod train;

pub use agent::AgentMode;
pub use human::HumanMode;
pub use train::{TrainConfig, TrainMode};
