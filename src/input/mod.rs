pub mod handler;

pub use handler::{InputContext, InputHandler, KeyAction, PlaybackSpeed};
