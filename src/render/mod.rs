pub mod renderer;

pub use renderer::{HudInfo, HudMode, Renderer};
