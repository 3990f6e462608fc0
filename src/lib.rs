//! Neural Snake - Snake with a self-taught agent
//!
//! This library provides:
//! - Core game logic shared by keyboard and agent play (game module)
//! - Feature encoding, hindsight labels, the move predictor and the
//!   self-play episode loop (agent module)
//! - TUI rendering and key bindings (render, input modules)
//! - Episode statistics (metrics module)
//! - Manual, live agent and headless training modes (modes module)

pub mod agent;
pub mod config;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
