//! Core game logic module for Snake
//!
//! This module contains all the game rules and the run lifecycle without any
//! terminal, timer or filesystem dependencies; those are injected through the
//! [`Clock`](crate::clock::Clock), [`Store`](crate::store::Store) and
//! [`Display`](crate::render::Display) traits.

pub mod action;
pub mod config;
pub mod engine;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{ConfigError, GameConfig, Palette, parse_hex_color};
pub use engine::{GameEngine, StepInfo};
pub use session::{Game, TickOutcome};
pub use state::{EndReason, GameState, Phase, Position, Snake};
