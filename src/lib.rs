//! TUI Snake - keyboard-controlled Snake in the terminal
//!
//! This library provides:
//! - Core game rules and run lifecycle (game module)
//! - Tick scheduling behind a `Clock` trait (clock module)
//! - High score persistence behind a `Store` trait (store module)
//! - TUI rendering behind a `Display` trait (render module)
//! - Keyboard mapping (input module) and the interactive loop (modes module)

pub mod clock;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod store;
