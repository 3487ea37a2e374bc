pub mod display;
pub mod renderer;

pub use display::{Display, RecordingDisplay, TerminalDisplay};
pub use renderer::{BoardColors, Renderer};
