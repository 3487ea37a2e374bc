use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

use super::renderer::Renderer;
use crate::game::{GameState, Palette};
use crate::metrics::GameMetrics;

/// A passive surface the game paints itself onto
pub trait Display {
    fn draw(&mut self, state: &GameState, metrics: &GameMetrics) -> Result<()>;
}

/// Full-screen terminal surface
///
/// Raw mode and the alternate screen are entered on construction and left
/// again by [`TerminalDisplay::restore`] or on drop, whichever comes first.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    active: bool,
}

impl TerminalDisplay {
    pub fn enter(palette: &Palette) -> Result<Self> {
        let renderer = Renderer::new(palette).context("Invalid colour palette")?;

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = stderr();
        execute!(out, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(out);

        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stderr(), LeaveAlternateScreen);
                return Err(err).context("Failed to create terminal");
            }
        };

        // Dropping the display from here on restores the terminal.
        let mut display = Self {
            terminal,
            renderer,
            active: true,
        };
        display
            .terminal
            .hide_cursor()
            .context("Failed to hide cursor")?;
        display
            .terminal
            .clear()
            .context("Failed to clear terminal")?;

        Ok(display)
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal
            .show_cursor()
            .context("Failed to show cursor")?;
        Ok(())
    }
}

impl Display for TerminalDisplay {
    fn draw(&mut self, state: &GameState, metrics: &GameMetrics) -> Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, state, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("Failed to restore terminal: {err:#}");
        }
    }
}

/// Display that keeps the last frame's state instead of painting it
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub frames: Vec<GameState>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&GameState> {
        self.frames.last()
    }
}

impl Display for RecordingDisplay {
    fn draw(&mut self, state: &GameState, _metrics: &GameMetrics) -> Result<()> {
        self.frames.push(state.clone());
        Ok(())
    }
}
