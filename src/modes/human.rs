use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

use crate::clock::IntervalClock;
use crate::game::{Game, GameConfig, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Display, TerminalDisplay};
use crate::store::Store;

pub struct HumanMode<S: Store, D: Display> {
    game: Game<IntervalClock, S, D>,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: Store> HumanMode<S, TerminalDisplay> {
    /// Take over the terminal and lay out a new game
    pub fn launch(config: GameConfig, store: S) -> Result<Self> {
        let display = TerminalDisplay::enter(&config.palette)?;
        let game = Game::new(config, IntervalClock::new(), store, display)?;
        Ok(Self::new(game))
    }

    pub async fn run(&mut self) -> Result<()> {
        let result = self.run_game_loop().await;

        // Cleanup terminal
        self.game.display_mut().restore()?;

        result
    }
}

impl<S: Store, D: Display> HumanMode<S, D> {
    pub fn new(game: Game<IntervalClock, S, D>) -> Self {
        Self {
            game,
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub fn game(&self) -> &Game<IntervalClock, S, D> {
        &self.game
    }

    async fn run_game_loop(&mut self) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Keeps the run timer in the header moving between ticks
        let mut refresh_timer = interval(Duration::from_secs(1));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => log::warn!("Terminal event error: {err}"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only while the clock is started
                _ = self.game.clock_mut().next_tick() => {
                    let outcome = self.game.tick()?;
                    log::trace!("Tick: {outcome:?}");
                }

                _ = refresh_timer.tick() => {
                    if self.game.state().phase == Phase::Running {
                        self.game.redraw()?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        log::info!("Quitting");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                let action = self.input_handler.handle_key_event(key);
                self.apply(action)
            }
            Event::Resize(..) => self.game.redraw(),
            _ => Ok(()),
        }
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Command(command) => self.game.handle(command),
            KeyAction::Quit => {
                self.should_quit = true;
                Ok(())
            }
            KeyAction::None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::game::{Command, Direction};
    use crate::render::RecordingDisplay;
    use crate::store::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode<MemoryStore, RecordingDisplay> {
        let game = Game::new(
            GameConfig::default(),
            IntervalClock::new(),
            MemoryStore::default(),
            RecordingDisplay::default(),
        )
        .unwrap();
        HumanMode::new(game)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.game().state().phase, Phase::Idle);
        assert_eq!(mode.game().state().score, 0);
        assert!(!mode.should_quit);
    }

    #[tokio::test]
    async fn test_enter_starts_and_space_pauses() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(mode.game().state().phase, Phase::Running);
        assert!(mode.game().clock().is_running());

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(mode.game().state().phase, Phase::Paused);
        assert!(!mode.game().clock().is_running());
    }

    #[tokio::test]
    async fn test_arrow_queues_turn() {
        let mut mode = mode();
        mode.apply(KeyAction::Command(Command::Start)).unwrap();

        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.game().state().pending_direction, Direction::Up);
    }

    #[test]
    fn test_reset_and_quit() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.game().state().phase, Phase::Idle);

        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_resize_redraws() {
        let mut mode = mode();
        let frames = mode.game().display().frames.len();

        mode.handle_event(Event::Resize(100, 40)).unwrap();
        assert_eq!(mode.game().display().frames.len(), frames + 1);
    }
}
