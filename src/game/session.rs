//! Run lifecycle: Idle -> Running <-> Paused -> Ended -> (reset) -> Idle
//!
//! [`Game`] owns the rules engine and the state, and talks to its host only
//! through three injected collaborators: a [`Clock`] that delivers ticks, a
//! [`Store`] holding the high score and a [`Display`] to paint on. Every
//! method runs to completion synchronously; the host must not call `tick`
//! while another call is in progress, which a single-threaded event loop
//! guarantees.

use anyhow::Result;
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    action::{Command, Direction},
    config::GameConfig,
    engine::GameEngine,
    state::{EndReason, GameState, Phase},
};
use crate::clock::Clock;
use crate::metrics::GameMetrics;
use crate::render::Display;
use crate::store::Store;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, or paused
    Skipped,
    Moved { ate_food: bool },
    Ended(EndReason),
}

pub struct Game<C: Clock, S: Store, D: Display, R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    metrics: GameMetrics,
    clock: C,
    store: S,
    display: D,
}

impl<C: Clock, S: Store, D: Display> Game<C, S, D> {
    pub fn new(config: GameConfig, clock: C, store: S, display: D) -> Result<Self> {
        Self::with_engine(GameEngine::new(config), clock, store, display)
    }
}

impl<C: Clock, S: Store, D: Display, R: Rng> Game<C, S, D, R> {
    /// Load the high score, lay out the board and paint the first frame
    pub fn with_engine(mut engine: GameEngine<R>, clock: C, store: S, display: D) -> Result<Self> {
        let high_score = store.load_high_score().unwrap_or_else(|err| {
            log::warn!("Ignoring unreadable high score: {err}");
            0
        });

        let mut state = engine.reset();
        state.high_score = high_score;

        let mut game = Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            clock,
            store,
            display,
        };
        game.redraw()?;

        log::info!(
            "Game ready on a {}x{} grid, high score {}",
            game.state.grid_width,
            game.state.grid_height,
            high_score
        );
        Ok(game)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            Command::PlayAgain => self.play_again(),
            Command::Turn(direction) => {
                self.turn(direction);
                Ok(())
            }
        }
    }

    /// Idle -> Running. Ignored in any other phase; an ended run must be reset first.
    pub fn start(&mut self) -> Result<()> {
        if self.state.phase != Phase::Idle {
            return Ok(());
        }

        self.state.phase = Phase::Running;
        self.clock.start(self.engine.config().tick_interval());
        self.metrics.on_game_start();
        log::info!("Game started");

        self.redraw()
    }

    /// Running <-> Paused, stopping the clock while paused
    pub fn toggle_pause(&mut self) -> Result<()> {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                self.clock.stop();
                self.metrics.on_pause();
                log::debug!("Game paused");
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.clock.start(self.engine.config().tick_interval());
                self.metrics.on_resume();
                log::debug!("Game resumed");
            }
            Phase::Idle | Phase::Ended => return Ok(()),
        }

        self.redraw()
    }

    /// Any phase -> Idle with a fresh snake, food and score
    pub fn reset(&mut self) -> Result<()> {
        self.clock.stop();

        let high_score = self.state.high_score;
        self.state = self.engine.reset();
        self.state.high_score = high_score;
        self.metrics.on_reset();
        log::info!("Game reset");

        self.redraw()
    }

    pub fn play_again(&mut self) -> Result<()> {
        self.reset()
    }

    /// Queue a turn for the next tick.
    ///
    /// Only turns at right angles to the direction the snake is actually
    /// moving are accepted, so several key presses within one tick can never
    /// add up to a reversal. Returns whether the turn was queued.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        if !self.state.snake.direction.is_orthogonal(direction) {
            return false;
        }

        self.state.pending_direction = direction;
        true
    }

    /// Advance one step: move, check for collisions, then end the run or repaint
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.state.phase != Phase::Running {
            return Ok(TickOutcome::Skipped);
        }

        let info = self.engine.advance(&mut self.state);

        let end_reason = self
            .engine
            .check_collision(&self.state)
            .or(info.board_filled.then_some(EndReason::BoardFilled));

        if let Some(reason) = end_reason {
            self.end_run(reason)?;
            return Ok(TickOutcome::Ended(reason));
        }

        self.redraw()?;
        Ok(TickOutcome::Moved {
            ate_food: info.ate_food,
        })
    }

    pub fn redraw(&mut self) -> Result<()> {
        self.display.draw(&self.state, &self.metrics)
    }

    fn end_run(&mut self, reason: EndReason) -> Result<()> {
        self.state.phase = Phase::Ended;
        self.state.end_reason = Some(reason);
        self.clock.stop();
        self.metrics.on_game_over();

        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            self.state.new_best = true;
            if let Err(err) = self.store.save_high_score(self.state.score) {
                log::warn!("Failed to persist high score {}: {err}", self.state.score);
            }
        }

        log::info!(
            "Game over ({:?}) with score {} after {} steps",
            reason,
            self.state.score,
            self.state.steps
        );

        self.redraw()
    }
}
