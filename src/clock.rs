//! Tick scheduling
//!
//! The game decides *when* the clock runs (start, pause, resume, end); the
//! host decides *how* ticks are delivered. [`IntervalClock`] drives a real
//! terminal session on tokio timers, [`ManualClock`] lets tests step time by
//! hand.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// A periodic timer the game can start and stop
pub trait Clock {
    /// Begin ticking every `period`, replacing any running timer
    fn start(&mut self, period: Duration);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Tokio-backed clock
///
/// The active timer lives in its own handle; stopping drops it and starting
/// builds a fresh one, so a resumed game waits a full period before moving.
#[derive(Debug, Default)]
pub struct IntervalClock {
    interval: Option<Interval>,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve on the next tick; never resolves while stopped
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Clock for IntervalClock {
    fn start(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}

/// Clock that only records what it was asked to do
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualClock {
    pub period: Option<Duration>,
    pub starts: usize,
    pub stops: usize,
}

impl Clock for ManualClock {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.period = None;
        self.stops += 1;
    }

    fn is_running(&self) -> bool {
        self.period.is_some()
    }
}
