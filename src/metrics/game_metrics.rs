use std::time::{Duration, Instant};

/// Run timer and per-session counters shown in the header
pub struct GameMetrics {
    /// Set while the clock is ticking
    run_started: Option<Instant>,
    /// Time banked before the last pause
    banked: Duration,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: None,
            banked: Duration::ZERO,
            games_played: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.run_started = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        if let Some(started) = self.run_started.take() {
            self.banked += started.elapsed();
        }
    }

    pub fn on_resume(&mut self) {
        if self.run_started.is_none() {
            self.run_started = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self) {
        self.on_pause();
        self.games_played += 1;
    }

    pub fn on_reset(&mut self) {
        self.run_started = None;
        self.banked = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.banked
            + self
                .run_started
                .map(|started| started.elapsed())
                .unwrap_or(Duration::ZERO)
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_games_played() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_start();
        metrics.on_game_over();
        metrics.on_reset();
        metrics.on_game_start();
        metrics.on_game_over();

        assert_eq!(metrics.games_played, 2);
    }

    #[test]
    fn test_timer_frozen_while_paused() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.elapsed(), Duration::ZERO);

        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_pause();

        let paused_at = metrics.elapsed();
        assert!(paused_at >= Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(metrics.elapsed(), paused_at);

        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(5));
        assert!(metrics.elapsed() > paused_at);
    }

    #[test]
    fn test_reset_clears_timer() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(10));
        metrics.on_reset();

        assert_eq!(metrics.elapsed(), Duration::ZERO);
    }
}
