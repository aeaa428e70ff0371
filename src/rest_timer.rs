use std::time::{Duration, Instant};

/// Countdown between sets. Polled by the UI each frame instead of sleeping.
#[derive(Debug, Clone)]
pub struct RestTimer {
    length: Duration,
    started: Option<Instant>,
}

impl RestTimer {
    pub fn new(length: Duration) -> Self {
        RestTimer { length, started: None }
    }

    pub fn length(&self) -> Duration {
        self.length
    }

    /// Starts (or restarts) the countdown from `now`.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn cancel(&mut self) {
        self.started = None;
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.started {
            Some(start) => self.length.saturating_sub(now.saturating_duration_since(start)),
            None => Duration::ZERO,
        }
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.started.is_some() && !self.remaining(now).is_zero()
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.started.is_some() && self.remaining(now).is_zero()
    }

    /// Whole seconds left, rounded up so the display never shows 0 while running.
    pub fn seconds_left(&self, now: Instant) -> u64 {
        let left = self.remaining(now);
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }

    pub fn fraction_elapsed(&self, now: Instant) -> f32 {
        if self.started.is_none() || self.length.is_zero() {
            return 0.0;
        }
        1.0 - self.remaining(now).as_secs_f32() / self.length.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer() {
        let timer = RestTimer::new(Duration::from_secs(60));
        let now = Instant::now();
        assert!(!timer.is_running(now));
        assert!(!timer.is_finished(now));
        assert_eq!(timer.remaining(now), Duration::ZERO);
        assert_eq!(timer.fraction_elapsed(now), 0.0);
    }

    #[test]
    fn counts_down_to_zero() {
        let mut timer = RestTimer::new(Duration::from_secs(60));
        let start = Instant::now();
        timer.start(start);
        assert_eq!(timer.seconds_left(start), 60);
        assert!(timer.is_running(start));

        let later = start + Duration::from_millis(20_500);
        assert_eq!(timer.seconds_left(later), 40);
        assert!(timer.is_running(later));

        let done = start + Duration::from_secs(61);
        assert_eq!(timer.remaining(done), Duration::ZERO);
        assert!(!timer.is_running(done));
        assert!(timer.is_finished(done));
        assert_eq!(timer.fraction_elapsed(done), 1.0);
    }

    #[test]
    fn cancel_stops_countdown() {
        let mut timer = RestTimer::new(Duration::from_secs(60));
        let start = Instant::now();
        timer.start(start);
        timer.cancel();
        let later = start + Duration::from_secs(5);
        assert!(!timer.is_running(later));
        assert!(!timer.is_finished(later));
    }

    #[test]
    fn restart_resets_deadline() {
        let mut timer = RestTimer::new(Duration::from_secs(30));
        let start = Instant::now();
        timer.start(start);
        let restart = start + Duration::from_secs(20);
        timer.start(restart);
        assert_eq!(timer.seconds_left(restart + Duration::from_secs(5)), 25);
    }
}
