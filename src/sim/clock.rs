/// Fixed-rate tick pacing.
///
/// The loop asks `is_due(now)`; when a tick is not yet due it sleeps for
/// `remaining(now)` instead of spinning. Instants are passed in so the
/// pacing is testable without real time.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct FramePacer {
    delay: Duration,
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        FramePacer {
            delay: Duration::from_secs(1) / fps.max(1),
            last_tick: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The first tick is due immediately.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_tick {
            None => true,
            Some(t) => now.saturating_duration_since(t) >= self.delay,
        }
    }

    /// Time left until the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(t) => self.delay.saturating_sub(now.saturating_duration_since(t)),
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_one_over_fps() {
        assert_eq!(FramePacer::new(10).delay(), Duration::from_millis(100));
        assert_eq!(FramePacer::new(0).delay(), Duration::from_secs(1));
    }

    #[test]
    fn first_tick_is_immediate() {
        let p = FramePacer::new(10);
        let now = Instant::now();
        assert!(p.is_due(now));
        assert_eq!(p.remaining(now), Duration::ZERO);
    }

    #[test]
    fn gated_until_delay_elapses() {
        let mut p = FramePacer::new(10);
        let t0 = Instant::now();
        p.mark(t0);

        let early = t0 + Duration::from_millis(40);
        assert!(!p.is_due(early));
        assert_eq!(p.remaining(early), Duration::from_millis(60));

        let on_time = t0 + Duration::from_millis(100);
        assert!(p.is_due(on_time));
        assert_eq!(p.remaining(on_time), Duration::ZERO);

        assert!(p.is_due(t0 + Duration::from_millis(250)));
    }
}
