//! Clock primitives for simulated workflows
//!
//! Every simulated delay in the console is a deadline checked from the frame
//! loop. Nothing here sleeps; callers pass the current `Instant` so tests can
//! drive time explicitly.

use std::time::{Duration, Instant};

use rand::Rng;

/// One-shot deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay {
    started_at: Instant,
    due_at: Instant,
}

impl Delay {
    pub fn new(now: Instant, duration: Duration) -> Self {
        Self {
            started_at: now,
            due_at: now + duration,
        }
    }

    pub fn from_millis(now: Instant, millis: u64) -> Self {
        Self::new(now, Duration::from_millis(millis))
    }

    /// Whether the deadline has passed
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at
    }

    /// Fraction of the delay elapsed, 0.0 - 1.0
    pub fn progress(&self, now: Instant) -> f32 {
        let total = self.due_at.duration_since(self.started_at).as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
        (elapsed / total).clamp(0.0, 1.0)
    }
}

/// Random duration of `base_ms` plus up to `spread_ms`
pub fn jitter(rng: &mut impl Rng, base_ms: u64, spread_ms: u64) -> Duration {
    Duration::from_millis(base_ms + rng.random_range(0..=spread_ms))
}

/// Fixed periodic interval for data generators
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    next_at: Instant,
}

impl Ticker {
    pub fn new(now: Instant, interval: Duration) -> Self {
        Self {
            interval,
            next_at: now + interval,
        }
    }

    /// Returns true once per elapsed interval
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_at {
            return false;
        }
        self.next_at = now + self.interval;
        true
    }
}

/// Event reported by [`Stepper::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Entered the step with this index
    Advanced(usize),
    /// The last step completed
    Finished,
}

/// A sequence of steps, each lasting its own duration
#[derive(Debug, Clone)]
pub struct Stepper {
    durations: Vec<Duration>,
    current: usize,
    step_started: Instant,
}

impl Stepper {
    pub fn new(now: Instant, durations: Vec<Duration>) -> Self {
        Self {
            durations,
            current: 0,
            step_started: now,
        }
    }

    /// Index of the step in progress (equals `len()` once finished)
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.durations.len()
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.durations.len()
    }

    /// Fraction of steps completed
    pub fn progress(&self) -> f32 {
        if self.durations.is_empty() {
            return 1.0;
        }
        self.current as f32 / self.durations.len() as f32
    }

    /// Advance at most one step
    pub fn poll(&mut self, now: Instant) -> Option<StepEvent> {
        let duration = *self.durations.get(self.current)?;
        if now < self.step_started + duration {
            return None;
        }

        self.step_started += duration;
        self.current += 1;

        if self.is_finished() {
            Some(StepEvent::Finished)
        } else {
            Some(StepEvent::Advanced(self.current))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn delay_becomes_due_after_duration() {
        let start = Instant::now();
        let delay = Delay::from_millis(start, 2000);

        assert!(!delay.is_due(start));
        assert!(!delay.is_due(start + Duration::from_millis(1999)));
        assert!(delay.is_due(start + Duration::from_millis(2000)));
        assert_eq!(delay.progress(start + Duration::from_millis(1000)), 0.5);
    }

    #[test]
    fn ticker_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(start, Duration::from_millis(1500));

        assert!(!ticker.poll(start + Duration::from_millis(1000)));
        assert!(ticker.poll(start + Duration::from_millis(1500)));
        assert!(!ticker.poll(start + Duration::from_millis(2000)));
        assert!(ticker.poll(start + Duration::from_millis(3000)));
    }

    #[test]
    fn stepper_walks_every_step_then_finishes() {
        let start = Instant::now();
        let step = Duration::from_millis(100);
        let mut stepper = Stepper::new(start, vec![step; 3]);

        assert_eq!(stepper.poll(start + Duration::from_millis(50)), None);
        assert_eq!(stepper.poll(start + step), Some(StepEvent::Advanced(1)));
        assert_eq!(stepper.poll(start + step * 2), Some(StepEvent::Advanced(2)));
        assert_eq!(stepper.poll(start + step * 3), Some(StepEvent::Finished));
        assert!(stepper.is_finished());
        assert_eq!(stepper.poll(start + step * 10), None);
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let d = jitter(&mut rng, 1000, 1000);
            assert!(d >= Duration::from_millis(1000) && d <= Duration::from_millis(2000));
        }
    }
}
