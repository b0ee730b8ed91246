//! Elevation lab - Scripted root escalation with a timestamped console

use std::time::Instant;

use rand::Rng;

use super::timer::{jitter, StepEvent, Stepper};

pub const ELEVATION_STEPS: &[&str] = &[
    "Initializing Duplex Elevation Protocol...",
    "Bypassing locked bootloader verification...",
    "Injecting temporary SU binary to /sbin...",
    "Patching kernel image with dm-verity disabled...",
    "Remounting /system as read-write...",
    "Updating secure enclave permissions...",
    "Finalizing root shell access...",
];

pub const ELEVATION_SUCCESS: &str = "SUCCESS: SYSTEM PRIVILEGES ELEVATED TO ROOT.";

#[derive(Debug, Default)]
pub struct ElevationLab {
    run: Option<Stepper>,
    console: Vec<String>,
    elevated: bool,
}

fn stamped(message: &str) -> String {
    format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), message)
}

impl ElevationLab {
    /// Start the escalation, each step lasting 1.5-2.5 s
    pub fn start(&mut self, now: Instant, rng: &mut impl Rng) {
        if self.run.is_some() || self.elevated {
            return;
        }
        let durations = ELEVATION_STEPS
            .iter()
            .map(|_| jitter(rng, 1500, 1000))
            .collect();
        self.console.clear();
        self.console.push(stamped(ELEVATION_STEPS[0]));
        self.run = Some(Stepper::new(now, durations));
    }

    pub fn is_processing(&self) -> bool {
        self.run.is_some()
    }

    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn progress(&self) -> f32 {
        match &self.run {
            Some(stepper) => stepper.progress(),
            None if self.elevated => 1.0,
            None => 0.0,
        }
    }

    /// Returns true once, when root is granted
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(stepper) = self.run.as_mut() else {
            return false;
        };
        match stepper.poll(now) {
            Some(StepEvent::Advanced(step)) => {
                self.console.push(stamped(ELEVATION_STEPS[step]));
                false
            }
            Some(StepEvent::Finished) => {
                self.run = None;
                self.elevated = true;
                self.console.push(stamped(ELEVATION_SUCCESS));
                true
            }
            None => false,
        }
    }

    /// Drop privileges and clear the console
    pub fn revoke(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;

    #[test]
    fn escalation_logs_every_step_then_success() {
        let mut rng = StdRng::seed_from_u64(21);
        let start = Instant::now();
        let mut lab = ElevationLab::default();
        lab.start(start, &mut rng);
        assert_eq!(lab.console().len(), 1);

        let mut now = start;
        let mut granted = false;
        for _ in 0..ELEVATION_STEPS.len() {
            now += Duration::from_millis(2500);
            granted |= lab.poll(now);
        }

        assert!(granted);
        assert!(lab.is_elevated());
        assert_eq!(lab.console().len(), ELEVATION_STEPS.len() + 1);
        assert!(lab.console().last().unwrap().ends_with(ELEVATION_SUCCESS));
        assert!(lab.console()[3].contains(ELEVATION_STEPS[3]));
    }

    #[test]
    fn step_does_not_advance_before_minimum() {
        let mut rng = StdRng::seed_from_u64(21);
        let start = Instant::now();
        let mut lab = ElevationLab::default();
        lab.start(start, &mut rng);
        assert!(!lab.poll(start + Duration::from_millis(1499)));
        assert_eq!(lab.console().len(), 1);
    }
}
