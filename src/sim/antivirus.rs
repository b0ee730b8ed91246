//! Antivirus suite - Staged deep scan, fixed threat list, purge

use std::time::Instant;

use rand::Rng;

use super::timer::{jitter, Delay, StepEvent, Stepper};
use super::Severity;

pub const CLEAN_DELAY_MS: u64 = 3000;

pub const SCAN_STAGES: &[&str] = &[
    "Interrogating System Partitions...",
    "Scanning Memory Resident Processes...",
    "Checking App Signature Integrity...",
    "Verifying Root Binary States...",
    "Analyzing Heuristic Patterns...",
    "Querying Threat Database...",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threat {
    pub name: &'static str,
    pub kind: &'static str,
    pub severity: Severity,
    pub path: &'static str,
}

pub fn detected_threats() -> Vec<Threat> {
    vec![
        Threat {
            name: "Malicious Overlay",
            kind: "Trojan",
            severity: Severity::Critical,
            path: "/system/bin/hw_svc_v1",
        },
        Threat {
            name: "Adware.Track.Pop",
            kind: "Adware",
            severity: Severity::Medium,
            path: "com.dev.game",
        },
        Threat {
            name: "Suspicious SU Binary",
            kind: "RiskTool",
            severity: Severity::High,
            path: "/sbin/su",
        },
    ]
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Scanning(Stepper),
    Threats,
    Cleaning(Delay),
    Clean,
}

/// Scan, review and purge workflow
#[derive(Debug, Default)]
pub struct AntivirusScan {
    phase: Phase,
    threats: Vec<Threat>,
}

impl AntivirusScan {
    /// Start a deep scan, each stage lasting 1-2 s
    pub fn start(&mut self, now: Instant, rng: &mut impl Rng) {
        if self.is_busy() {
            return;
        }
        let durations = SCAN_STAGES.iter().map(|_| jitter(rng, 1000, 1000)).collect();
        self.threats.clear();
        self.phase = Phase::Scanning(Stepper::new(now, durations));
    }

    /// Purge every detected threat
    pub fn clean(&mut self, now: Instant) {
        if matches!(self.phase, Phase::Threats) {
            self.phase = Phase::Cleaning(Delay::from_millis(now, CLEAN_DELAY_MS));
        }
    }

    /// Back to the "integrity unknown" state
    pub fn reset(&mut self) {
        if !self.is_busy() {
            *self = Self::default();
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.phase, Phase::Scanning(_))
    }

    pub fn is_cleaning(&self) -> bool {
        matches!(self.phase, Phase::Cleaning(_))
    }

    pub fn is_busy(&self) -> bool {
        self.is_scanning() || self.is_cleaning()
    }

    pub fn clean_complete(&self) -> bool {
        matches!(self.phase, Phase::Clean)
    }

    pub fn threats(&self) -> &[Threat] {
        &self.threats
    }

    /// Label of the stage in progress while scanning
    pub fn current_stage(&self) -> Option<&'static str> {
        match &self.phase {
            Phase::Scanning(stepper) => SCAN_STAGES.get(stepper.current()).copied(),
            _ => None,
        }
    }

    pub fn scan_progress(&self) -> f32 {
        match &self.phase {
            Phase::Scanning(stepper) => stepper.progress(),
            Phase::Idle => 0.0,
            _ => 1.0,
        }
    }

    pub fn poll(&mut self, now: Instant) {
        match &mut self.phase {
            Phase::Scanning(stepper) => {
                if stepper.poll(now) == Some(StepEvent::Finished) {
                    self.threats = detected_threats();
                    self.phase = Phase::Threats;
                }
            }
            Phase::Cleaning(delay) if delay.is_due(now) => {
                self.threats.clear();
                self.phase = Phase::Clean;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;

    fn run_scan(scan: &mut AntivirusScan, start: Instant) -> Instant {
        let mut now = start;
        for _ in 0..SCAN_STAGES.len() {
            now += Duration::from_millis(2000);
            scan.poll(now);
        }
        now
    }

    #[test]
    fn scan_walks_all_stages_then_reports_threats() {
        let mut rng = StdRng::seed_from_u64(9);
        let start = Instant::now();
        let mut scan = AntivirusScan::default();
        scan.start(start, &mut rng);

        assert_eq!(scan.current_stage(), Some(SCAN_STAGES[0]));
        assert!(scan.threats().is_empty());

        run_scan(&mut scan, start);
        assert!(!scan.is_scanning());
        assert_eq!(scan.threats().len(), 3);
        assert_eq!(scan.threats()[0].severity, Severity::Critical);
    }

    #[test]
    fn clean_empties_threats_after_delay() {
        let mut rng = StdRng::seed_from_u64(9);
        let start = Instant::now();
        let mut scan = AntivirusScan::default();
        scan.start(start, &mut rng);
        let now = run_scan(&mut scan, start);

        scan.clean(now);
        assert!(scan.is_cleaning());
        scan.poll(now + Duration::from_millis(2999));
        assert_eq!(scan.threats().len(), 3);

        scan.poll(now + Duration::from_millis(CLEAN_DELAY_MS));
        assert!(scan.threats().is_empty());
        assert!(scan.clean_complete());

        scan.reset();
        assert!(!scan.clean_complete());
    }

    #[test]
    fn clean_is_ignored_without_threats() {
        let mut scan = AntivirusScan::default();
        scan.clean(Instant::now());
        assert!(!scan.is_cleaning());
    }
}
