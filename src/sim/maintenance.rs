//! Repair & update - Bug sweep, per-bug patching and the firmware push

use std::collections::HashSet;
use std::time::Instant;

use super::timer::Delay;
use crate::core::{BugSeverity, DeviceBug};

pub const SCAN_DELAY_MS: u64 = 2500;
pub const FIX_DELAY_MS: u64 = 2000;
pub const UPDATE_DELAY_MS: u64 = 5000;

/// Bugs every sweep turns up
pub fn discovered_bugs() -> Vec<DeviceBug> {
    vec![
        DeviceBug::new(
            "1",
            "System UI",
            "Ghost touch detected in navbar area",
            BugSeverity::High,
        ),
        DeviceBug::new(
            "2",
            "Kernel",
            "Potential memory leak in background services",
            BugSeverity::Medium,
        ),
        DeviceBug::new(
            "3",
            "Battery",
            "Inaccurate charge percentage reporting",
            BugSeverity::Low,
        ),
        DeviceBug::new(
            "4",
            "Connectivity",
            "WiFi handoff delay (>200ms)",
            BugSeverity::Medium,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairJob {
    Fix(String),
    SystemUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceEvent {
    ScanComplete(usize),
    BugFixed(String),
    /// Firmware push finished; apply it to the linked device
    UpdateReady,
}

/// One job at a time: a sweep, a bug fix or the update
#[derive(Debug, Default)]
pub struct MaintenanceCenter {
    scan: Option<Delay>,
    job: Option<(RepairJob, Delay)>,
    bugs: Vec<DeviceBug>,
    fixed: HashSet<String>,
}

impl MaintenanceCenter {
    /// Seed with whatever the device already reports
    pub fn new(known_bugs: &[DeviceBug]) -> Self {
        Self {
            bugs: known_bugs.to_vec(),
            ..Default::default()
        }
    }

    pub fn bugs(&self) -> &[DeviceBug] {
        &self.bugs
    }

    pub fn is_fixed(&self, id: &str) -> bool {
        self.fixed.contains(id)
    }

    pub fn is_scanning(&self) -> bool {
        self.scan.is_some()
    }

    pub fn current_job(&self) -> Option<&RepairJob> {
        self.job.as_ref().map(|(job, _)| job)
    }

    pub fn is_fixing(&self, id: &str) -> bool {
        matches!(self.current_job(), Some(RepairJob::Fix(current)) if current == id)
    }

    pub fn is_updating(&self) -> bool {
        self.current_job() == Some(&RepairJob::SystemUpdate)
    }

    fn is_busy(&self) -> bool {
        self.scan.is_some() || self.job.is_some()
    }

    pub fn start_scan(&mut self, now: Instant) {
        if !self.is_busy() {
            self.scan = Some(Delay::from_millis(now, SCAN_DELAY_MS));
        }
    }

    pub fn fix(&mut self, id: &str, now: Instant) {
        if self.is_busy() || self.is_fixed(id) {
            return;
        }
        self.job = Some((
            RepairJob::Fix(id.to_string()),
            Delay::from_millis(now, FIX_DELAY_MS),
        ));
    }

    pub fn install_update(&mut self, now: Instant) {
        if !self.is_busy() {
            self.job = Some((
                RepairJob::SystemUpdate,
                Delay::from_millis(now, UPDATE_DELAY_MS),
            ));
        }
    }

    pub fn job_progress(&self, now: Instant) -> f32 {
        self.job.as_ref().map(|(_, d)| d.progress(now)).unwrap_or(0.0)
    }

    pub fn poll(&mut self, now: Instant) -> Option<MaintenanceEvent> {
        if self.scan.is_some_and(|d| d.is_due(now)) {
            self.scan = None;
            self.bugs = discovered_bugs();
            self.fixed.clear();
            return Some(MaintenanceEvent::ScanComplete(self.bugs.len()));
        }

        let due = self.job.as_ref().is_some_and(|(_, d)| d.is_due(now));
        if !due {
            return None;
        }
        match self.job.take()?.0 {
            RepairJob::Fix(id) => {
                self.fixed.insert(id.clone());
                Some(MaintenanceEvent::BugFixed(id))
            }
            RepairJob::SystemUpdate => Some(MaintenanceEvent::UpdateReady),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    #[test]
    fn scan_reports_four_bugs() {
        let start = Instant::now();
        let mut center = MaintenanceCenter::default();
        center.start_scan(start);
        assert_eq!(center.poll(at(start, 2499)), None);
        assert_eq!(
            center.poll(at(start, SCAN_DELAY_MS)),
            Some(MaintenanceEvent::ScanComplete(4))
        );
        assert_eq!(center.bugs()[0].severity, BugSeverity::High);
    }

    #[test]
    fn fix_marks_only_that_bug() {
        let start = Instant::now();
        let mut center = MaintenanceCenter::new(&discovered_bugs());
        center.fix("2", start);
        assert!(center.is_fixing("2"));

        center.fix("3", start);
        assert!(!center.is_fixing("3"));

        assert_eq!(
            center.poll(at(start, FIX_DELAY_MS)),
            Some(MaintenanceEvent::BugFixed("2".to_string()))
        );
        assert!(center.is_fixed("2"));
        assert!(!center.is_fixed("3"));
    }

    #[test]
    fn update_takes_five_seconds() {
        let start = Instant::now();
        let mut center = MaintenanceCenter::default();
        center.install_update(start);
        assert!(center.is_updating());
        assert_eq!(center.poll(at(start, 4999)), None);
        assert_eq!(
            center.poll(at(start, UPDATE_DELAY_MS)),
            Some(MaintenanceEvent::UpdateReady)
        );
        assert!(center.current_job().is_none());
    }
}
