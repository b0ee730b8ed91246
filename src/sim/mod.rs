//! Simulation models behind the device panels
//!
//! Each workflow is a plain struct advanced from the frame loop with an
//! explicit `Instant`; random data comes from a caller-supplied `Rng`.

pub mod analyzers;
pub mod antivirus;
pub mod apps;
pub mod audit;
pub mod comms;
pub mod elevation;
pub mod files;
pub mod identity;
pub mod location;
pub mod maintenance;
pub mod performance;
pub mod sanitizer;
pub mod timer;

/// Severity grade shared by threat and audit findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}
