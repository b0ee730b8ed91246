//! Security audit - Attack-surface sweep with fixed findings

use std::time::Instant;

use super::timer::Delay;
use super::Severity;

pub const AUDIT_DELAY_MS: u64 = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFinding {
    pub vector: &'static str,
    pub risk: Severity,
    pub description: &'static str,
    pub source: &'static str,
    pub target: &'static str,
}

pub fn audit_findings() -> Vec<AuditFinding> {
    vec![
        AuditFinding {
            vector: "Communication (SMS/MMS)",
            risk: Severity::High,
            description: "Unpatched vulnerability in messaging service allows for remote buffer overflow via crafted media packets.",
            source: "CVE-2024-8812",
            target: "Phone Number Endpoint",
        },
        AuditFinding {
            vector: "Identity (Email)",
            risk: Severity::Medium,
            description: "Associated email account lacks 2FA. Potential for credential harvesting through phishing injection.",
            source: "Security Policy P-102",
            target: "Operator Email",
        },
        AuditFinding {
            vector: "Network Stack",
            risk: Severity::Critical,
            description: "Legacy SSL protocols detected on carrier APN. Susceptible to MITM traffic injection.",
            source: "Deep Packet Inspection",
            target: "Duplex Link",
        },
        AuditFinding {
            vector: "OS Kernel",
            risk: Severity::Low,
            description: "Non-critical memory leak discovered in sandbox environment.",
            source: "Heuristic Engine",
            target: "System Partition",
        },
    ]
}

#[derive(Debug, Default)]
pub struct SecurityAudit {
    pending: Option<Delay>,
    results: Option<Vec<AuditFinding>>,
}

impl SecurityAudit {
    pub fn start(&mut self, now: Instant) {
        if self.pending.is_none() {
            self.results = None;
            self.pending = Some(Delay::from_millis(now, AUDIT_DELAY_MS));
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn progress(&self, now: Instant) -> f32 {
        self.pending.map(|d| d.progress(now)).unwrap_or(0.0)
    }

    pub fn results(&self) -> Option<&[AuditFinding]> {
        self.results.as_deref()
    }

    /// Highest risk among the findings
    pub fn worst_risk(&self) -> Option<Severity> {
        self.results.as_ref()?.iter().map(|f| f.risk).max()
    }

    pub fn poll(&mut self, now: Instant) {
        if self.pending.is_some_and(|d| d.is_due(now)) {
            self.pending = None;
            self.results = Some(audit_findings());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn audit_reports_four_findings_after_delay() {
        let start = Instant::now();
        let mut audit = SecurityAudit::default();
        audit.start(start);

        audit.poll(start + Duration::from_millis(3999));
        assert!(audit.results().is_none());

        audit.poll(start + Duration::from_millis(AUDIT_DELAY_MS));
        assert!(!audit.is_running());
        assert_eq!(audit.results().map(|r| r.len()), Some(4));
        assert_eq!(audit.worst_risk(), Some(Severity::Critical));
    }

    #[test]
    fn restart_clears_previous_results() {
        let start = Instant::now();
        let mut audit = SecurityAudit::default();
        audit.start(start);
        audit.poll(start + Duration::from_millis(AUDIT_DELAY_MS));

        audit.start(start + Duration::from_secs(10));
        assert!(audit.results().is_none());
        assert!(audit.is_running());
    }
}
