//! Comms center - Intercepted call log and message threads

use std::time::Instant;

use super::timer::Delay;

/// Time spent "aggregating" before the export completes
pub const EXPORT_DELAY_MS: u64 = 2000;

pub const EXPORT_NOTICE: &str =
    "Communication log manifest exported to PC as duplex_comms_dump.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDirection {
    Incoming,
    Outgoing,
    Missed,
}

impl CallDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
            Self::Missed => "Missed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub contact: &'static str,
    pub number: &'static str,
    pub direction: CallDirection,
    pub time: &'static str,
    pub duration: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageThread {
    pub contact: &'static str,
    pub last_message: &'static str,
    pub time: &'static str,
    pub unread: bool,
}

pub const CALL_LOG: &[CallRecord] = &[
    CallRecord {
        contact: "Alice Cooper",
        number: "+1 (555) 902-1234",
        direction: CallDirection::Incoming,
        time: "10:45 AM",
        duration: "12m 45s",
    },
    CallRecord {
        contact: "Unknown Number",
        number: "+1 (555) 234-5678",
        direction: CallDirection::Missed,
        time: "09:12 AM",
        duration: "0s",
    },
    CallRecord {
        contact: "Bob Tech Support",
        number: "+1 (555) 345-6789",
        direction: CallDirection::Outgoing,
        time: "Yesterday",
        duration: "2m 10s",
    },
    CallRecord {
        contact: "Mom",
        number: "+1 (555) 555-0199",
        direction: CallDirection::Incoming,
        time: "Yesterday",
        duration: "45m 20s",
    },
    CallRecord {
        contact: "Work Office",
        number: "+1 (555) 888-2222",
        direction: CallDirection::Outgoing,
        time: "2 days ago",
        duration: "1h 05m",
    },
];

pub const MESSAGES: &[MessageThread] = &[
    MessageThread {
        contact: "Alice Cooper",
        last_message: "See you at the conference tomorrow!",
        time: "10:50 AM",
        unread: true,
    },
    MessageThread {
        contact: "Mom",
        last_message: "Did you get the groceries yet?",
        time: "09:30 AM",
        unread: false,
    },
    MessageThread {
        contact: "Verizon",
        last_message: "Your monthly bill is ready for review.",
        time: "Yesterday",
        unread: false,
    },
    MessageThread {
        contact: "Bob Tech Support",
        last_message: "The server migration is complete.",
        time: "2 days ago",
        unread: false,
    },
];

/// Calls whose contact (case-insensitive) or number contains `query`
pub fn search_calls(query: &str) -> Vec<&'static CallRecord> {
    let lowered = query.to_lowercase();
    CALL_LOG
        .iter()
        .filter(|c| c.contact.to_lowercase().contains(&lowered) || c.number.contains(query))
        .collect()
}

/// Threads whose contact or last message contains `query`, case-insensitive
pub fn search_messages(query: &str) -> Vec<&'static MessageThread> {
    let lowered = query.to_lowercase();
    MESSAGES
        .iter()
        .filter(|m| {
            m.contact.to_lowercase().contains(&lowered)
                || m.last_message.to_lowercase().contains(&lowered)
        })
        .collect()
}

/// The simulated CSV export
#[derive(Debug, Default)]
pub struct CommsExport {
    pending: Option<Delay>,
}

impl CommsExport {
    pub fn start(&mut self, now: Instant) {
        if self.pending.is_none() {
            self.pending = Some(Delay::from_millis(now, EXPORT_DELAY_MS));
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the completion notice once the export finishes
    pub fn poll(&mut self, now: Instant) -> Option<&'static str> {
        if self.pending?.is_due(now) {
            self.pending = None;
            return Some(EXPORT_NOTICE);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fixed_lists_have_expected_sizes() {
        assert_eq!(CALL_LOG.len(), 5);
        assert_eq!(MESSAGES.len(), 4);
    }

    #[test]
    fn call_search_matches_contact_or_number() {
        assert_eq!(search_calls("alice").len(), 1);
        assert_eq!(search_calls("555-0199")[0].contact, "Mom");
        assert_eq!(search_calls("").len(), 5);
        assert!(search_calls("zzz").is_empty());
    }

    #[test]
    fn message_search_matches_body() {
        let hits = search_messages("MIGRATION");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].contact, "Bob Tech Support");
    }

    #[test]
    fn export_finishes_after_delay() {
        let start = Instant::now();
        let mut export = CommsExport::default();
        export.start(start);
        assert!(export.is_running());
        assert_eq!(export.poll(start + Duration::from_millis(1999)), None);
        assert_eq!(
            export.poll(start + Duration::from_millis(EXPORT_DELAY_MS)),
            Some(EXPORT_NOTICE)
        );
        assert!(!export.is_running());
    }
}
