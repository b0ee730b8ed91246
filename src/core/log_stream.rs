//! Operation log - Session log buffer and the simulated device event stream

use std::collections::VecDeque;
use std::time::Instant;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::timer::{jitter, Delay};

/// Maximum entries kept in the session buffer
pub const LOG_BUFFER_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single line in the operation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local wall-clock time, e.g. "14:03:22"
    pub timestamp: String,
    pub message: String,
    pub level: LogLevel,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
            level,
        }
    }
}

/// Newest-first log buffer capped at [`LOG_BUFFER_CAPACITY`]
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(LOG_BUFFER_CAPACITY);
    }

    pub fn add(&mut self, message: impl Into<String>, level: LogLevel) {
        self.push(LogEntry::new(message, level));
    }

    /// Purge every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest first; `.rev()` walks oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const SYSTEM_EVENTS: &[&str] = &[
    "Kernel: CPU scheduler balanced",
    "IO: USB-C Power Delivery handshaking (9V/2A)",
    "Net: Background sync initiated for 'NexusCloud'",
    "Sys: Thermal throttle check - 34°C (Normal)",
    "Mem: GC cycle reclaimed 42MB in 12ms",
    "App: com.android.systemui reported heartbeat",
    "Sec: TEE environment integrity verified",
    "Bat: Current draw 120mA (Screen ON)",
    "Log: Writing buffer to persistent storage",
    "Proc: PID 4412 (Launcher) priority elevated",
];

/// Simulated event feed from the linked handset.
///
/// While running it yields one event every 2-5 seconds.
#[derive(Debug, Default)]
pub struct LogStream {
    next: Option<Delay>,
}

impl LogStream {
    pub fn start(&mut self, now: Instant, rng: &mut impl Rng) {
        if self.next.is_none() {
            self.schedule(now, rng);
        }
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Emit the next event if its time has come
    pub fn poll(&mut self, now: Instant, rng: &mut impl Rng) -> Option<LogEntry> {
        let due = self.next.as_ref()?.is_due(now);
        if !due {
            return None;
        }
        self.schedule(now, rng);
        Some(random_event(rng))
    }

    fn schedule(&mut self, now: Instant, rng: &mut impl Rng) {
        self.next = Some(Delay::new(now, jitter(rng, 2000, 3000)));
    }
}

fn random_event(rng: &mut impl Rng) -> LogEntry {
    let message = SYSTEM_EVENTS
        .choose(rng)
        .copied()
        .unwrap_or(SYSTEM_EVENTS[0]);
    let level = if rng.random_bool(0.1) {
        LogLevel::Warning
    } else {
        *[LogLevel::Info, LogLevel::Success, LogLevel::Warning]
            .choose(rng)
            .unwrap_or(&LogLevel::Info)
    };
    LogEntry::new(message, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;

    #[test]
    fn buffer_is_newest_first_and_capped() {
        let mut buffer = LogBuffer::default();
        for i in 0..150 {
            buffer.add(format!("line {}", i), LogLevel::Info);
        }

        assert_eq!(buffer.len(), LOG_BUFFER_CAPACITY);
        assert_eq!(buffer.latest().unwrap().message, "line 149");
        assert_eq!(buffer.iter().last().unwrap().message, "line 50");
    }

    #[test]
    fn reversed_iteration_reads_oldest_first() {
        let mut buffer = LogBuffer::default();
        buffer.add("first", LogLevel::Info);
        buffer.add("second", LogLevel::Warning);
        buffer.add("third", LogLevel::Error);

        let oldest_first: Vec<&str> = buffer.iter().rev().map(|e| e.message.as_str()).collect();
        assert_eq!(oldest_first, ["first", "second", "third"]);
    }

    #[test]
    fn clear_purges_buffer() {
        let mut buffer = LogBuffer::default();
        buffer.add("one", LogLevel::Success);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn stream_emits_between_two_and_five_seconds() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Instant::now();
        let mut stream = LogStream::default();
        stream.start(start, &mut rng);

        assert!(stream.poll(start + Duration::from_millis(1999), &mut rng).is_none());
        let entry = stream
            .poll(start + Duration::from_millis(5000), &mut rng)
            .expect("event due by five seconds");
        assert!(SYSTEM_EVENTS.contains(&entry.message.as_str()));
        assert_ne!(entry.level, LogLevel::Error);
    }

    #[test]
    fn stopped_stream_is_silent() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = Instant::now();
        let mut stream = LogStream::default();
        stream.start(start, &mut rng);
        stream.stop();

        assert!(!stream.is_running());
        assert!(stream.poll(start + Duration::from_secs(60), &mut rng).is_none());
    }
}
