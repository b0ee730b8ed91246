//! Advanced analyzers - RF spectrum load, payload entropy and a packet feed

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use rand::Rng;

use super::timer::Ticker;

pub const REFRESH_INTERVAL: Duration = Duration::from_millis(2000);

/// Packets kept in the interrogator feed
pub const PACKET_CAPACITY: usize = 10;

pub const BANDS: &[&str] = &[
    "700MHz", "1.8GHz", "2.1GHz", "3.5GHz", "5.2GHz", "26GHz", "28GHz",
];

const PROTOCOLS: &[&str] = &["TLS v1.3", "HTTP/3", "SS7-AUTH", "IMSI-SYNC", "GTP-U", "S1-AP"];

const ACTIONS: &[&str] = &[
    "Encrypted Data Burst",
    "Handshake Initiation",
    "Node Re-authentication",
    "Tunnel Establishment",
];

#[derive(Debug, Clone, PartialEq)]
pub struct BandReading {
    pub band: &'static str,
    /// Percent
    pub load: u8,
    /// dB
    pub snr: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub seq: u64,
    pub protocol: &'static str,
    pub action: &'static str,
    pub timestamp: String,
    pub entropy: f32,
}

/// Live state of the analyzers view
#[derive(Debug, Clone)]
pub struct SignalAnalyzer {
    pub spectrum: Vec<BandReading>,
    pub entropy: f32,
    pub packets: VecDeque<Packet>,
    next_seq: u64,
    ticker: Ticker,
}

impl SignalAnalyzer {
    pub fn new(now: Instant) -> Self {
        Self {
            spectrum: Vec::new(),
            entropy: 0.42,
            packets: VecDeque::with_capacity(PACKET_CAPACITY),
            next_seq: 0,
            ticker: Ticker::new(now, REFRESH_INTERVAL),
        }
    }

    pub fn poll(&mut self, now: Instant, rng: &mut impl Rng) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.refresh(rng);
        true
    }

    fn refresh(&mut self, rng: &mut impl Rng) {
        self.spectrum = BANDS
            .iter()
            .map(|band| BandReading {
                band,
                load: rng.random_range(10..90),
                snr: (rng.random_range(10.0..40.0f32) * 10.0).round() / 10.0,
            })
            .collect();

        self.entropy = rng.random_range(0.3..0.9);

        let packet = Packet {
            seq: self.next_seq,
            protocol: PROTOCOLS.choose(rng).copied().unwrap_or(PROTOCOLS[0]),
            action: ACTIONS.choose(rng).copied().unwrap_or(ACTIONS[0]),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            entropy: rng.random_range(0.0..0.9),
        };
        self.next_seq += 1;
        self.packets.push_front(packet);
        self.packets.truncate(PACKET_CAPACITY);
    }

    /// Mean SNR across bands
    pub fn snr_delta(&self) -> Option<f32> {
        if self.spectrum.is_empty() {
            return None;
        }
        let total: f32 = self.spectrum.iter().map(|b| b.snr).sum();
        Some(total / self.spectrum.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn refresh_fills_every_band_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let start = Instant::now();
        let mut analyzer = SignalAnalyzer::new(start);
        assert!(analyzer.poll(start + REFRESH_INTERVAL, &mut rng));

        assert_eq!(analyzer.spectrum.len(), 7);
        for reading in &analyzer.spectrum {
            assert!((10..90).contains(&reading.load));
            assert!(reading.snr >= 10.0 && reading.snr <= 40.0);
        }
        assert!(analyzer.entropy >= 0.3 && analyzer.entropy < 0.9);
        assert!(analyzer.snr_delta().is_some());
    }

    #[test]
    fn packet_feed_is_newest_first_and_capped() {
        let mut rng = StdRng::seed_from_u64(5);
        let start = Instant::now();
        let mut analyzer = SignalAnalyzer::new(start);
        for i in 1..=25u32 {
            analyzer.poll(start + REFRESH_INTERVAL * i, &mut rng);
        }

        assert_eq!(analyzer.packets.len(), PACKET_CAPACITY);
        assert_eq!(analyzer.packets[0].seq, 24);
        assert!(PROTOCOLS.contains(&analyzer.packets[0].protocol));
    }
}
