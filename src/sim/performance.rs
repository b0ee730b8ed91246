//! Performance lab - CPU/RAM telemetry and per-core load for the octa-core SoC

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::Rng;

use super::timer::Ticker;

pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(1500);

/// Samples kept per series
pub const HISTORY_LEN: usize = 16;

pub const PRIME_MAX_GHZ: f32 = 3.39;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreTier {
    Prime,
    Gold,
    Silver,
}

impl CoreTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prime => "Prime",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuCore {
    pub id: usize,
    pub arch: &'static str,
    pub tier: CoreTier,
    /// GHz
    pub clock: f32,
    /// Percent
    pub load: u8,
}

fn core(id: usize, arch: &'static str, tier: CoreTier, clock: f32) -> CpuCore {
    CpuCore {
        id,
        arch,
        tier,
        clock,
        load: 0,
    }
}

/// One Prime, three Gold and four Silver cores
pub fn octa_core_cluster() -> Vec<CpuCore> {
    let mut cores = vec![core(0, "Cortex-X4", CoreTier::Prime, PRIME_MAX_GHZ)];
    cores.extend((1..=3).map(|id| core(id, "Cortex-A720", CoreTier::Gold, 3.10)));
    cores.extend((4..=7).map(|id| core(id, "Cortex-A520", CoreTier::Silver, 2.20)));
    cores
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Local wall-clock label
    pub time: String,
    pub value: u8,
}

/// Rolling telemetry for the performance lab
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    pub cpu: VecDeque<Sample>,
    pub ram: VecDeque<Sample>,
    pub cores: Vec<CpuCore>,
    ticker: Ticker,
}

impl PerformanceMonitor {
    pub fn new(now: Instant) -> Self {
        Self {
            cpu: VecDeque::with_capacity(HISTORY_LEN),
            ram: VecDeque::with_capacity(HISTORY_LEN),
            cores: octa_core_cluster(),
            ticker: Ticker::new(now, SAMPLE_INTERVAL),
        }
    }

    /// Take a sample if the interval elapsed. Returns true when data changed.
    pub fn poll(&mut self, now: Instant, rng: &mut impl Rng) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.sample(rng);
        true
    }

    fn sample(&mut self, rng: &mut impl Rng) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        push_capped(
            &mut self.cpu,
            Sample {
                time: time.clone(),
                value: rng.random_range(10..50),
            },
        );
        push_capped(
            &mut self.ram,
            Sample {
                time,
                value: rng.random_range(65..80),
            },
        );

        for core in &mut self.cores {
            core.load = rng.random_range(0..100);
            if core.tier == CoreTier::Prime {
                let scaled = PRIME_MAX_GHZ - rng.random_range(0.0..0.5f32);
                core.clock = (scaled * 100.0).round() / 100.0;
            }
        }
    }

    pub fn latest_cpu(&self) -> Option<u8> {
        self.cpu.back().map(|s| s.value)
    }

    pub fn latest_ram(&self) -> Option<u8> {
        self.ram.back().map(|s| s.value)
    }
}

fn push_capped(series: &mut VecDeque<Sample>, sample: Sample) {
    series.push_back(sample);
    while series.len() > HISTORY_LEN {
        series.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn cluster_is_one_prime_three_gold_four_silver() {
        let cores = octa_core_cluster();
        let count = |tier| cores.iter().filter(|c| c.tier == tier).count();
        assert_eq!(cores.len(), 8);
        assert_eq!(count(CoreTier::Prime), 1);
        assert_eq!(count(CoreTier::Gold), 3);
        assert_eq!(count(CoreTier::Silver), 4);
    }

    #[test]
    fn samples_stay_in_range_and_capped() {
        let mut rng = StdRng::seed_from_u64(11);
        let start = Instant::now();
        let mut monitor = PerformanceMonitor::new(start);

        assert!(!monitor.poll(start, &mut rng));
        for i in 1..=40u32 {
            assert!(monitor.poll(start + SAMPLE_INTERVAL * i, &mut rng));
        }

        assert_eq!(monitor.cpu.len(), HISTORY_LEN);
        assert_eq!(monitor.ram.len(), HISTORY_LEN);
        assert!(monitor.cpu.iter().all(|s| (10..50).contains(&s.value)));
        assert!(monitor.ram.iter().all(|s| (65..80).contains(&s.value)));

        let prime = &monitor.cores[0];
        assert!(prime.clock > 2.88 && prime.clock <= PRIME_MAX_GHZ);
        assert!(monitor.cores[4..].iter().all(|c| c.clock == 2.20));
    }
}
