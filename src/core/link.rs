//! Duplex Link - The simulated USB connection to a handset

use std::time::Instant;

use tracing::info;

use super::device::{DeviceInfo, DeviceStatus};
use crate::sim::timer::Delay;

/// Time the simulated USB handshake takes
pub const HANDSHAKE_MS: u64 = 2000;

/// Transition reported by [`DeviceLink::poll`]
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    Established(DeviceInfo),
}

/// State of the Duplex Link
#[derive(Debug, Default)]
pub struct DeviceLink {
    status: DeviceStatus,
    handshake: Option<Delay>,
    device: Option<DeviceInfo>,
    /// Cached AI diagnostic text for the linked device
    pub diagnostic: String,
}

impl DeviceLink {
    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn device(&self) -> Option<&DeviceInfo> {
        self.device.as_ref()
    }

    pub fn device_mut(&mut self) -> Option<&mut DeviceInfo> {
        self.device.as_mut()
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected() && self.device.is_some()
    }

    /// Fraction of the handshake elapsed while connecting
    pub fn handshake_progress(&self, now: Instant) -> f32 {
        self.handshake.map(|d| d.progress(now)).unwrap_or(0.0)
    }

    /// Begin the handshake. Returns false if a link is already up or pending.
    pub fn connect(&mut self, now: Instant) -> bool {
        if matches!(
            self.status,
            DeviceStatus::Connecting | DeviceStatus::Connected
        ) {
            return false;
        }
        self.status = DeviceStatus::Connecting;
        self.handshake = Some(Delay::from_millis(now, HANDSHAKE_MS));
        true
    }

    /// Complete the handshake once the delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<LinkEvent> {
        let due = self.handshake.as_ref()?.is_due(now);
        if !due {
            return None;
        }

        self.handshake = None;
        let device = DeviceInfo::mock();
        self.status = DeviceStatus::Connected;
        self.device = Some(device.clone());
        info!("Duplex link established with {}", device.model);
        Some(LinkEvent::Established(device))
    }

    /// Attach a device record directly, e.g. when restoring a saved profile
    pub fn attach(&mut self, device: DeviceInfo) {
        self.handshake = None;
        self.status = DeviceStatus::Connected;
        self.device = Some(device);
        self.diagnostic.clear();
    }

    /// Drop the link and everything learned over it
    pub fn disconnect(&mut self) {
        self.handshake = None;
        self.status = DeviceStatus::Disconnected;
        self.device = None;
        self.diagnostic.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn connect_walks_through_connecting_to_connected() {
        let start = Instant::now();
        let mut link = DeviceLink::default();
        assert_eq!(link.status(), DeviceStatus::Disconnected);

        assert!(link.connect(start));
        assert_eq!(link.status(), DeviceStatus::Connecting);
        assert!(link.device().is_none());

        assert!(link.poll(start + Duration::from_millis(1000)).is_none());
        assert_eq!(link.status(), DeviceStatus::Connecting);

        let event = link.poll(start + Duration::from_millis(HANDSHAKE_MS));
        assert_eq!(event, Some(LinkEvent::Established(DeviceInfo::mock())));
        assert_eq!(link.status(), DeviceStatus::Connected);
        assert_eq!(link.device(), Some(&DeviceInfo::mock()));
    }

    #[test]
    fn connect_is_ignored_while_pending() {
        let start = Instant::now();
        let mut link = DeviceLink::default();
        assert!(link.connect(start));
        assert!(!link.connect(start + Duration::from_millis(500)));
    }

    #[test]
    fn disconnect_clears_device_and_diagnostic() {
        let start = Instant::now();
        let mut link = DeviceLink::default();
        link.connect(start);
        link.poll(start + Duration::from_secs(3));
        link.diagnostic = "Battery nominal".to_string();

        link.disconnect();

        assert_eq!(link.status(), DeviceStatus::Disconnected);
        assert!(link.device().is_none());
        assert!(link.diagnostic.is_empty());
        assert!(link.poll(start + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn attach_restores_a_saved_device() {
        let mut link = DeviceLink::default();
        let mut device = DeviceInfo::mock();
        device.battery_health = 71;

        link.attach(device.clone());
        assert!(link.is_connected());
        assert_eq!(link.device().unwrap().battery_health, 71);
    }
}
