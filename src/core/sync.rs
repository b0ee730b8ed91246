//! Cloud sync - Simulated vault upload and remote fetch

use std::time::Instant;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::profile::DeviceProfile;
use super::settings::AppSettings;
use crate::sim::timer::Delay;

/// Simulated upload latency
pub const SYNC_DELAY_MS: u64 = 2500;

/// Simulated download latency
pub const FETCH_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Success,
    Error,
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Syncing => "Uploading...",
            Self::Success => "Synchronized",
            Self::Error => "Sync failed",
        }
    }
}

/// Work that became due in [`CloudSync::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    /// Upload latency elapsed; write the vault
    UploadDue,
    /// Download latency elapsed; read the vault
    FetchDue,
}

/// What a remote fetch hands back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    pub profiles: Vec<DeviceProfile>,
    pub settings: AppSettings,
}

/// Sync status plus the pending upload or fetch
#[derive(Debug, Default)]
pub struct CloudSync {
    status: SyncStatus,
    upload: Option<Delay>,
    fetch: Option<Delay>,
    last_synced: Option<String>,
}

impl CloudSync {
    pub fn new(last_synced: Option<String>) -> Self {
        Self {
            last_synced,
            ..Default::default()
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn is_syncing(&self) -> bool {
        self.status == SyncStatus::Syncing
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch.is_some()
    }

    pub fn last_synced(&self) -> Option<&str> {
        self.last_synced.as_deref()
    }

    /// Queue an upload. Returns false if one is already running.
    pub fn start_sync(&mut self, now: Instant) -> bool {
        if self.upload.is_some() {
            return false;
        }
        self.status = SyncStatus::Syncing;
        self.upload = Some(Delay::from_millis(now, SYNC_DELAY_MS));
        true
    }

    /// Queue a remote fetch. Returns false if one is already running.
    pub fn start_fetch(&mut self, now: Instant) -> bool {
        if self.fetch.is_some() {
            return false;
        }
        self.fetch = Some(Delay::from_millis(now, FETCH_DELAY_MS));
        true
    }

    pub fn poll(&mut self, now: Instant) -> Option<SyncEvent> {
        if self.upload.is_some_and(|d| d.is_due(now)) {
            self.upload = None;
            return Some(SyncEvent::UploadDue);
        }
        if self.fetch.is_some_and(|d| d.is_due(now)) {
            self.fetch = None;
            return Some(SyncEvent::FetchDue);
        }
        None
    }

    /// Record the outcome of an upload; returns the timestamp on success
    pub fn finish(&mut self, succeeded: bool) -> Option<&str> {
        if succeeded {
            self.status = SyncStatus::Success;
            self.last_synced = Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
            self.last_synced.as_deref()
        } else {
            self.status = SyncStatus::Error;
            None
        }
    }

    /// Drop any pending work, e.g. after a factory reset
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Flag every profile as uploaded
pub fn mark_synced(profiles: &mut [DeviceProfile]) {
    for profile in profiles {
        profile.cloud_synced = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeviceInfo, ProfileCategory};
    use std::time::Duration;

    #[test]
    fn upload_becomes_due_after_latency() {
        let start = Instant::now();
        let mut sync = CloudSync::default();

        assert!(sync.start_sync(start));
        assert!(sync.is_syncing());
        assert!(!sync.start_sync(start));

        assert_eq!(sync.poll(start + Duration::from_millis(2000)), None);
        assert_eq!(
            sync.poll(start + Duration::from_millis(SYNC_DELAY_MS)),
            Some(SyncEvent::UploadDue)
        );

        assert!(sync.finish(true).is_some());
        assert_eq!(sync.status(), SyncStatus::Success);
        assert!(sync.last_synced().is_some());
    }

    #[test]
    fn failed_upload_keeps_previous_timestamp() {
        let mut sync = CloudSync::new(Some("earlier".to_string()));
        sync.start_sync(Instant::now());
        assert!(sync.finish(false).is_none());
        assert_eq!(sync.status(), SyncStatus::Error);
        assert_eq!(sync.last_synced(), Some("earlier"));
    }

    #[test]
    fn fetch_runs_independently_of_upload() {
        let start = Instant::now();
        let mut sync = CloudSync::default();
        sync.start_fetch(start);
        assert!(sync.is_fetching());
        assert_eq!(
            sync.poll(start + Duration::from_millis(FETCH_DELAY_MS)),
            Some(SyncEvent::FetchDue)
        );
        assert!(!sync.is_fetching());
        assert_eq!(sync.status(), SyncStatus::Idle);
    }

    #[test]
    fn mark_synced_flags_all_profiles() {
        let mut profiles = vec![
            DeviceProfile::new("a", ProfileCategory::Audit, DeviceInfo::mock()),
            DeviceProfile::new("b", ProfileCategory::Custom, DeviceInfo::mock()),
        ];
        mark_synced(&mut profiles);
        assert!(profiles.iter().all(|p| p.cloud_synced));
    }
}
