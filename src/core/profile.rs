//! Profile management - Saved snapshots of a linked device

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::device::DeviceInfo;

/// Unique identifier for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Purpose a snapshot was taken for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProfileCategory {
    #[default]
    Diagnostic,
    Audit,
    Forensic,
    Custom,
}

impl ProfileCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Diagnostic => "Diagnostic",
            Self::Audit => "Audit",
            Self::Forensic => "Forensic",
            Self::Custom => "Custom",
        }
    }

    pub fn all() -> &'static [ProfileCategory] {
        &[
            ProfileCategory::Diagnostic,
            ProfileCategory::Audit,
            ProfileCategory::Forensic,
            ProfileCategory::Custom,
        ]
    }
}

/// A saved snapshot of a device's attribute set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Unique identifier
    pub id: ProfileId,
    /// Display name
    pub profile_name: String,
    /// Snapshot of the device record
    pub device_info: DeviceInfo,
    pub category: ProfileCategory,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Set once the profile has gone through a vault sync
    #[serde(default)]
    pub cloud_synced: bool,
}

impl DeviceProfile {
    pub fn new(
        name: impl Into<String>,
        category: ProfileCategory,
        device_info: DeviceInfo,
    ) -> Self {
        Self {
            id: ProfileId::new(),
            profile_name: name.into(),
            device_info,
            category,
            timestamp: Utc::now(),
            cloud_synced: false,
        }
    }

    /// Case-insensitive match on profile name or device model
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.profile_name.to_lowercase().contains(&query)
            || self.device_info.model.to_lowercase().contains(&query)
    }

    /// Export profile to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Profiles matching a search query, in vault order
pub fn filter<'a>(profiles: &'a [DeviceProfile], query: &str) -> Vec<&'a DeviceProfile> {
    profiles.iter().filter(|p| p.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profiles_get_unique_ids() {
        let a = DeviceProfile::new("A", ProfileCategory::Audit, DeviceInfo::mock());
        let b = DeviceProfile::new("A", ProfileCategory::Audit, DeviceInfo::mock());
        assert_ne!(a.id, b.id);
        assert!(!a.cloud_synced);
    }

    #[test]
    fn filter_matches_name_or_model() {
        let profiles = vec![
            DeviceProfile::new("S24 - Standard Audit", ProfileCategory::Audit, DeviceInfo::mock()),
            DeviceProfile::new("Evidence 7", ProfileCategory::Forensic, DeviceInfo::mock()),
        ];

        assert_eq!(filter(&profiles, "standard").len(), 1);
        assert_eq!(filter(&profiles, "GALAXY").len(), 2);
        assert_eq!(filter(&profiles, "").len(), 2);
        assert!(filter(&profiles, "pixel").is_empty());
    }

    #[test]
    fn json_export_round_trips() {
        let profile = DeviceProfile::new("Vault", ProfileCategory::Custom, DeviceInfo::mock());
        let json = profile.to_json().unwrap();
        let back: DeviceProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
