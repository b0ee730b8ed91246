//! Device model - The mocked handset behind the Duplex Link

use serde::{Deserialize, Serialize};

/// Link status of the simulated USB connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl DeviceStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::Error => "Error",
        }
    }
}

/// Operating system family reported by the handset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OsType {
    Android,
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "HarmonyOS")]
    Harmony,
    #[default]
    Unknown,
}

impl OsType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Harmony => "HarmonyOS",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugSeverity {
    Low,
    Medium,
    High,
}

impl BugSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// A defect reported by the maintenance scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBug {
    pub id: String,
    pub severity: BugSeverity,
    pub description: String,
    pub component: String,
}

impl DeviceBug {
    pub fn new(id: &str, component: &str, description: &str, severity: BugSeverity) -> Self {
        Self {
            id: id.to_string(),
            severity,
            description: description.to_string(),
            component: component.to_string(),
        }
    }
}

/// Descriptive record of the linked handset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model: String,
    pub brand: String,
    pub os: OsType,
    pub os_version: String,
    pub os_build: String,
    pub serial_number: String,
    pub imei: String,
    pub phone_number: String,
    pub associated_email: String,
    /// Battery health in percent
    pub battery_health: u8,
    /// Total storage in GB
    pub storage_total: u32,
    /// Used storage in GB
    pub storage_used: u32,
    pub cpu: String,
    pub ram: String,
    #[serde(default)]
    pub network_type: String,
    #[serde(default)]
    pub signal_strength: String,
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub bugs: Vec<DeviceBug>,
    #[serde(default)]
    pub update_available: bool,
}

impl DeviceInfo {
    /// The handset every simulated link reports
    pub fn mock() -> Self {
        Self {
            model: "Galaxy S24 Ultra (SM-S928B)".to_string(),
            brand: "Samsung".to_string(),
            os: OsType::Android,
            os_version: "14.0 (One UI 6.1)".to_string(),
            os_build: "UP1A.231005.007.S928BXXU1AXCA".to_string(),
            serial_number: "SN-X98273645-Z".to_string(),
            imei: "358902834710293".to_string(),
            phone_number: "+1 (555) 012-3456".to_string(),
            associated_email: "developer.nexus@proton.me".to_string(),
            battery_health: 92,
            storage_total: 512,
            storage_used: 142,
            cpu: "Snapdragon 8 Gen 3 (4nm)".to_string(),
            ram: "12 GB LPDDR5X".to_string(),
            network_type: "5G SA".to_string(),
            signal_strength: "-78 dBm".to_string(),
            carrier: "T-Mobile US".to_string(),
            bugs: Vec::new(),
            update_available: true,
        }
    }

    /// Short name for log lines, e.g. "Galaxy S24 Ultra"
    pub fn short_model(&self) -> &str {
        self.model
            .split(" (")
            .next()
            .unwrap_or(self.model.as_str())
    }

    pub fn storage_free(&self) -> u32 {
        self.storage_total.saturating_sub(self.storage_used)
    }

    /// Fraction of storage in use, 0.0 - 1.0
    pub fn storage_fraction(&self) -> f32 {
        if self.storage_total == 0 {
            return 0.0;
        }
        self.storage_used as f32 / self.storage_total as f32
    }

    /// Apply the pending firmware update
    pub fn apply_system_update(&mut self) {
        self.os_version = "14.2 (One UI 6.5)".to_string();
        self.os_build = "UP1A.240315.001.S928BXXU2BXDB".to_string();
        self.update_available = false;
    }
}

/// Mask every character except the last four.
///
/// The masked form keeps the original length; `reveal` returns the value
/// untouched.
pub fn mask_sensitive(value: &str, reveal: bool) -> String {
    if reveal {
        return value.to_string();
    }
    let len = value.chars().count();
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 4 < len { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking_hides_all_but_last_four() {
        let phone = "+1 (555) 012-3456";
        let masked = mask_sensitive(phone, false);

        assert_eq!(masked.chars().count(), phone.chars().count());
        assert!(masked.ends_with("3456"));
        assert!(masked[..masked.len() - 4].chars().all(|c| c == '*'));
    }

    #[test]
    fn reveal_returns_original() {
        let email = "developer.nexus@proton.me";
        assert_eq!(mask_sensitive(email, true), email);
        assert_eq!(mask_sensitive(email, false), "*********************n.me");
    }

    #[test]
    fn short_values_are_not_masked() {
        assert_eq!(mask_sensitive("abc", false), "abc");
        assert_eq!(mask_sensitive("", false), "");
    }

    #[test]
    fn system_update_clears_flag() {
        let mut device = DeviceInfo::mock();
        assert!(device.update_available);

        device.apply_system_update();
        assert!(!device.update_available);
        assert_eq!(device.os_version, "14.2 (One UI 6.5)");
    }

    #[test]
    fn storage_math() {
        let device = DeviceInfo::mock();
        assert_eq!(device.storage_free(), 370);
        assert_eq!(device.short_model(), "Galaxy S24 Ultra");
    }

    #[test]
    fn device_info_json_uses_display_names_for_os() {
        let json = serde_json::to_string(&OsType::Ios).unwrap();
        assert_eq!(json, "\"iOS\"");
    }
}
