//! Application settings management

use serde::{Deserialize, Serialize};

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Dark, Theme::Light]
    }
}

/// Encryption posture for vault blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SecurityLevel {
    #[default]
    Standard,
    Strict,
    Paranoid,
}

impl SecurityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Strict => "Strict",
            Self::Paranoid => "Paranoid",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Encrypted transport, local key storage",
            Self::Strict => "Per-profile keys, session lock on idle",
            Self::Paranoid => "Zero-knowledge encryption for all cloud blobs",
        }
    }

    pub fn all() -> &'static [SecurityLevel] {
        &[
            SecurityLevel::Standard,
            SecurityLevel::Strict,
            SecurityLevel::Paranoid,
        ]
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Sync the vault after every profile or settings change
    pub auto_sync: bool,
    pub theme: Theme,
    /// Keep session logs for N days
    pub log_retention_days: u32,
    pub security_level: SecurityLevel,
    /// Opt in to beta panels
    pub beta_features: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_sync: true,
            theme: Theme::Dark,
            log_retention_days: 30,
            security_level: SecurityLevel::Standard,
            beta_features: false,
        }
    }
}

impl AppSettings {
    /// Validate settings and fix any invalid values
    pub fn validate(&mut self) {
        self.log_retention_days = self.log_retention_days.clamp(1, 365);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_clamps_retention() {
        let mut settings = AppSettings {
            log_retention_days: 0,
            ..Default::default()
        };
        settings.validate();
        assert_eq!(settings.log_retention_days, 1);

        settings.log_retention_days = 9000;
        settings.validate();
        assert_eq!(settings.log_retention_days, 365);
    }
}
