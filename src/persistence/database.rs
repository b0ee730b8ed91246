//! SQLite-backed key/value store for persistent console state
//!
//! Each key holds one JSON blob that is rewritten wholesale on change.
//! There is no schema versioning: a missing or malformed value reads back
//! as the caller's default.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{
    default_operators, default_plans, AppSettings, DeviceProfile, LoginLog, Operator,
    Subscription, SubscriptionPlan, User,
};

/// Store keys
pub mod keys {
    pub const USER: &str = "duplex_user";
    pub const OPERATORS: &str = "duplex_operators";
    pub const PROFILES: &str = "duplex_profiles";
    pub const SETTINGS: &str = "duplex_settings";
    pub const PLANS: &str = "duplex_plans";
    pub const LOGIN_LOGS: &str = "duplex_login_logs";
    pub const LAST_SYNCED: &str = "duplex_last_synced";
    pub const LICENSES: &str = "duplex_licenses";

    pub const ALL: &[&str] = &[
        USER,
        OPERATORS,
        PROFILES,
        SETTINGS,
        PLANS,
        LOGIN_LOGS,
        LAST_SYNCED,
        LICENSES,
    ];
}

/// Database wrapper for SQLite operations
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the store in the user data directory
    pub fn new() -> Result<Self> {
        let db_path = Self::get_database_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)
            .context(format!("Failed to open database at {:?}", db_path))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        info!("Database opened at {:?}", db_path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a throwaway store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Directory holding the store file
    pub fn data_directory() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Failed to get data directory")?
            .join("DuplexLink"))
    }

    fn get_database_path() -> Result<PathBuf> {
        Ok(Self::data_directory()?.join("duplex.db"))
    }

    /// Initialize database schema
    pub fn initialize(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Database lock poisoned: {}", e))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }

    // === Raw access ===

    /// Read the raw blob under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Database lock poisoned: {}", e))?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Replace the raw blob under `key`
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Database lock poisoned: {}", e))?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Database lock poisoned: {}", e))?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        debug!("Removed {}", key);
        Ok(())
    }

    /// Drop every console key
    pub fn clear_all(&self) -> Result<()> {
        for key in keys::ALL {
            self.remove(key)?;
        }
        info!("Store cleared");
        Ok(())
    }

    // === Typed access ===

    /// Decode the blob under `key`; None when missing or malformed
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Malformed value under {}, using default: {}", key, e);
                None
            }
        }
    }

    /// Serialize `value` and store it under `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize {}", key))?;
        self.set_raw(key, &json)?;
        debug!("{} saved", key);
        Ok(())
    }

    // === Settings ===

    pub fn load_settings(&self) -> AppSettings {
        let mut settings: AppSettings = self.load(keys::SETTINGS).unwrap_or_default();
        settings.validate();
        settings
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.save(keys::SETTINGS, settings)
    }

    // === Profiles ===

    pub fn load_profiles(&self) -> Vec<DeviceProfile> {
        self.load(keys::PROFILES).unwrap_or_default()
    }

    pub fn save_profiles(&self, profiles: &[DeviceProfile]) -> Result<()> {
        self.save(keys::PROFILES, profiles)
    }

    // === Operators ===

    pub fn load_operators(&self) -> Vec<Operator> {
        self.load(keys::OPERATORS)
            .unwrap_or_else(default_operators)
    }

    pub fn save_operators(&self, operators: &[Operator]) -> Result<()> {
        self.save(keys::OPERATORS, operators)
    }

    pub fn load_login_logs(&self) -> Vec<LoginLog> {
        self.load(keys::LOGIN_LOGS).unwrap_or_default()
    }

    pub fn save_login_logs(&self, logs: &[LoginLog]) -> Result<()> {
        self.save(keys::LOGIN_LOGS, logs)
    }

    // === Session user ===

    pub fn load_user(&self) -> Option<User> {
        self.load(keys::USER)
    }

    pub fn save_user(&self, user: Option<&User>) -> Result<()> {
        match user {
            Some(user) => self.save(keys::USER, user),
            None => self.remove(keys::USER),
        }
    }

    // === Plans ===

    pub fn load_plans(&self) -> Vec<SubscriptionPlan> {
        self.load(keys::PLANS).unwrap_or_else(default_plans)
    }

    pub fn save_plans(&self, plans: &[SubscriptionPlan]) -> Result<()> {
        self.save(keys::PLANS, plans)
    }

    /// Licenses by operator email; they outlive the signed-in session
    pub fn load_licenses(&self) -> BTreeMap<String, Subscription> {
        self.load(keys::LICENSES).unwrap_or_default()
    }

    pub fn save_licenses(&self, licenses: &BTreeMap<String, Subscription>) -> Result<()> {
        self.save(keys::LICENSES, licenses)
    }

    // === Sync ===

    pub fn load_last_synced(&self) -> Option<String> {
        self.load(keys::LAST_SYNCED)
    }

    pub fn save_last_synced(&self, when: &str) -> Result<()> {
        self.save(keys::LAST_SYNCED, when)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{settings::SecurityLevel, DeviceInfo, ProfileCategory, Role};

    fn store() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn settings_round_trip() {
        let db = store();
        let settings = AppSettings {
            auto_sync: false,
            log_retention_days: 90,
            security_level: SecurityLevel::Paranoid,
            beta_features: true,
            ..Default::default()
        };

        db.save_settings(&settings).unwrap();
        assert_eq!(db.load_settings(), settings);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let db = store();
        assert_eq!(db.load_settings(), AppSettings::default());
        assert_eq!(db.load_operators(), default_operators());
        assert_eq!(db.load_plans(), default_plans());
        assert!(db.load_profiles().is_empty());
        assert!(db.load_user().is_none());
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let db = store();
        db.set_raw(keys::SETTINGS, "{not json").unwrap();
        db.set_raw(keys::OPERATORS, "[{\"email\": 5}]").unwrap();

        assert_eq!(db.load_settings(), AppSettings::default());
        assert_eq!(db.load_operators(), default_operators());
    }

    #[test]
    fn profiles_and_operators_persist() {
        let db = store();
        let profiles = vec![DeviceProfile::new(
            "Evidence",
            ProfileCategory::Forensic,
            DeviceInfo::mock(),
        )];
        let mut operators = default_operators();
        operators.push(Operator::new("Marcus Thorne", "marcus@lab.io", Role::Operator));

        db.save_profiles(&profiles).unwrap();
        db.save_operators(&operators).unwrap();

        assert_eq!(db.load_profiles(), profiles);
        assert_eq!(db.load_operators(), operators);
    }

    #[test]
    fn clear_all_removes_every_key() {
        let db = store();
        db.save_settings(&AppSettings::default()).unwrap();
        db.save_last_synced("yesterday").unwrap();

        db.clear_all().unwrap();

        for key in keys::ALL {
            assert!(db.get_raw(key).unwrap().is_none());
        }
    }

    #[test]
    fn saving_none_user_signs_out() {
        let db = store();
        let user = crate::core::operator::google_user();
        db.save_user(Some(&user)).unwrap();
        assert_eq!(db.load_user(), Some(user));

        db.save_user(None).unwrap();
        assert!(db.load_user().is_none());
    }
}
