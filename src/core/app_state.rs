//! Application state - Central state for the Duplex Link console
//!
//! Owns everything that outlives a single panel: the signed-in user, the
//! device link, the session log, the vault, operators, plans, settings and
//! cloud sync. Every change to persisted state is written to the store
//! before the mutating call returns.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use super::device::DeviceStatus;
use super::error::AccessError;
use super::link::{DeviceLink, LinkEvent};
use super::log_stream::{LogBuffer, LogLevel, LogStream};
use super::operator::{
    record_login, AuthMode, AuthRequest, LoginLog, Operator, PendingAuth, Role, Subscription,
    User, ROOT_ADMIN_EMAIL,
};
use super::profile::{DeviceProfile, ProfileCategory, ProfileId};
use super::settings::AppSettings;
use super::subscription::{self, SubscriptionPlan};
use super::sync::{mark_synced, CloudSync, RemoteSnapshot, SyncEvent};
use crate::persistence::{keys, Database};

/// Something the UI should surface after a [`AppState::tick`]
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    SignedIn { name: String },
    SignInFailed(AccessError),
    LinkEstablished { model: String },
    SyncCompleted,
    SyncFailed,
    RemoteFetched(Option<RemoteSnapshot>),
}

/// Central application state
pub struct AppState {
    /// Signed-in operator
    pub user: Option<User>,
    /// The simulated USB link
    pub link: DeviceLink,
    /// Session operation log
    pub logs: LogBuffer,
    log_stream: LogStream,
    /// GMT Vault snapshots
    pub profiles: Vec<DeviceProfile>,
    /// Provisioned accounts
    pub operators: Vec<Operator>,
    pub login_logs: Vec<LoginLog>,
    pub plans: Vec<SubscriptionPlan>,
    /// Purchased licenses by email, restored on every sign-in
    licenses: BTreeMap<String, Subscription>,
    pub settings: AppSettings,
    pub sync: CloudSync,
    pending_auth: Option<PendingAuth>,
    sync_requested: bool,
    rng: StdRng,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create state from whatever the store holds
    pub fn new(database: Database) -> Result<Self> {
        database.initialize()?;
        Self::with_rng(database, StdRng::from_os_rng())
    }

    fn with_rng(database: Database, rng: StdRng) -> Result<Self> {
        let user = database.load_user();
        let settings = database.load_settings();
        let profiles = database.load_profiles();
        let operators = database.load_operators();
        let login_logs = database.load_login_logs();
        let plans = database.load_plans();
        let licenses = database.load_licenses();
        let last_synced = database.load_last_synced();

        info!(
            "Loaded {} profiles, {} operators, {} plans",
            profiles.len(),
            operators.len(),
            plans.len()
        );

        Ok(Self {
            user,
            link: DeviceLink::default(),
            logs: LogBuffer::default(),
            log_stream: LogStream::default(),
            profiles,
            operators,
            login_logs,
            plans,
            licenses,
            settings,
            sync: CloudSync::new(last_synced),
            pending_auth: None,
            sync_requested: false,
            rng,
            database: Arc::new(database),
        })
    }

    /// Append a line to the session log
    pub fn log(&mut self, message: impl Into<String>, level: LogLevel) {
        self.logs.add(message, level);
    }

    /// Random source shared by the simulated panels
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // === Session ===

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Whether licensed panels are open to the current user
    pub fn has_license(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.is_admin() || u.has_license(Utc::now()))
    }

    pub fn is_authenticating(&self) -> bool {
        self.pending_auth.is_some()
    }

    /// Start a credential sign-in; resolves in [`Self::tick`]
    pub fn begin_sign_in(&mut self, email: &str, mode: AuthMode, now: Instant) {
        if self.pending_auth.is_some() {
            return;
        }
        self.pending_auth = Some(PendingAuth::new(
            AuthRequest::Credentials {
                email: email.trim().to_string(),
                mode,
            },
            now,
        ));
    }

    pub fn begin_google_sign_in(&mut self, now: Instant) {
        if self.pending_auth.is_some() {
            return;
        }
        self.pending_auth = Some(PendingAuth::new(AuthRequest::Google, now));
    }

    fn complete_sign_in(&mut self, pending: PendingAuth) -> StateEvent {
        let (mut user, method) = match pending.resolve(&self.operators) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Sign-in rejected: {}", e);
                return StateEvent::SignInFailed(e);
            }
        };
        user.subscription = self.licenses.get(&user.email).cloned();

        let now = Utc::now();
        let provisioned = self
            .operators
            .iter_mut()
            .find(|op| op.email == user.email)
            .map(|op| op.last_active = Some(now))
            .is_some();
        if provisioned {
            if let Err(e) = self.database.save_operators(&self.operators) {
                error!("Failed to persist operators: {}", e);
            }
        }

        record_login(
            &mut self.login_logs,
            LoginLog::new(&user.email, method, &mut self.rng),
        );
        if let Err(e) = self.database.save_login_logs(&self.login_logs) {
            error!("Failed to persist login logs: {}", e);
        }
        if let Err(e) = self.database.save_user(Some(&user)) {
            error!("Failed to persist session: {}", e);
        }

        info!("{} signed in via {}", user.email, method.label());
        let name = user.name.clone();
        self.user = Some(user);
        StateEvent::SignedIn { name }
    }

    /// Clear the session and drop the link
    pub fn sign_out(&mut self) -> Result<()> {
        self.disconnect();
        self.pending_auth = None;
        self.user = None;
        self.database.save_user(None)?;
        info!("Signed out");
        Ok(())
    }

    // === Duplex Link ===

    pub fn connect(&mut self, now: Instant) {
        if self.link.connect(now) {
            self.log("Initiating USB handshake...", LogLevel::Info);
        }
    }

    pub fn disconnect(&mut self) {
        if self.link.status() == DeviceStatus::Disconnected {
            return;
        }
        self.log_stream.stop();
        self.link.disconnect();
        self.log("Device disconnected from USB port", LogLevel::Warning);
        info!("Duplex link terminated");
    }

    fn on_link_established(&mut self, model: &str, now: Instant) {
        self.log("Secure data bridge established", LogLevel::Success);
        self.log(format!("Device linked: {}", model), LogLevel::Info);
        self.log_stream.start(now, &mut self.rng);
    }

    /// Apply the pending system update to the linked device
    pub fn install_update(&mut self) -> Result<(), AccessError> {
        let device = self.link.device_mut().ok_or(AccessError::NoDevice)?;
        device.apply_system_update();
        self.log("System update installed successfully", LogLevel::Success);
        Ok(())
    }

    // === GMT Vault ===

    /// Snapshot the linked device into the vault
    pub fn save_profile(&mut self, name: &str, category: ProfileCategory) -> Result<ProfileId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccessError::EmptyProfileName.into());
        }
        let device = self
            .link
            .device()
            .filter(|_| self.link.is_connected())
            .cloned()
            .ok_or(AccessError::NoDevice)?;

        let profile = DeviceProfile::new(name, category, device);
        let id = profile.id;
        self.profiles.push(profile);
        self.database.save_profiles(&self.profiles)?;
        self.log(format!("Profile '{}' committed to vault", name), LogLevel::Success);
        self.request_auto_sync();
        info!("Saved profile {}", id);
        Ok(id)
    }

    pub fn delete_profile(&mut self, id: ProfileId) -> Result<()> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or(AccessError::ProfileNotFound)?;
        let removed = self.profiles.remove(index);
        self.database.save_profiles(&self.profiles)?;
        self.log(
            format!("Profile '{}' purged from vault", removed.profile_name),
            LogLevel::Warning,
        );
        self.request_auto_sync();
        Ok(())
    }

    /// Restore a snapshot as the active link
    pub fn load_profile(&mut self, id: ProfileId, now: Instant) -> Result<(), AccessError> {
        let profile = self
            .profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or(AccessError::ProfileNotFound)?;
        let name = profile.profile_name.clone();
        let device = profile.device_info.clone();

        if !self.link.is_connected() {
            self.log_stream.start(now, &mut self.rng);
        }
        self.link.attach(device);
        self.log(format!("Loaded profile: {}", name), LogLevel::Info);
        Ok(())
    }

    // === Operator control ===

    pub fn add_operator(&mut self, name: &str, email: &str, role: Role) -> Result<()> {
        self.require_admin()?;
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() {
            return Err(AccessError::MissingOperatorFields.into());
        }
        self.operators.push(Operator::new(name, email, role));
        self.database.save_operators(&self.operators)?;
        self.log(format!("Operator provisioned: {}", email), LogLevel::Success);
        Ok(())
    }

    /// Revoke exactly one operator
    pub fn remove_operator(&mut self, id: &str) -> Result<()> {
        self.require_admin()?;
        let acting = self
            .user
            .as_ref()
            .map(|u| u.email.clone())
            .ok_or(AccessError::NotSignedIn)?;
        let index = self
            .operators
            .iter()
            .position(|op| op.id == id)
            .ok_or(AccessError::OperatorNotFound)?;

        let target = &self.operators[index];
        if target.email == acting {
            return Err(AccessError::SelfRevocation.into());
        }
        if target.email == ROOT_ADMIN_EMAIL {
            return Err(AccessError::ProtectedOperator.into());
        }

        let removed = self.operators.remove(index);
        self.database.save_operators(&self.operators)?;
        self.log(format!("Access revoked: {}", removed.email), LogLevel::Warning);
        Ok(())
    }

    // === Licensing ===

    pub fn subscribe(&mut self, plan_id: &str) -> Result<()> {
        let plan = self
            .plans
            .iter()
            .find(|p| p.id == plan_id)
            .cloned()
            .ok_or(AccessError::PlanNotFound)?;
        let user = self.user.as_mut().ok_or(AccessError::NotSignedIn)?;

        subscription::subscribe(user, &plan, Utc::now());
        self.database.save_user(Some(&*user))?;
        if let Some(license) = user.subscription.clone() {
            self.licenses.insert(user.email.clone(), license);
            self.database.save_licenses(&self.licenses)?;
        }
        self.log(format!("License activated: {}", plan.name), LogLevel::Success);
        Ok(())
    }

    fn require_admin(&self) -> Result<(), AccessError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessError::AdminRequired)
        }
    }

    /// Replace a plan in place
    pub fn update_plan(&mut self, plan: SubscriptionPlan) -> Result<()> {
        self.require_admin()?;
        let slot = self
            .plans
            .iter_mut()
            .find(|p| p.id == plan.id)
            .ok_or(AccessError::PlanNotFound)?;
        *slot = plan;
        self.database.save_plans(&self.plans)?;
        Ok(())
    }

    pub fn add_plan(&mut self) -> Result<String> {
        self.require_admin()?;
        let plan = SubscriptionPlan::blank();
        let id = plan.id.clone();
        self.plans.push(plan);
        self.database.save_plans(&self.plans)?;
        Ok(id)
    }

    pub fn remove_plan(&mut self, plan_id: &str) -> Result<()> {
        self.require_admin()?;
        let before = self.plans.len();
        self.plans.retain(|p| p.id != plan_id);
        if self.plans.len() == before {
            return Err(AccessError::PlanNotFound.into());
        }
        self.database.save_plans(&self.plans)?;
        Ok(())
    }

    // === Settings ===

    /// Replace settings wholesale after validation
    pub fn update_settings(&mut self, mut settings: AppSettings) -> Result<()> {
        settings.validate();
        if settings == self.settings {
            return Ok(());
        }
        self.settings = settings;
        self.database.save_settings(&self.settings)?;
        self.request_auto_sync();
        Ok(())
    }

    /// Purge the session log buffer
    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    /// Wipe the store and fall back to seeded defaults
    pub fn factory_reset(&mut self) -> Result<()> {
        self.disconnect();
        self.database.clear_all()?;

        self.user = None;
        self.pending_auth = None;
        self.logs.clear();
        self.profiles = self.database.load_profiles();
        self.operators = self.database.load_operators();
        self.login_logs = self.database.load_login_logs();
        self.plans = self.database.load_plans();
        self.licenses = self.database.load_licenses();
        self.settings = self.database.load_settings();
        self.sync.reset();
        self.sync_requested = false;

        warn!("Factory reset performed");
        Ok(())
    }

    // === Cloud sync ===

    fn request_auto_sync(&mut self) {
        if self.settings.auto_sync {
            self.sync_requested = true;
        }
    }

    /// Manual "Sync Vault Now"
    pub fn request_sync(&mut self, now: Instant) {
        if self.sync.start_sync(now) {
            self.log("Encrypting vault for cloud upload...", LogLevel::Info);
        }
    }

    pub fn request_fetch(&mut self, now: Instant) {
        self.sync.start_fetch(now);
    }

    fn upload_vault(&mut self) -> Result<()> {
        mark_synced(&mut self.profiles);
        self.database.save_profiles(&self.profiles)?;
        self.database.save_settings(&self.settings)?;
        Ok(())
    }

    fn fetch_vault(&self) -> Option<RemoteSnapshot> {
        let has = |key: &str| matches!(self.database.get_raw(key), Ok(Some(_)));
        if !has(keys::PROFILES) || !has(keys::SETTINGS) {
            return None;
        }
        Some(RemoteSnapshot {
            profiles: self.database.load_profiles(),
            settings: self.database.load_settings(),
        })
    }

    /// Adopt a fetched snapshot as local state
    pub fn apply_remote(&mut self, snapshot: RemoteSnapshot) -> Result<()> {
        self.profiles = snapshot.profiles;
        self.settings = snapshot.settings;
        self.settings.validate();
        self.database.save_profiles(&self.profiles)?;
        self.database.save_settings(&self.settings)?;
        self.log("Vault restored from cloud snapshot", LogLevel::Success);
        Ok(())
    }

    // === Frame loop ===

    /// Advance every clock-driven workflow
    pub fn tick(&mut self, now: Instant) -> Vec<StateEvent> {
        let mut events = Vec::new();

        if self.pending_auth.as_ref().is_some_and(|p| p.is_due(now)) {
            if let Some(pending) = self.pending_auth.take() {
                events.push(self.complete_sign_in(pending));
            }
        }

        if let Some(LinkEvent::Established(device)) = self.link.poll(now) {
            self.on_link_established(device.short_model(), now);
            events.push(StateEvent::LinkEstablished {
                model: device.model,
            });
        }

        if let Some(entry) = self.log_stream.poll(now, &mut self.rng) {
            self.logs.push(entry);
        }

        if std::mem::take(&mut self.sync_requested) {
            self.request_sync(now);
        }

        match self.sync.poll(now) {
            Some(SyncEvent::UploadDue) => match self.upload_vault() {
                Ok(()) => {
                    if let Some(when) = self.sync.finish(true).map(str::to_owned) {
                        if let Err(e) = self.database.save_last_synced(&when) {
                            error!("Failed to persist sync time: {}", e);
                        }
                    }
                    self.log("Vault synchronized to cloud", LogLevel::Success);
                    events.push(StateEvent::SyncCompleted);
                }
                Err(e) => {
                    error!("Vault sync failed: {}", e);
                    self.sync.finish(false);
                    self.log("Vault sync failed", LogLevel::Error);
                    events.push(StateEvent::SyncFailed);
                }
            },
            Some(SyncEvent::FetchDue) => {
                events.push(StateEvent::RemoteFetched(self.fetch_vault()));
            }
            None => {}
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::link::HANDSHAKE_MS;
    use crate::core::operator::{AUTH_DELAY_MS, GOOGLE_AUTH_DELAY_MS};
    use crate::core::sync::{SyncStatus, FETCH_DELAY_MS, SYNC_DELAY_MS};
    use crate::core::DeviceInfo;
    use std::time::Duration;

    fn state() -> AppState {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        AppState::with_rng(db, StdRng::seed_from_u64(7)).unwrap()
    }

    fn after(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn signed_in_admin() -> (AppState, Instant) {
        let mut s = state();
        let start = Instant::now();
        s.begin_sign_in(ROOT_ADMIN_EMAIL, AuthMode::Login, start);
        s.tick(after(start, AUTH_DELAY_MS));
        assert!(s.is_admin());
        (s, start)
    }

    fn connected(s: &mut AppState, start: Instant) -> Instant {
        s.connect(start);
        let now = after(start, HANDSHAKE_MS);
        s.tick(now);
        now
    }

    #[test]
    fn sign_in_waits_for_delay_and_records_login() {
        let mut s = state();
        let start = Instant::now();
        s.begin_sign_in(ROOT_ADMIN_EMAIL, AuthMode::Login, start);

        assert!(s.tick(after(start, 1000)).is_empty());
        assert!(!s.is_signed_in());

        let events = s.tick(after(start, AUTH_DELAY_MS));
        assert_eq!(
            events,
            vec![StateEvent::SignedIn {
                name: "System Administrator".to_string()
            }]
        );
        assert_eq!(s.login_logs.len(), 1);
        assert_eq!(s.database.load_login_logs(), s.login_logs);
        assert_eq!(s.database.load_user(), s.user);
        assert!(s.operators[0].last_active.is_some());
    }

    #[test]
    fn unknown_operator_is_refused() {
        let mut s = state();
        let start = Instant::now();
        s.begin_sign_in("ghost@lab.io", AuthMode::Login, start);
        let events = s.tick(after(start, AUTH_DELAY_MS));
        assert_eq!(events, vec![StateEvent::SignInFailed(AccessError::Unauthorized)]);
        assert!(s.login_logs.is_empty());
    }

    #[test]
    fn google_sign_in_is_never_gated_by_operator_list() {
        let mut s = state();
        let start = Instant::now();
        s.begin_google_sign_in(start);
        s.tick(after(start, GOOGLE_AUTH_DELAY_MS));
        assert_eq!(s.user.as_ref().unwrap().name, "Google Operator");
        assert!(!s.has_license());
    }

    #[test]
    fn connect_populates_device_and_logs() {
        let mut s = state();
        let start = Instant::now();
        s.connect(start);
        assert_eq!(s.link.status(), DeviceStatus::Connecting);

        let events = s.tick(after(start, HANDSHAKE_MS));
        assert_eq!(
            events,
            vec![StateEvent::LinkEstablished {
                model: DeviceInfo::mock().model
            }]
        );
        assert_eq!(s.link.status(), DeviceStatus::Connected);
        assert_eq!(s.link.device(), Some(&DeviceInfo::mock()));
        assert!(s.logs.iter().any(|l| l.message == "Secure data bridge established"));
    }

    #[test]
    fn disconnect_clears_device_and_diagnostic() {
        let mut s = state();
        let now = connected(&mut s, Instant::now());
        s.link.diagnostic = "cached".to_string();

        s.disconnect();
        assert_eq!(s.link.status(), DeviceStatus::Disconnected);
        assert!(s.link.device().is_none());
        assert!(s.link.diagnostic.is_empty());
        assert_eq!(s.logs.latest().unwrap().level, LogLevel::Warning);

        let before = s.logs.len();
        s.tick(now + Duration::from_secs(30));
        assert_eq!(s.logs.len(), before);
    }

    #[test]
    fn save_profile_requires_device_and_name() {
        let mut s = state();
        let err = s.save_profile("Snapshot", ProfileCategory::Audit).unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::NoDevice));

        connected(&mut s, Instant::now());
        let err = s.save_profile("   ", ProfileCategory::Audit).unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::EmptyProfileName));
    }

    #[test]
    fn save_and_delete_profile() {
        let mut s = state();
        connected(&mut s, Instant::now());

        let a = s.save_profile("Alpha", ProfileCategory::Forensic).unwrap();
        let b = s.save_profile("Alpha", ProfileCategory::Forensic).unwrap();
        assert_ne!(a, b);
        assert_eq!(s.profiles.len(), 2);
        assert!(!s.profiles[0].cloud_synced);
        assert_eq!(s.database.load_profiles(), s.profiles);

        s.delete_profile(a).unwrap();
        assert_eq!(s.profiles.len(), 1);
        assert_eq!(s.profiles[0].id, b);
        assert_eq!(s.database.load_profiles().len(), 1);
    }

    #[test]
    fn load_profile_restores_link() {
        let mut s = state();
        s.settings.auto_sync = false;
        connected(&mut s, Instant::now());
        let id = s.save_profile("Alpha", ProfileCategory::Diagnostic).unwrap();
        s.disconnect();

        let loaded_at = Instant::now() + Duration::from_secs(60);
        s.load_profile(id, loaded_at).unwrap();
        assert!(s.link.is_connected());
        assert_eq!(s.link.device(), Some(&DeviceInfo::mock()));

        // The event stream runs on the caller's clock
        let before = s.logs.len();
        s.tick(after(loaded_at, 1999));
        assert_eq!(s.logs.len(), before);
        s.tick(after(loaded_at, 5000));
        assert_eq!(s.logs.len(), before + 1);
    }

    #[test]
    fn add_and_remove_operator() {
        let (mut s, _) = signed_in_admin();
        s.add_operator("Marcus", "marcus@lab.io", Role::Operator).unwrap();
        s.add_operator("Ivy", "ivy@lab.io", Role::Admin).unwrap();
        assert_eq!(s.operators.len(), 3);

        let marcus = s.operators[1].id.clone();
        s.remove_operator(&marcus).unwrap();
        assert_eq!(s.operators.len(), 2);
        assert!(s.operators.iter().all(|op| op.id != marcus));
        assert_eq!(s.database.load_operators(), s.operators);
    }

    #[test]
    fn operator_control_requires_admin() {
        let (mut s, start) = signed_in_admin();
        s.add_operator("Ivy", "ivy@lab.io", Role::Operator).unwrap();
        let root = s.operators[0].id.clone();
        s.sign_out().unwrap();

        s.begin_sign_in("ivy@lab.io", AuthMode::Login, start);
        s.tick(after(start, AUTH_DELAY_MS));
        assert!(!s.is_admin());

        let err = s.add_operator("Mallory", "mallory@lab.io", Role::Admin).unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::AdminRequired));
        let err = s.remove_operator(&root).unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::AdminRequired));
        assert_eq!(s.operators.len(), 2);
        assert_eq!(s.database.load_operators(), s.operators);
    }

    #[test]
    fn add_operator_rejects_blank_fields() {
        let (mut s, _) = signed_in_admin();
        let err = s.add_operator("", "x@lab.io", Role::Operator).unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::MissingOperatorFields));
    }

    #[test]
    fn self_and_root_revocation_are_refused() {
        let (mut s, start) = signed_in_admin();
        let root = s.operators[0].id.clone();
        let err = s.remove_operator(&root).unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::SelfRevocation));

        s.add_operator("Ivy", "ivy@lab.io", Role::Admin).unwrap();
        s.sign_out().unwrap();
        s.begin_sign_in("ivy@lab.io", AuthMode::Login, start);
        s.tick(after(start, AUTH_DELAY_MS));
        let err = s.remove_operator(&root).unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::ProtectedOperator));
        assert_eq!(s.operators.len(), 2);
    }

    #[test]
    fn sign_out_drops_link_and_session() {
        let (mut s, start) = signed_in_admin();
        connected(&mut s, start);
        s.sign_out().unwrap();
        assert!(!s.is_signed_in());
        assert!(!s.link.is_connected());
        assert!(s.database.load_user().is_none());
    }

    #[test]
    fn subscribe_unlocks_license() {
        let mut s = state();
        let start = Instant::now();
        s.begin_google_sign_in(start);
        s.tick(after(start, GOOGLE_AUTH_DELAY_MS));

        s.subscribe("pro").unwrap();
        assert!(s.has_license());
        assert_eq!(s.database.load_user(), s.user);
    }

    #[test]
    fn license_survives_sign_out_and_sign_in() {
        let (mut s, start) = signed_in_admin();
        s.add_operator("Ivy", "ivy@lab.io", Role::Operator).unwrap();
        s.sign_out().unwrap();

        s.begin_sign_in("ivy@lab.io", AuthMode::Login, start);
        s.tick(after(start, AUTH_DELAY_MS));
        s.subscribe("enterprise").unwrap();
        assert!(s.has_license());

        s.sign_out().unwrap();
        let later = after(start, 10_000);
        s.begin_sign_in("ivy@lab.io", AuthMode::Login, later);
        s.tick(after(later, AUTH_DELAY_MS));

        let user = s.user.as_ref().unwrap();
        assert_eq!(user.subscription.as_ref().unwrap().plan_id, "enterprise");
        assert!(s.has_license());
        assert_eq!(s.database.load_licenses().len(), 1);
    }

    #[test]
    fn plan_editing_is_admin_only() {
        let mut s = state();
        let start = Instant::now();
        s.begin_google_sign_in(start);
        s.tick(after(start, GOOGLE_AUTH_DELAY_MS));
        let err = s.add_plan().unwrap_err();
        assert_eq!(err.downcast_ref::<AccessError>(), Some(&AccessError::AdminRequired));

        let (mut s, _) = signed_in_admin();
        let id = s.add_plan().unwrap();
        let mut plan = s.plans.iter().find(|p| p.id == id).cloned().unwrap();
        plan.price = 9.0;
        s.update_plan(plan).unwrap();
        assert_eq!(s.database.load_plans().last().unwrap().price, 9.0);

        s.remove_plan(&id).unwrap();
        assert_eq!(s.plans.len(), 3);
    }

    #[test]
    fn settings_change_triggers_auto_sync() {
        let mut s = state();
        connected(&mut s, Instant::now());
        s.save_profile("Alpha", ProfileCategory::Audit).unwrap();

        let start = Instant::now();
        s.update_settings(AppSettings {
            beta_features: true,
            ..s.settings.clone()
        })
        .unwrap();
        s.tick(start);
        assert_eq!(s.sync.status(), SyncStatus::Syncing);

        let events = s.tick(after(start, SYNC_DELAY_MS));
        assert!(events.contains(&StateEvent::SyncCompleted));
        assert_eq!(s.sync.status(), SyncStatus::Success);
        assert!(s.database.load_profiles().iter().all(|p| p.cloud_synced));
        assert!(s.database.load_last_synced().is_some());
    }

    #[test]
    fn fetch_returns_none_until_vault_written() {
        let mut s = state();
        let start = Instant::now();
        s.request_fetch(start);
        let events = s.tick(after(start, FETCH_DELAY_MS));
        assert_eq!(events, vec![StateEvent::RemoteFetched(None)]);

        s.request_sync(start);
        s.tick(after(start, SYNC_DELAY_MS));
        s.request_fetch(start);
        let events = s.tick(after(start, SYNC_DELAY_MS + FETCH_DELAY_MS));
        assert!(matches!(events.as_slice(), [StateEvent::RemoteFetched(Some(_))]));
    }

    #[test]
    fn factory_reset_restores_defaults() {
        let (mut s, _) = signed_in_admin();
        s.add_operator("Marcus", "marcus@lab.io", Role::Operator).unwrap();
        s.update_settings(AppSettings {
            auto_sync: false,
            ..Default::default()
        })
        .unwrap();

        s.factory_reset().unwrap();
        assert!(!s.is_signed_in());
        assert_eq!(s.operators.len(), 1);
        assert_eq!(s.settings, AppSettings::default());
        assert!(s.login_logs.is_empty());
        assert!(s.database.get_raw(keys::OPERATORS).unwrap().is_none());
    }

    #[test]
    fn install_update_patches_linked_device() {
        let mut s = state();
        assert_eq!(s.install_update(), Err(AccessError::NoDevice));
        connected(&mut s, Instant::now());
        s.install_update().unwrap();
        let device = s.link.device().unwrap();
        assert!(!device.update_available);
        assert_eq!(device.os_version, "14.2 (One UI 6.5)");
    }
}
