//! Operators - Console accounts, sign-in and the login audit trail

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AccessError;
use crate::sim::timer::Delay;

/// The seeded administrator; never revocable
pub const ROOT_ADMIN_EMAIL: &str = "admin@duplex.nexus";

/// Login audit trail length
pub const LOGIN_LOG_CAPACITY: usize = 50;

/// Simulated credential check time
pub const AUTH_DELAY_MS: u64 = 1500;

/// Simulated federated sign-in time
pub const GOOGLE_AUTH_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    #[default]
    Operator,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Operator => "Operator",
        }
    }

    pub fn all() -> &'static [Role] {
        &[Role::Operator, Role::Admin]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperatorStatus {
    #[default]
    Active,
    Suspended,
}

/// A provisioned console account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub status: OperatorStatus,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
}

impl Operator {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            role,
            status: OperatorStatus::Active,
            last_active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == OperatorStatus::Active
    }

    /// Case-insensitive match on name or email
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }
}

/// Seed operator list
pub fn default_operators() -> Vec<Operator> {
    vec![Operator {
        id: "1".to_string(),
        email: ROOT_ADMIN_EMAIL.to_string(),
        name: "System Administrator".to_string(),
        role: Role::Admin,
        status: OperatorStatus::Active,
        last_active: None,
    }]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    #[default]
    None,
}

/// License held by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Active and not past its expiry date
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active
            && self.expiry_date.map(|exp| exp > now).unwrap_or(true)
    }
}

/// The signed-in operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn has_license(&self, now: DateTime<Utc>) -> bool {
        self.subscription
            .as_ref()
            .map(|s| s.is_valid_at(now))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    Password,
    Google,
    Registration,
}

impl LoginMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Password => "Password",
            Self::Google => "Google",
            Self::Registration => "Registration",
        }
    }
}

/// One successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginLog {
    pub id: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub method: LoginMethod,
}

impl LoginLog {
    pub fn new(email: impl Into<String>, method: LoginMethod, rng: &mut impl Rng) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            timestamp: Utc::now(),
            ip_address: random_private_ip(rng),
            method,
        }
    }
}

/// Front-insert a login record, keeping the newest [`LOGIN_LOG_CAPACITY`]
pub fn record_login(logs: &mut Vec<LoginLog>, entry: LoginLog) {
    logs.insert(0, entry);
    logs.truncate(LOGIN_LOG_CAPACITY);
}

fn random_private_ip(rng: &mut impl Rng) -> String {
    format!(
        "192.168.{}.{}",
        rng.random_range(0..=254u8),
        rng.random_range(1..=254u8)
    )
}

/// Sign-in screen mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Resolve a sign-in attempt against the provisioned list.
///
/// Passwords are never checked; only the email is looked up.
pub fn authenticate(
    operators: &[Operator],
    email: &str,
    mode: AuthMode,
) -> Result<(User, LoginMethod), AccessError> {
    let email = email.trim();
    let operator = operators.iter().find(|op| op.email == email);

    match (operator, mode) {
        (Some(op), _) if op.is_active() => Ok((
            User {
                email: op.email.clone(),
                name: op.name.clone(),
                role: op.role,
                subscription: None,
            },
            LoginMethod::Password,
        )),
        (None, AuthMode::Login) => Err(AccessError::Unauthorized),
        (_, AuthMode::Register) => Ok((
            User {
                email: email.to_string(),
                name: "New Operator".to_string(),
                role: Role::Operator,
                subscription: None,
            },
            LoginMethod::Registration,
        )),
        (Some(_), AuthMode::Login) => Err(AccessError::VerificationFailed),
    }
}

/// The federated sign-in identity
pub fn google_user() -> User {
    User {
        email: "google.user@gmail.com".to_string(),
        name: "Google Operator".to_string(),
        role: Role::Operator,
        subscription: None,
    }
}

/// What a pending sign-in will resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Credentials { email: String, mode: AuthMode },
    Google,
}

/// A sign-in attempt waiting out its simulated delay
#[derive(Debug, Clone)]
pub struct PendingAuth {
    pub request: AuthRequest,
    delay: Delay,
}

impl PendingAuth {
    pub fn new(request: AuthRequest, now: Instant) -> Self {
        let millis = match request {
            AuthRequest::Credentials { .. } => AUTH_DELAY_MS,
            AuthRequest::Google => GOOGLE_AUTH_DELAY_MS,
        };
        Self {
            request,
            delay: Delay::from_millis(now, millis),
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.delay.is_due(now)
    }

    /// Resolve against the operator list
    pub fn resolve(&self, operators: &[Operator]) -> Result<(User, LoginMethod), AccessError> {
        match &self.request {
            AuthRequest::Credentials { email, mode } => authenticate(operators, email, *mode),
            AuthRequest::Google => Ok((google_user(), LoginMethod::Google)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn login_finds_provisioned_operator() {
        let ops = default_operators();
        let (user, method) = authenticate(&ops, ROOT_ADMIN_EMAIL, AuthMode::Login).unwrap();
        assert_eq!(user.name, "System Administrator");
        assert!(user.is_admin());
        assert_eq!(method, LoginMethod::Password);
    }

    #[test]
    fn login_rejects_unknown_email() {
        let ops = default_operators();
        let err = authenticate(&ops, "nobody@x.io", AuthMode::Login).unwrap_err();
        assert_eq!(err, AccessError::Unauthorized);
    }

    #[test]
    fn login_rejects_suspended_operator() {
        let mut ops = default_operators();
        ops[0].status = OperatorStatus::Suspended;
        let err = authenticate(&ops, ROOT_ADMIN_EMAIL, AuthMode::Login).unwrap_err();
        assert_eq!(err, AccessError::VerificationFailed);
    }

    #[test]
    fn register_creates_new_operator_identity() {
        let ops = default_operators();
        let (user, method) = authenticate(&ops, "new@lab.io", AuthMode::Register).unwrap();
        assert_eq!(user.name, "New Operator");
        assert_eq!(user.role, Role::Operator);
        assert_eq!(method, LoginMethod::Registration);
    }

    #[test]
    fn login_log_is_front_inserted_and_capped() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut logs = Vec::new();
        for i in 0..60 {
            record_login(
                &mut logs,
                LoginLog::new(format!("op{}@lab.io", i), LoginMethod::Password, &mut rng),
            );
        }
        assert_eq!(logs.len(), LOGIN_LOG_CAPACITY);
        assert_eq!(logs[0].email, "op59@lab.io");
        assert!(logs[0].ip_address.starts_with("192.168."));
    }

    #[test]
    fn pending_google_auth_resolves_after_delay() {
        let start = Instant::now();
        let pending = PendingAuth::new(AuthRequest::Google, start);
        assert!(!pending.is_due(start));
        assert!(pending.is_due(start + std::time::Duration::from_millis(GOOGLE_AUTH_DELAY_MS)));

        let (user, method) = pending.resolve(&[]).unwrap();
        assert_eq!(user.email, "google.user@gmail.com");
        assert_eq!(method, LoginMethod::Google);
    }

    #[test]
    fn expired_subscription_is_not_a_license() {
        let now = Utc::now();
        let mut user = google_user();
        user.subscription = Some(Subscription {
            plan_id: "pro".to_string(),
            status: SubscriptionStatus::Active,
            expiry_date: Some(now - chrono::TimeDelta::days(1)),
        });
        assert!(!user.has_license(now));
    }
}
