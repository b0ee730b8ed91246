//! Identity reset - Lockscreen, biometric and account credential overrides

use std::time::Instant;

use super::timer::Delay;
use crate::core::AccessError;

/// Stage one: secure-enclave handshake
pub const HANDSHAKE_MS: u64 = 1500;

/// Stage two: token exchange
pub const TOKEN_EXCHANGE_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Device account password
    Account,
    /// Lockscreen PIN or pattern
    Pin,
    Biometric,
}

impl ResetKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Account => "Device Account Reset",
            Self::Pin => "Lockscreen Override",
            Self::Biometric => "Biometric Purge",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Account => {
                "Rebinds the primary device account to a new security key, revoking all active sessions."
            }
            Self::Pin => {
                "Forcibly clears the local password database. This will remove any PIN or Pattern requirement for entry."
            }
            Self::Biometric => {
                "Erases enrolled fingerprint and face templates from the secure enclave."
            }
        }
    }

    pub fn all() -> &'static [ResetKind] {
        &[ResetKind::Pin, ResetKind::Biometric, ResetKind::Account]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStage {
    Handshake,
    TokenExchange,
}

impl ResetStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Handshake => "Enclave handshake...",
            Self::TokenExchange => "Exchanging security tokens...",
        }
    }
}

#[derive(Debug, Clone)]
struct RunningReset {
    kind: ResetKind,
    stage: ResetStage,
    delay: Delay,
    key: Option<String>,
}

#[derive(Debug, Default)]
pub struct IdentityReset {
    running: Option<RunningReset>,
    completed: Option<ResetKind>,
    /// Key pushed by the last account reset, held until dismissed
    deployed_key: Option<String>,
}

impl IdentityReset {
    /// Deploy a reset. Account resets need a new password.
    pub fn start(
        &mut self,
        kind: ResetKind,
        new_password: &str,
        now: Instant,
    ) -> Result<(), AccessError> {
        if self.running.is_some() {
            return Ok(());
        }
        if kind == ResetKind::Account && new_password.is_empty() {
            return Err(AccessError::MissingSecurityKey);
        }
        self.dismiss();
        self.running = Some(RunningReset {
            kind,
            stage: ResetStage::Handshake,
            delay: Delay::from_millis(now, HANDSHAKE_MS),
            key: (kind == ResetKind::Account).then(|| new_password.to_string()),
        });
        Ok(())
    }

    pub fn in_progress(&self) -> Option<(ResetKind, ResetStage)> {
        self.running.as_ref().map(|r| (r.kind, r.stage))
    }

    pub fn completed(&self) -> Option<ResetKind> {
        self.completed
    }

    pub fn deployed_key(&self) -> Option<&str> {
        self.deployed_key.as_deref()
    }

    /// Close the confirmation and forget the deployed key
    pub fn dismiss(&mut self) {
        self.completed = None;
        self.deployed_key = None;
    }

    /// Returns the kind once a reset finishes
    pub fn poll(&mut self, now: Instant) -> Option<ResetKind> {
        let running = self.running.as_mut()?;
        if !running.delay.is_due(now) {
            return None;
        }
        match running.stage {
            ResetStage::Handshake => {
                running.stage = ResetStage::TokenExchange;
                running.delay = Delay::from_millis(now, TOKEN_EXCHANGE_MS);
                None
            }
            ResetStage::TokenExchange => {
                let finished = self.running.take()?;
                self.completed = Some(finished.kind);
                self.deployed_key = finished.key;
                Some(finished.kind)
            }
        }
    }
}

/// Masks all but the last two characters of a key.
///
/// Keys of two characters or fewer are masked entirely.
pub fn mask_key(key: &str) -> String {
    let len = key.chars().count();
    if len <= 2 {
        return "*".repeat(len);
    }
    key.chars()
        .enumerate()
        .map(|(i, c)| if i + 2 < len { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn account_reset_requires_password() {
        let mut reset = IdentityReset::default();
        assert_eq!(
            reset.start(ResetKind::Account, "", Instant::now()),
            Err(AccessError::MissingSecurityKey)
        );
        assert!(reset.in_progress().is_none());
    }

    #[test]
    fn reset_runs_handshake_then_token_exchange() {
        let start = Instant::now();
        let mut reset = IdentityReset::default();
        reset.start(ResetKind::Pin, "", start).unwrap();
        assert_eq!(
            reset.in_progress(),
            Some((ResetKind::Pin, ResetStage::Handshake))
        );

        let handshake_done = start + Duration::from_millis(HANDSHAKE_MS);
        assert_eq!(reset.poll(handshake_done), None);
        assert_eq!(
            reset.in_progress(),
            Some((ResetKind::Pin, ResetStage::TokenExchange))
        );

        let done = handshake_done + Duration::from_millis(TOKEN_EXCHANGE_MS);
        assert_eq!(reset.poll(done), Some(ResetKind::Pin));
        assert_eq!(reset.completed(), Some(ResetKind::Pin));
    }

    #[test]
    fn account_reset_with_password_completes() {
        let start = Instant::now();
        let mut reset = IdentityReset::default();
        reset.start(ResetKind::Account, "n3w-k3y", start).unwrap();
        reset.poll(start + Duration::from_millis(HANDSHAKE_MS));
        let done = start + Duration::from_millis(HANDSHAKE_MS + TOKEN_EXCHANGE_MS);
        assert_eq!(reset.poll(done), Some(ResetKind::Account));
        assert_eq!(reset.deployed_key(), Some("n3w-k3y"));

        reset.dismiss();
        assert!(reset.completed().is_none());
        assert!(reset.deployed_key().is_none());
    }

    #[test]
    fn pin_reset_deploys_no_key() {
        let start = Instant::now();
        let mut reset = IdentityReset::default();
        reset.start(ResetKind::Pin, "ignored", start).unwrap();
        reset.poll(start + Duration::from_millis(HANDSHAKE_MS));
        reset.poll(start + Duration::from_millis(HANDSHAKE_MS + TOKEN_EXCHANGE_MS));
        assert_eq!(reset.completed(), Some(ResetKind::Pin));
        assert!(reset.deployed_key().is_none());
    }

    #[test]
    fn key_mask_reveals_last_two_characters() {
        assert_eq!(mask_key("n3w-k3y"), "*****3y");
        assert_eq!(mask_key("abc"), "*bc");
        assert_eq!(mask_key("ab"), "**");
        assert_eq!(mask_key("a"), "*");
        assert_eq!(mask_key(""), "");
        assert_eq!(mask_key("ключ"), "**юч");
    }
}
