//! Data sanitizer - Destructive device actions with a stepped progress bar

use std::time::{Duration, Instant};

use super::timer::Ticker;

pub const PROGRESS_STEP: u8 = 10;
pub const STEP_INTERVAL: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeAction {
    FactoryFormat,
    SecureWipe,
    ClearCache,
}

impl SanitizeAction {
    pub fn all() -> &'static [SanitizeAction] {
        &[
            SanitizeAction::FactoryFormat,
            SanitizeAction::SecureWipe,
            SanitizeAction::ClearCache,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FactoryFormat => "Factory Format",
            Self::SecureWipe => "Secure Wipe",
            Self::ClearCache => "Clear Cache",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FactoryFormat => {
                "Completely wipes all user data and resets the device firmware to factory defaults."
            }
            Self::SecureWipe => {
                "Overwrites existing user data with random patterns to prevent forensic recovery."
            }
            Self::ClearCache => {
                "Removes temporary system files and application cache to free up storage."
            }
        }
    }

    pub fn warning(&self) -> &'static str {
        match self {
            Self::FactoryFormat => {
                "This action is irreversible. All photos, messages, and accounts will be lost."
            }
            Self::SecureWipe => "Sanitization process meets DoD 5220.22-M standards.",
            Self::ClearCache => "Safe operation. No user files will be affected.",
        }
    }

    pub fn is_destructive(&self) -> bool {
        !matches!(self, Self::ClearCache)
    }
}

#[derive(Debug, Clone, Copy)]
struct Execution {
    action: SanitizeAction,
    progress: u8,
    ticker: Ticker,
}

/// Confirm-then-execute flow for one action at a time
#[derive(Debug, Default)]
pub struct Sanitizer {
    pending_confirmation: Option<SanitizeAction>,
    running: Option<Execution>,
}

impl Sanitizer {
    /// Open the confirmation step
    pub fn request(&mut self, action: SanitizeAction) {
        if self.running.is_none() {
            self.pending_confirmation = Some(action);
        }
    }

    pub fn awaiting_confirmation(&self) -> Option<SanitizeAction> {
        self.pending_confirmation
    }

    pub fn cancel(&mut self) {
        self.pending_confirmation = None;
    }

    /// Confirm the pending action and start at 0%
    pub fn confirm(&mut self, now: Instant) {
        if let Some(action) = self.pending_confirmation.take() {
            self.running = Some(Execution {
                action,
                progress: 0,
                ticker: Ticker::new(now, STEP_INTERVAL),
            });
        }
    }

    pub fn running(&self) -> Option<(SanitizeAction, u8)> {
        self.running.map(|r| (r.action, r.progress))
    }

    /// Returns the action once progress passes 100%
    pub fn poll(&mut self, now: Instant) -> Option<SanitizeAction> {
        let run = self.running.as_mut()?;
        if !run.ticker.poll(now) {
            return None;
        }
        if run.progress >= 100 {
            let action = run.action;
            self.running = None;
            return Some(action);
        }
        run.progress = (run.progress + PROGRESS_STEP).min(100);
        None
    }
}

/// Session log line for a finished action
pub fn completion_message(action: SanitizeAction) -> String {
    format!("Successfully completed: {}", action.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_runs_without_confirmation() {
        let mut sanitizer = Sanitizer::default();
        sanitizer.request(SanitizeAction::SecureWipe);
        sanitizer.cancel();
        sanitizer.confirm(Instant::now());
        assert!(sanitizer.running().is_none());
    }

    #[test]
    fn progress_steps_by_ten_then_completes() {
        let start = Instant::now();
        let mut sanitizer = Sanitizer::default();
        sanitizer.request(SanitizeAction::ClearCache);
        sanitizer.confirm(start);
        assert_eq!(sanitizer.running(), Some((SanitizeAction::ClearCache, 0)));

        let mut seen = vec![0];
        let mut done = None;
        for i in 1..=11u32 {
            done = sanitizer.poll(start + STEP_INTERVAL * i);
            if let Some((_, progress)) = sanitizer.running() {
                seen.push(progress);
            }
        }

        assert_eq!(seen, (0..=100).step_by(10).collect::<Vec<u8>>());
        assert_eq!(done, Some(SanitizeAction::ClearCache));
        assert!(sanitizer.running().is_none());
        assert_eq!(
            completion_message(SanitizeAction::ClearCache),
            "Successfully completed: Clear Cache"
        );
    }
}
