//! Dialog windows

pub mod confirm;
pub mod edit_plan;
pub mod provision;
pub mod snapshot;

use crate::core::{ProfileId, SubscriptionPlan};

pub use edit_plan::PlanForm;
pub use provision::ProvisionForm;
pub use snapshot::SnapshotForm;

/// A destructive action held until the operator confirms it
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    DeleteProfile(ProfileId),
    RevokeOperator(String),
    RemovePlan(String),
    ClearLogs,
    FactoryReset,
    /// Run the action the sanitizer is holding
    Sanitize,
}

/// State for dialog windows
#[derive(Debug, Default)]
pub enum DialogState {
    #[default]
    None,
    Confirm {
        title: String,
        message: String,
        action: ConfirmAction,
    },
    Snapshot(SnapshotForm),
    Provision(ProvisionForm),
    EditPlan(PlanForm),
}

impl DialogState {
    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        action: ConfirmAction,
    ) -> Self {
        Self::Confirm {
            title: title.into(),
            message: message.into(),
            action,
        }
    }

    pub fn edit_plan(plan: &SubscriptionPlan) -> Self {
        Self::EditPlan(PlanForm::new(plan.clone()))
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}
