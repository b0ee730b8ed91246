//! User-facing validation errors

use thiserror::Error;

/// Rejections surfaced to the operator as notifications
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Cannot revoke self-access")]
    SelfRevocation,

    #[error("The root administrator account cannot be revoked")]
    ProtectedOperator,

    #[error("Operator not found")]
    OperatorNotFound,

    #[error("Name and email are both required")]
    MissingOperatorFields,

    #[error("Endpoint unauthorized. Provisioning required.")]
    Unauthorized,

    #[error("Credential verification failed.")]
    VerificationFailed,

    #[error("Connect a device before taking a snapshot")]
    NoDevice,

    #[error("Profile name cannot be empty")]
    EmptyProfileName,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Plan not found")]
    PlanNotFound,

    #[error("Administrator privileges required")]
    AdminRequired,

    #[error("Sign in first")]
    NotSignedIn,

    #[error("Please specify a new security key before deploying reset.")]
    MissingSecurityKey,

    #[error("Passwords do not match")]
    PasswordMismatch,
}
