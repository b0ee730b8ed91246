//! Core module - Application state, the device link, and console accounts

mod app_state;
pub mod device;
pub mod error;
pub mod link;
pub mod log_stream;
pub mod operator;
pub mod profile;
pub mod settings;
pub mod subscription;
pub mod sync;

pub use app_state::{AppState, StateEvent};
pub use device::{mask_sensitive, BugSeverity, DeviceBug, DeviceInfo, DeviceStatus};
pub use error::AccessError;
pub use log_stream::{LogEntry, LogLevel};
pub use operator::{default_operators, AuthMode, LoginLog, Operator, Role, Subscription, User};
pub use profile::{DeviceProfile, ProfileCategory, ProfileId};
pub use settings::AppSettings;
pub use subscription::{default_plans, PlanDuration, SubscriptionPlan};
pub use sync::SyncStatus;
