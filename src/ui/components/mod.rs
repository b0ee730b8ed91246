//! Reusable UI components

mod masked_field;
mod resource_bar;
pub mod section;
mod status_badge;

pub use masked_field::masked_field;
pub use resource_bar::ResourceBar;
pub use status_badge::StatusBadge;
