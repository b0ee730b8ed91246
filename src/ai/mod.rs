//! Generative AI integration: diagnostics, schematics and support lookup

mod config;
mod gemini;
mod service;
mod types;

pub use service::AiService;
pub use types::{AiResult, SupportInfo};
