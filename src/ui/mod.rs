//! User interface module - egui console for the Duplex Link

mod app;
mod components;
mod dialogs;
mod panels;
mod theme;

pub use app::DuplexApp;
