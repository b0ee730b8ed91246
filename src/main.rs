//! Duplex Link - Simulated mobile device management and forensics console
//!
//! An egui desktop console that links to a mocked handset, keeps a vault of
//! device snapshots, manages operators and licences, and enriches the device
//! record with generative AI diagnostics.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod ai;
mod core;
mod persistence;
mod sim;
mod ui;

use anyhow::{Context, Result};
use single_instance::SingleInstance;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::AiService;
use crate::core::AppState;
use crate::persistence::Database;
use crate::ui::DuplexApp;

/// Application name constant
pub const APP_NAME: &str = "Duplex Link";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    init_logging();

    info!("{} v{} starting...", APP_NAME, APP_VERSION);

    // One process owns the store
    let instance =
        SingleInstance::new("duplex-link").context("Failed to create single instance lock")?;
    if !instance.is_single() {
        error!("Another instance of {} is already running!", APP_NAME);
        eprintln!("{} is already running!", APP_NAME);
        return Ok(());
    }

    let db = Database::new()?;
    let app_state = AppState::new(db)?;
    info!("Application state initialized");

    let ai = AiService::new()?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1360.0, 860.0])
            .with_min_inner_size([960.0, 640.0])
            .with_icon(load_app_icon()),
        ..Default::default()
    };

    info!("Starting GUI...");
    eframe::run_native(
        &format!("{} v{}", APP_NAME, APP_VERSION),
        native_options,
        Box::new(|cc| Ok(Box::new(DuplexApp::new(cc, app_state, ai)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    info!("{} shutting down", APP_NAME);
    Ok(())
}

/// Initialize the logging system
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("duplex_link=info,eframe=warn,egui=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Procedural window icon: a blue disc with a lighter inner ring
fn load_app_icon() -> egui::IconData {
    let size = 64;
    let mut rgba = vec![0u8; size * size * 4];
    let radius = size as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let dx = x as f32 - radius;
            let dy = y as f32 - radius;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius - 2.0 {
                let ring = (dist - radius * 0.55).abs() < 3.0;
                let t = dist / radius;
                let (r, g, b) = if ring {
                    (147, 197, 253)
                } else {
                    ((37.0 + t * 20.0) as u8, (99.0 - t * 30.0) as u8, (235.0 - t * 50.0) as u8)
                };
                rgba[idx] = r;
                rgba[idx + 1] = g;
                rgba[idx + 2] = b;
                rgba[idx + 3] = 255;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}
