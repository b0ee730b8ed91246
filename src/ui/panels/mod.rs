//! Main content panels
//!
//! Session-wide panels live in [`Panels`] for the whole run. Everything
//! that inspects the handset lives in [`DeviceViews`], which is built when
//! a link comes up and dropped when it goes away, so each new link starts
//! from a clean slate.

pub mod analyzers;
pub mod antivirus;
pub mod apps;
pub mod audit;
pub mod auth;
pub mod blueprint;
pub mod comms;
pub mod dashboard;
pub mod diagnostics;
pub mod elevation;
pub mod files;
pub mod hardware;
pub mod identity;
pub mod location;
pub mod logs;
pub mod maintenance;
pub mod operators;
pub mod performance;
pub mod sanitizer;
pub mod settings;
pub mod subscriptions;
pub mod vault;

use std::time::Instant;

use egui::{RichText, Ui};

use super::app::{ActiveView, Notifications};
use super::dialogs::DialogState;
use super::theme::{Icons, Theme};
use crate::ai::AiService;
use crate::core::{AppState, DeviceInfo};

/// Everything a panel may touch during one frame
pub struct PanelCtx<'a> {
    pub state: &'a mut AppState,
    pub ai: &'a AiService,
    pub dialog: &'a mut DialogState,
    pub toasts: &'a mut Notifications,
    pub now: Instant,
}

/// Panels that survive link changes
#[derive(Default)]
pub struct Panels {
    pub auth: auth::AuthPanel,
    pub dashboard: dashboard::DashboardPanel,
    pub vault: vault::VaultPanel,
    pub operators: operators::OperatorsPanel,
    pub logs: logs::LogsPanel,
    pub settings: settings::SettingsPanel,
}

/// Views bound to one linked handset
pub struct DeviceViews {
    serial: String,
    pub comms: comms::CommsPanel,
    pub files: files::FilesPanel,
    pub apps: apps::AppsPanel,
    pub antivirus: antivirus::AntivirusPanel,
    pub location: location::LocationPanel,
    pub performance: performance::PerformancePanel,
    pub analyzers: analyzers::AnalyzersPanel,
    pub blueprint: blueprint::BlueprintPanel,
    pub maintenance: maintenance::MaintenancePanel,
    pub elevation: elevation::ElevationPanel,
    pub identity: identity::IdentityPanel,
    pub audit: audit::AuditPanel,
    pub diagnostics: diagnostics::DiagnosticsPanel,
    pub sanitizer: sanitizer::SanitizerPanel,
}

impl DeviceViews {
    pub fn new(device: &DeviceInfo, now: Instant) -> Self {
        Self {
            serial: device.serial_number.clone(),
            comms: Default::default(),
            files: Default::default(),
            apps: Default::default(),
            antivirus: Default::default(),
            location: Default::default(),
            performance: performance::PerformancePanel::new(now),
            analyzers: analyzers::AnalyzersPanel::new(now),
            blueprint: Default::default(),
            maintenance: maintenance::MaintenancePanel::new(device),
            elevation: Default::default(),
            identity: Default::default(),
            audit: Default::default(),
            diagnostics: Default::default(),
            sanitizer: Default::default(),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Advance every running simulation, visible or not
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        self.comms.poll(cx);
        self.files.poll(cx);
        self.apps.poll(cx);
        self.antivirus.poll(cx);
        self.location.poll(cx);
        self.performance.poll(cx);
        self.analyzers.poll(cx);
        self.maintenance.poll(cx);
        self.elevation.poll(cx);
        self.identity.poll(cx);
        self.audit.poll(cx);
        self.sanitizer.poll(cx);
    }

    pub fn show(&mut self, view: ActiveView, ui: &mut Ui, cx: &mut PanelCtx) {
        match view {
            ActiveView::Comms => self.comms.show(ui, cx),
            ActiveView::Files => self.files.show(ui, cx),
            ActiveView::Apps => self.apps.show(ui, cx),
            ActiveView::Antivirus => self.antivirus.show(ui, cx),
            ActiveView::Location => self.location.show(ui, cx),
            ActiveView::Performance => self.performance.show(ui),
            ActiveView::Analyzers => self.analyzers.show(ui),
            ActiveView::Blueprint => self.blueprint.show(ui, cx),
            ActiveView::Maintenance => self.maintenance.show(ui, cx),
            ActiveView::Elevation => self.elevation.show(ui, cx),
            ActiveView::Identity => self.identity.show(ui, cx),
            ActiveView::Audit => self.audit.show(ui, cx),
            ActiveView::Diagnostics => self.diagnostics.show(ui, cx),
            ActiveView::Hardware => hardware::render(ui, cx),
            ActiveView::Sanitizer => self.sanitizer.show(ui, cx),
            // Session views are drawn by the app itself
            _ => {}
        }
    }
}

/// Placeholder for device views while nothing is linked
pub fn disconnected(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.label(RichText::new(Icons::LINK).size(48.0).color(Theme::TEXT_MUTED));
        ui.add_space(12.0);
        ui.label(
            RichText::new("No device linked")
                .size(18.0)
                .strong()
                .color(Theme::TEXT_SECONDARY),
        );
        ui.label(
            RichText::new("Initialize the Duplex Link to access device tools")
                .color(Theme::TEXT_MUTED),
        );
    });
}
