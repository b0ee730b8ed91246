//! Main application UI

use std::time::{Duration, Instant};

use egui::{CentralPanel, Context, SidePanel, TopBottomPanel};
use tracing::{error, info};

use super::components::section::secondary_button;
use super::components::StatusBadge;
use super::dialogs::confirm::ConfirmChoice;
use super::dialogs::{self, ConfirmAction, DialogState};
use super::panels::{self, DeviceViews, PanelCtx, Panels};
use super::theme::{Icons, Theme};
use crate::ai::{AiResult, AiService};
use crate::core::{AppState, DeviceStatus, StateEvent};

/// Active view/tab in the main panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Subscriptions,
    Vault,
    Comms,
    Files,
    Apps,
    Antivirus,
    Location,
    Performance,
    Analyzers,
    Blueprint,
    Maintenance,
    Elevation,
    Identity,
    Audit,
    Diagnostics,
    Hardware,
    Sanitizer,
    Operators,
    Logs,
    Settings,
}

impl ActiveView {
    pub const ALL: [ActiveView; 21] = [
        Self::Dashboard,
        Self::Subscriptions,
        Self::Vault,
        Self::Comms,
        Self::Files,
        Self::Apps,
        Self::Antivirus,
        Self::Location,
        Self::Performance,
        Self::Analyzers,
        Self::Blueprint,
        Self::Maintenance,
        Self::Elevation,
        Self::Identity,
        Self::Audit,
        Self::Diagnostics,
        Self::Hardware,
        Self::Sanitizer,
        Self::Operators,
        Self::Logs,
        Self::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Subscriptions => "Licensing",
            Self::Vault => "GMT Vault",
            Self::Comms => "Comms Center",
            Self::Files => "Filesystem",
            Self::Apps => "App Manager",
            Self::Antivirus => "Antivirus Suite",
            Self::Location => "Location Matrix",
            Self::Performance => "Performance Lab",
            Self::Analyzers => "Advanced Analyzers",
            Self::Blueprint => "Device Blueprint",
            Self::Maintenance => "Repair & Update",
            Self::Elevation => "Elevation Lab",
            Self::Identity => "Identity Reset",
            Self::Audit => "Security Audit",
            Self::Diagnostics => "AI Diagnostics",
            Self::Hardware => "Hardware Info",
            Self::Sanitizer => "Data Sanitizer",
            Self::Operators => "Operator Control",
            Self::Logs => "Operation Logs",
            Self::Settings => "System Prefs",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Dashboard => Icons::PHONE,
            Self::Subscriptions => Icons::CARD,
            Self::Vault => Icons::VAULT,
            Self::Comms => Icons::COMMS,
            Self::Files => Icons::FOLDER,
            Self::Apps => Icons::APP,
            Self::Antivirus => Icons::SHIELD,
            Self::Location => Icons::PIN,
            Self::Performance => Icons::PULSE,
            Self::Analyzers => Icons::CHART,
            Self::Blueprint => Icons::LAYERS,
            Self::Maintenance => Icons::WRENCH,
            Self::Elevation => Icons::TERMINAL,
            Self::Identity => Icons::KEY,
            Self::Audit => Icons::AUDIT,
            Self::Diagnostics => Icons::ZAP,
            Self::Hardware => Icons::CPU,
            Self::Sanitizer => Icons::ALERT,
            Self::Operators => Icons::USERS,
            Self::Logs => Icons::HISTORY,
            Self::Settings => Icons::SETTINGS,
        }
    }

    /// Disabled in the sidebar while no device is linked
    pub fn requires_device(&self) -> bool {
        !matches!(
            self,
            Self::Dashboard
                | Self::Subscriptions
                | Self::Vault
                | Self::Operators
                | Self::Logs
                | Self::Settings
        )
    }

    /// Locked without an active license
    pub fn requires_license(&self) -> bool {
        matches!(
            self,
            Self::Elevation | Self::Identity | Self::Analyzers | Self::Blueprint
        )
    }

    /// Hidden from non-admins
    pub fn admin_only(&self) -> bool {
        matches!(self, Self::Operators)
    }
}

/// Toast message
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Toast queue shared with panels and dialogs
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.items.push(Notification {
            message: message.into(),
            level,
            created_at: Instant::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Error);
    }

    fn cleanup(&mut self, timeout: Duration) {
        self.items.retain(|n| n.created_at.elapsed() < timeout);
    }
}

/// Main application struct
pub struct DuplexApp {
    state: AppState,
    ai: AiService,
    active_view: ActiveView,
    dialog: DialogState,
    notifications: Notifications,
    panels: Panels,
    /// Per-device views; present only while a device is linked
    device_views: Option<DeviceViews>,
    first_frame: bool,
}

impl DuplexApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState, ai: AiService) -> Self {
        Theme::apply(&cc.egui_ctx, state.settings.theme);

        Self {
            state,
            ai,
            active_view: ActiveView::Dashboard,
            dialog: DialogState::None,
            notifications: Notifications::default(),
            panels: Panels::default(),
            device_views: None,
            first_frame: true,
        }
    }

    /// Advance the state machine and surface what happened
    fn tick(&mut self, ctx: &Context, now: Instant) {
        for event in self.state.tick(now) {
            match event {
                StateEvent::SignedIn { name } => {
                    self.notifications.success(format!("Welcome, {}", name));
                    self.active_view = ActiveView::Dashboard;
                }
                StateEvent::SignInFailed(e) => self.notifications.error(e.to_string()),
                StateEvent::LinkEstablished { model } => {
                    self.notifications.success(format!("Device linked: {}", model));
                }
                StateEvent::SyncCompleted => self.notifications.success("Vault synchronized to cloud"),
                StateEvent::SyncFailed => self.notifications.error("Vault sync failed"),
                StateEvent::RemoteFetched(Some(snapshot)) => {
                    match self.state.apply_remote(snapshot) {
                        Ok(()) => {
                            Theme::apply(ctx, self.state.settings.theme);
                            self.panels.settings.discard_edits();
                            self.notifications.success("Vault restored from cloud snapshot");
                        }
                        Err(e) => {
                            error!("Failed to apply cloud snapshot: {}", e);
                            self.notifications.error("Failed to restore vault");
                        }
                    }
                }
                StateEvent::RemoteFetched(None) => {
                    self.notifications.warning("No cloud snapshot available");
                }
            }
        }

        self.sync_device_views(now);

        if let Some(views) = self.device_views.as_mut() {
            let mut cx = PanelCtx {
                state: &mut self.state,
                ai: &self.ai,
                dialog: &mut self.dialog,
                toasts: &mut self.notifications,
                now,
            };
            views.poll(&mut cx);
        }

        for result in self.ai.drain() {
            self.route_ai_result(ctx, result);
        }
    }

    /// Build per-device views on link, drop them on disconnect
    fn sync_device_views(&mut self, now: Instant) {
        let device = self
            .state
            .link
            .device()
            .filter(|_| self.state.link.is_connected());

        match device {
            Some(device) => {
                let stale = self
                    .device_views
                    .as_ref()
                    .map_or(true, |views| views.serial() != device.serial_number);
                if stale {
                    info!("Preparing device views for {}", device.serial_number);
                    self.device_views = Some(DeviceViews::new(device, now));
                }
            }
            None => {
                if self.device_views.take().is_some() && self.active_view.requires_device() {
                    self.active_view = ActiveView::Dashboard;
                }
            }
        }
    }

    fn route_ai_result(&mut self, ctx: &Context, result: AiResult) {
        match result {
            AiResult::Diagnostic { serial, text } => {
                let current = self.state.link.device().map(|d| d.serial_number.as_str());
                if current == Some(serial.as_str()) {
                    self.state.link.diagnostic = text;
                }
                if let Some(views) = self.device_views.as_mut() {
                    views.diagnostics.finish();
                }
            }
            AiResult::Blueprint { serial, png } => {
                if let Some(views) = self.device_views.as_mut() {
                    if views.serial() == serial {
                        views.blueprint.receive(ctx, png);
                    }
                }
            }
            AiResult::Support(info) => {
                if let Some(views) = self.device_views.as_mut() {
                    views.location.receive_support(info);
                }
            }
        }
    }

    fn view_available(&self, view: ActiveView) -> bool {
        (!view.requires_device() || self.device_views.is_some())
            && (!view.requires_license() || self.state.has_license())
            && (!view.admin_only() || self.state.is_admin())
    }

    /// Render the sidebar navigation
    fn render_sidebar(&mut self, ctx: &Context) {
        SidePanel::left("sidebar")
            .resizable(false)
            .default_width(230.0)
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_SECONDARY)
                    .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT)),
            )
            .show(ctx, |ui| {
                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    ui.add_space(16.0);
                    ui.label(egui::RichText::new("◈").size(24.0).color(Theme::PRIMARY));
                    ui.add_space(6.0);
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new("DUPLEX LINK")
                                .size(17.0)
                                .strong()
                                .color(Theme::TEXT_PRIMARY),
                        );
                        ui.label(
                            egui::RichText::new("Mobile Management Console")
                                .size(10.0)
                                .color(Theme::TEXT_MUTED),
                        );
                    });
                });

                ui.add_space(16.0);

                let connected = self.device_views.is_some();
                let licensed = self.state.has_license();
                let admin = self.state.is_admin();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(ui.available_height() - 90.0)
                    .show(ui, |ui| {
                        for view in ActiveView::ALL {
                            if view.admin_only() && !admin {
                                continue;
                            }
                            let disabled = view.requires_device() && !connected;
                            let locked = view.requires_license() && !licensed;
                            self.nav_item(ui, view, disabled, locked);
                        }
                    });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        ui.add_space(16.0);
                        ui.label(
                            egui::RichText::new(format!("v{}", crate::APP_VERSION))
                                .small()
                                .color(Theme::TEXT_MUTED),
                        );
                    });
                    if let Some(user) = &self.state.user {
                        egui::Frame::none()
                            .fill(Theme::BG_TERTIARY.linear_multiply(0.5))
                            .rounding(egui::Rounding::same(8.0))
                            .inner_margin(egui::Margin::same(10.0))
                            .outer_margin(egui::Margin::symmetric(12.0, 0.0))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.label(
                                    egui::RichText::new(&user.name)
                                        .strong()
                                        .color(Theme::TEXT_PRIMARY),
                                );
                                let (badge, color) = if user.is_admin() {
                                    ("ROOT ADMIN", Theme::ROOT)
                                } else if licensed {
                                    ("LICENSED", Theme::SUCCESS)
                                } else {
                                    ("UNLICENSED", Theme::TEXT_MUTED)
                                };
                                ui.label(egui::RichText::new(badge).size(10.0).color(color));
                            });
                    }
                });
            });
    }

    fn nav_item(&mut self, ui: &mut egui::Ui, view: ActiveView, disabled: bool, locked: bool) {
        let selected = self.active_view == view;

        let bg_color = if selected {
            Theme::PRIMARY.linear_multiply(0.15)
        } else {
            egui::Color32::TRANSPARENT
        };
        let text_color = if disabled {
            Theme::TEXT_MUTED.linear_multiply(0.6)
        } else if selected {
            Theme::PRIMARY_LIGHT
        } else {
            Theme::TEXT_SECONDARY
        };

        let response = egui::Frame::none()
            .fill(bg_color)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::symmetric(14.0, 8.0))
            .outer_margin(egui::Margin::symmetric(8.0, 0.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if selected {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(3.0, 16.0), egui::Sense::hover());
                        ui.painter()
                            .rect_filled(rect, egui::Rounding::same(2.0), Theme::PRIMARY);
                        ui.add_space(6.0);
                    }
                    ui.label(egui::RichText::new(view.icon()).size(14.0).color(text_color));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(view.label()).size(13.0).color(text_color));
                    if locked {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(Icons::LOCK)
                                    .size(11.0)
                                    .color(Theme::WARNING),
                            );
                        });
                    }
                });
            })
            .response;

        if disabled {
            return;
        }

        let response = response.interact(egui::Sense::click());
        if response.hovered() && !selected {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if response.clicked() {
            if locked {
                self.notifications
                    .warning(format!("{} requires an active license", view.label()));
                self.active_view = ActiveView::Subscriptions;
            } else {
                self.active_view = view;
            }
        }
        ui.add_space(1.0);
    }

    /// Render the top bar with the link controls
    fn render_top_bar(&mut self, ctx: &Context, now: Instant) {
        TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_PRIMARY)
                    .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
                    .inner_margin(egui::Margin::symmetric(20.0, 12.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.active_view.label())
                            .size(22.0)
                            .strong()
                            .color(Theme::TEXT_PRIMARY),
                    );

                    ui.add_space(16.0);
                    StatusBadge::link(ui, self.state.link.status());

                    if self.state.sync.is_syncing() || self.state.sync.is_fetching() {
                        ui.add_space(8.0);
                        ui.spinner();
                        ui.label(
                            egui::RichText::new(format!("{} Cloud sync...", Icons::CLOUD))
                                .small()
                                .color(Theme::INFO),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if secondary_button(ui, true, "Sign Out").clicked() {
                            if let Err(e) = self.state.sign_out() {
                                error!("Failed to clear session: {}", e);
                            }
                            self.device_views = None;
                            self.active_view = ActiveView::Dashboard;
                        }

                        ui.add_space(8.0);

                        match self.state.link.status() {
                            DeviceStatus::Connected => {
                                let btn = egui::Button::new(
                                    egui::RichText::new("Terminate Link")
                                        .color(egui::Color32::WHITE),
                                )
                                .fill(Theme::ERROR.linear_multiply(0.85))
                                .rounding(egui::Rounding::same(8.0))
                                .min_size(egui::vec2(140.0, 34.0));
                                if ui.add(btn).clicked() {
                                    self.state.disconnect();
                                    self.notifications.warning("Duplex link terminated");
                                }
                            }
                            DeviceStatus::Connecting => {
                                let progress = self.state.link.handshake_progress(now);
                                ui.add(
                                    egui::ProgressBar::new(progress)
                                        .desired_width(120.0)
                                        .animate(true),
                                );
                                ui.add_enabled(
                                    false,
                                    egui::Button::new("Establishing Link...")
                                        .min_size(egui::vec2(150.0, 34.0)),
                                );
                            }
                            DeviceStatus::Disconnected | DeviceStatus::Error => {
                                let btn = egui::Button::new(
                                    egui::RichText::new(format!("{} Initialize Duplex Link", Icons::LINK))
                                        .color(egui::Color32::WHITE),
                                )
                                .fill(Theme::PRIMARY)
                                .rounding(egui::Rounding::same(8.0))
                                .min_size(egui::vec2(180.0, 34.0));
                                if ui.add(btn).clicked() {
                                    self.state.connect(now);
                                }
                            }
                        }
                    });
                });
            });
    }

    /// Render the main content area
    fn render_main_content(&mut self, ctx: &Context, now: Instant) {
        if !self.view_available(self.active_view) {
            self.active_view = ActiveView::Dashboard;
        }

        CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let mut cx = PanelCtx {
                        state: &mut self.state,
                        ai: &self.ai,
                        dialog: &mut self.dialog,
                        toasts: &mut self.notifications,
                        now,
                    };
                    let panels = &mut self.panels;

                    match (self.active_view, self.device_views.as_mut()) {
                        (ActiveView::Dashboard, views) => {
                            panels.dashboard.show(ui, &mut cx, views.is_some())
                        }
                        (ActiveView::Subscriptions, _) => panels::subscriptions::render(ui, &mut cx),
                        (ActiveView::Vault, _) => panels.vault.show(ui, &mut cx),
                        (ActiveView::Operators, _) => panels.operators.show(ui, &mut cx),
                        (ActiveView::Logs, _) => panels.logs.show(ui, &mut cx),
                        (ActiveView::Settings, _) => panels.settings.show(ui, ctx, &mut cx),
                        (view, Some(views)) => views.show(view, ui, &mut cx),
                        (_, None) => panels::disconnected(ui),
                    }
                });
        });
    }

    /// Render the sign-in screen
    fn render_auth(&mut self, ctx: &Context, now: Instant) {
        CentralPanel::default().show(ctx, |ui| {
            self.panels
                .auth
                .show(ui, &mut self.state, &mut self.notifications, now);
        });
    }

    /// Render notifications
    fn render_notifications(&mut self, ctx: &Context) {
        if self.notifications.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .fixed_pos(egui::pos2(ctx.screen_rect().width() - 360.0, 80.0))
            .show(ctx, |ui| {
                for notification in &self.notifications.items {
                    let (icon, color) = match notification.level {
                        NotificationLevel::Info => (Icons::INFO, Theme::INFO),
                        NotificationLevel::Success => (Icons::SUCCESS, Theme::SUCCESS),
                        NotificationLevel::Warning => (Icons::ALERT, Theme::WARNING),
                        NotificationLevel::Error => (Icons::CLOSE, Theme::ERROR),
                    };

                    egui::Frame::none()
                        .fill(Theme::BG_ELEVATED)
                        .rounding(egui::Rounding::same(10.0))
                        .stroke(egui::Stroke::new(1.0, color.linear_multiply(0.5)))
                        .shadow(egui::Shadow {
                            offset: egui::vec2(0.0, 4.0),
                            blur: 12.0,
                            spread: 2.0,
                            color: egui::Color32::from_black_alpha(60),
                        })
                        .inner_margin(egui::Margin::same(14.0))
                        .show(ui, |ui| {
                            ui.set_width(320.0);
                            ui.horizontal(|ui| {
                                egui::Frame::none()
                                    .fill(color.linear_multiply(0.2))
                                    .rounding(egui::Rounding::same(6.0))
                                    .inner_margin(egui::Margin::same(6.0))
                                    .show(ui, |ui| {
                                        ui.label(egui::RichText::new(icon).size(14.0).color(color));
                                    });
                                ui.add_space(10.0);
                                ui.label(
                                    egui::RichText::new(&notification.message)
                                        .size(13.0)
                                        .color(Theme::TEXT_PRIMARY),
                                );
                            });
                        });

                    ui.add_space(10.0);
                }
            });
    }

    /// Render dialogs
    fn render_dialogs(&mut self, ctx: &Context, now: Instant) {
        let keep_open = match &mut self.dialog {
            DialogState::None => return,
            DialogState::Snapshot(form) => {
                dialogs::snapshot::render(ctx, form, &mut self.state, &mut self.notifications)
            }
            DialogState::Provision(form) => {
                dialogs::provision::render(ctx, form, &mut self.state, &mut self.notifications)
            }
            DialogState::EditPlan(form) => {
                dialogs::edit_plan::render(ctx, form, &mut self.state, &mut self.notifications)
            }
            DialogState::Confirm {
                title,
                message,
                action,
            } => match dialogs::confirm::render(ctx, title, message) {
                ConfirmChoice::Pending => true,
                ConfirmChoice::Confirmed => {
                    let action = action.clone();
                    self.execute(action, ctx, now);
                    false
                }
                ConfirmChoice::Cancelled => {
                    if *action == ConfirmAction::Sanitize {
                        if let Some(views) = self.device_views.as_mut() {
                            views.sanitizer.cancel();
                        }
                    }
                    false
                }
            },
        };

        if !keep_open {
            self.dialog = DialogState::None;
        }
    }

    /// Carry out a confirmed destructive action
    fn execute(&mut self, action: ConfirmAction, ctx: &Context, now: Instant) {
        let result = match action {
            ConfirmAction::DeleteProfile(id) => self
                .state
                .delete_profile(id)
                .map(|()| "Profile purged from vault"),
            ConfirmAction::RevokeOperator(id) => self
                .state
                .remove_operator(&id)
                .map(|()| "Operator access revoked"),
            ConfirmAction::RemovePlan(id) => {
                self.state.remove_plan(&id).map(|()| "Plan removed")
            }
            ConfirmAction::ClearLogs => {
                self.state.clear_logs();
                Ok("Operation logs purged")
            }
            ConfirmAction::FactoryReset => self.state.factory_reset().map(|()| {
                self.device_views = None;
                self.active_view = ActiveView::Dashboard;
                self.panels = Panels::default();
                Theme::apply(ctx, self.state.settings.theme);
                "Console reset to factory defaults"
            }),
            ConfirmAction::Sanitize => {
                if let Some(views) = self.device_views.as_mut() {
                    views.sanitizer.confirm(now);
                }
                return;
            }
        };

        match result {
            Ok(message) => self.notifications.success(message),
            Err(e) => self.notifications.error(e.to_string()),
        }
    }
}

impl eframe::App for DuplexApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            self.first_frame = false;
            info!("First frame rendered");
        }

        let now = Instant::now();
        self.tick(ctx, now);
        self.notifications.cleanup(Duration::from_secs(5));

        // Simulated workflows advance on frame deadlines
        ctx.request_repaint_after(Duration::from_millis(100));

        if self.state.is_signed_in() {
            self.render_sidebar(ctx);
            self.render_top_bar(ctx, now);
            self.render_main_content(ctx, now);
            self.render_dialogs(ctx, now);
        } else {
            self.render_auth(ctx, now);
        }
        self.render_notifications(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.state.database.save_settings(&self.state.settings) {
            error!("Failed to save settings: {}", e);
        }

        if let Err(e) = self.state.database.save_profiles(&self.state.profiles) {
            error!("Failed to save vault: {}", e);
        }

        info!("Application exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn licensed_views_also_need_a_device() {
        for view in ActiveView::ALL {
            if view.requires_license() {
                assert!(view.requires_device(), "{:?}", view.label());
            }
        }
    }

    #[test]
    fn session_views_stay_reachable_without_a_link() {
        for view in [
            ActiveView::Dashboard,
            ActiveView::Subscriptions,
            ActiveView::Vault,
            ActiveView::Logs,
            ActiveView::Settings,
        ] {
            assert!(!view.requires_device());
            assert!(!view.requires_license());
        }
        assert!(ActiveView::Operators.admin_only());
    }

    #[test]
    fn notifications_expire() {
        let mut toasts = Notifications::default();
        toasts.error("boom");
        toasts.cleanup(Duration::from_secs(5));
        assert_eq!(toasts.items.len(), 1);
        toasts.cleanup(Duration::ZERO);
        assert!(toasts.items.is_empty());
    }
}
