//! Settings panel

use egui::{Context, RichText, Ui};

use super::PanelCtx;
use crate::core::settings::{SecurityLevel, Theme as SettingsTheme};
use crate::core::{AppSettings, SyncStatus};
use crate::persistence::Database;
use crate::ui::components::section::{
    danger_button, page_header, secondary_button, section_frame, section_header, setting_row,
    toggle_setting,
};
use crate::ui::dialogs::{ConfirmAction, DialogState};
use crate::ui::theme::{Icons, Theme};

/// Holds a working copy of the settings between frames
#[derive(Debug, Default)]
pub struct SettingsPanel {
    draft: Option<AppSettings>,
}

impl SettingsPanel {
    /// Drop the working copy so the next frame re-reads the stored settings
    pub fn discard_edits(&mut self) {
        self.draft = None;
    }

    pub fn show(&mut self, ui: &mut Ui, ctx: &Context, cx: &mut PanelCtx) {
        let mut draft = self
            .draft
            .take()
            .unwrap_or_else(|| cx.state.settings.clone());
        let mut commit = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(680.0);
                    page_header(ui, "Settings", "Console preferences, cloud vault and data");

                    // Cloud vault
                    section_header(ui, Icons::CLOUD, "Cloud Vault");
                    section_frame(ui, |ui| {
                        commit |= toggle_setting(
                            ui,
                            &mut draft.auto_sync,
                            "Auto-sync",
                            "Upload the vault after every profile or settings change",
                        );
                        sync_controls(ui, cx);
                    });

                    // Appearance
                    section_header(ui, Icons::LAYERS, "Appearance");
                    section_frame(ui, |ui| {
                        setting_row(ui, "Theme", "Choose your preferred color scheme", |ui| {
                            egui::ComboBox::from_id_salt("theme_select")
                                .width(130.0)
                                .selected_text(draft.theme.label())
                                .show_ui(ui, |ui| {
                                    for theme in SettingsTheme::all() {
                                        let selected = draft.theme == *theme;
                                        if ui.selectable_label(selected, theme.label()).clicked() {
                                            draft.theme = *theme;
                                            Theme::apply(ctx, *theme);
                                            commit = true;
                                        }
                                    }
                                });
                        });
                        commit |= toggle_setting(
                            ui,
                            &mut draft.beta_features,
                            "Beta features",
                            "Show experimental panels before they are finalised",
                        );
                    });

                    // Security
                    section_header(ui, Icons::SHIELD, "Security");
                    section_frame(ui, |ui| {
                        setting_row(ui, "Security level", draft.security_level.description(), |ui| {
                            egui::ComboBox::from_id_salt("security_level")
                                .width(130.0)
                                .selected_text(draft.security_level.label())
                                .show_ui(ui, |ui| {
                                    for level in SecurityLevel::all() {
                                        if ui
                                            .selectable_value(
                                                &mut draft.security_level,
                                                *level,
                                                level.label(),
                                            )
                                            .clicked()
                                        {
                                            commit = true;
                                        }
                                    }
                                });
                        });

                        let retention_desc =
                            format!("Keep {} days of session logs", draft.log_retention_days);
                        setting_row(ui, "Log retention", &retention_desc, |ui| {
                            let response = ui.add(
                                egui::DragValue::new(&mut draft.log_retention_days)
                                    .range(1..=365)
                                    .suffix(" days")
                                    .speed(1.0),
                            );
                            if response.drag_stopped() || response.lost_focus() {
                                commit = true;
                            }
                        });
                    });

                    // Data
                    section_header(ui, Icons::FOLDER, "Data");
                    section_frame(ui, |ui| data_controls(ui, cx));

                    ui.add_space(24.0);
                    about(ui);
                    ui.add_space(24.0);
                });
            });

        if commit {
            match cx.state.update_settings(draft) {
                Ok(()) => cx.toasts.success("Settings saved"),
                Err(e) => {
                    tracing::error!("Failed to save settings: {}", e);
                    cx.toasts.error("Failed to save settings");
                }
            }
            // Re-read so the working copy carries validated values
            self.draft = None;
        } else {
            self.draft = Some(draft);
        }
    }
}

fn sync_controls(ui: &mut Ui, cx: &mut PanelCtx) {
    let status = cx.state.sync.status();
    let last = cx.state.sync.last_synced().unwrap_or("Never").to_string();
    let color = match status {
        SyncStatus::Success => Theme::SUCCESS,
        SyncStatus::Error => Theme::ERROR,
        SyncStatus::Syncing => Theme::INFO,
        SyncStatus::Idle => Theme::TEXT_SECONDARY,
    };

    setting_row(ui, "Vault status", &format!("Last synced: {}", last), |ui| {
        ui.label(RichText::new(status.label()).color(color));
        if cx.state.sync.is_syncing() {
            ui.spinner();
        }
    });

    ui.horizontal(|ui| {
        let busy = cx.state.sync.is_syncing() || cx.state.sync.is_fetching();
        if secondary_button(ui, !busy, &format!("{} Sync Vault Now", Icons::CLOUD)).clicked() {
            cx.state.request_sync(cx.now);
        }
        if secondary_button(ui, !busy, "Restore from Cloud").clicked() {
            cx.state.request_fetch(cx.now);
            cx.toasts.info("Fetching remote vault...");
        }
        if cx.state.sync.is_fetching() {
            ui.spinner();
        }
    });
}

fn data_controls(ui: &mut Ui, cx: &mut PanelCtx) {
    match Database::data_directory() {
        Ok(dir) => {
            setting_row(ui, "Data directory", &dir.to_string_lossy(), |ui| {
                if secondary_button(ui, true, "Open Folder").clicked() {
                    if let Err(e) = open::that(&dir) {
                        tracing::warn!("Failed to open data folder: {}", e);
                        cx.toasts.warning("Could not open the data folder");
                    }
                }
            });
        }
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Theme::TEXT_MUTED));
        }
    }

    setting_row(
        ui,
        "Clear session logs",
        "Purge the operation log buffer",
        |ui| {
            if secondary_button(ui, true, "Clear Logs").clicked() {
                *cx.dialog = DialogState::confirm(
                    "Clear Logs",
                    "Purge every entry from the session log?",
                    ConfirmAction::ClearLogs,
                );
            }
        },
    );

    setting_row(
        ui,
        "Factory reset",
        "Wipe the vault, operators, plans and settings, then sign out",
        |ui| {
            if danger_button(ui, true, "Factory Reset App").clicked() {
                *cx.dialog = DialogState::confirm(
                    "Factory Reset",
                    "Every stored record will be erased and you will be signed out. Continue?",
                    ConfirmAction::FactoryReset,
                );
            }
        },
    );
}

fn about(ui: &mut Ui) {
    egui::Frame::none()
        .fill(Theme::BG_TERTIARY.linear_multiply(0.4))
        .rounding(egui::Rounding::same(12.0))
        .inner_margin(egui::Margin::same(20.0))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("{} v{}", crate::APP_NAME, crate::APP_VERSION))
                        .size(15.0)
                        .strong()
                        .color(Theme::TEXT_PRIMARY),
                );
                ui.add_space(6.0);
                ui.label(
                    RichText::new("Simulated mobile forensics and management console")
                        .size(13.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });
        });
}
