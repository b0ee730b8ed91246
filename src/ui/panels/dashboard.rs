//! Dashboard panel - Linked device overview

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::ui::components::section::{page_header, primary_button, section_frame, section_header, stat};
use crate::ui::components::{masked_field, ResourceBar};
use crate::ui::dialogs::{DialogState, SnapshotForm};
use crate::ui::theme::{Icons, Theme};

/// Reveal toggles for the sensitive identifiers
#[derive(Debug, Default)]
pub struct DashboardPanel {
    reveal_serial: bool,
    reveal_imei: bool,
    reveal_phone: bool,
    reveal_email: bool,
}

impl DashboardPanel {
    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx, connected: bool) {
        let Some(device) = cx.state.link.device().filter(|_| connected).cloned() else {
            self.show_idle(ui, cx);
            return;
        };

        page_header(
            ui,
            &device.model,
            &format!("{} · {} {}", device.brand, device.os.label(), device.os_version),
        );

        ui.horizontal(|ui| {
            if primary_button(ui, true, &format!("{} Snapshot to Vault", Icons::VAULT)).clicked() {
                *cx.dialog = DialogState::Snapshot(SnapshotForm::default());
            }
            if device.update_available {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("{} Firmware update available", Icons::ALERT))
                        .color(Theme::WARNING),
                );
            }
        });
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            section_frame(&mut cols[0], |ui| {
                ui.label(RichText::new("HEALTH").small().color(Theme::TEXT_MUTED));
                ui.horizontal(|ui| {
                    ResourceBar::circular(ui, device.battery_health as f32 / 100.0, 86.0);
                    ui.vertical(|ui| {
                        stat(ui, "Battery health", &format!("{}%", device.battery_health), Theme::SUCCESS);
                        stat(ui, "Network", &device.network_type, Theme::INFO);
                        stat(ui, "Signal", &device.signal_strength, Theme::TEXT_PRIMARY);
                    });
                });
                ui.add_space(8.0);
                ResourceBar::horizontal(
                    ui,
                    device.storage_fraction(),
                    &format!(
                        "Storage {} / {} GB ({} GB free)",
                        device.storage_used,
                        device.storage_total,
                        device.storage_free()
                    ),
                    ui.available_width(),
                    false,
                );
            });

            section_frame(&mut cols[1], |ui| {
                ui.label(RichText::new("IDENTIFIERS").small().color(Theme::TEXT_MUTED));
                masked_field(ui, "Serial", &device.serial_number, &mut self.reveal_serial);
                masked_field(ui, "IMEI", &device.imei, &mut self.reveal_imei);
                masked_field(ui, "Phone", &device.phone_number, &mut self.reveal_phone);
                masked_field(ui, "Account", &device.associated_email, &mut self.reveal_email);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Carrier").size(12.0).color(Theme::TEXT_MUTED));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(&device.carrier);
                    });
                });
            });
        });

        if !device.bugs.is_empty() {
            section_header(ui, Icons::WRENCH, "Reported Issues");
            section_frame(ui, |ui| {
                for bug in &device.bugs {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(bug.severity.label())
                                .small()
                                .strong()
                                .color(Theme::bug_color(bug.severity)),
                        );
                        ui.label(RichText::new(&bug.component).strong());
                        ui.label(RichText::new(&bug.description).color(Theme::TEXT_SECONDARY));
                    });
                }
            });
        }

        section_header(ui, Icons::HISTORY, "Live Activity");
        section_frame(ui, |ui| {
            let recent: Vec<_> = cx.state.logs.iter().take(6).collect();
            if recent.is_empty() {
                ui.label(RichText::new("No activity yet").color(Theme::TEXT_MUTED));
            }
            for entry in recent {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&entry.timestamp)
                            .monospace()
                            .color(Theme::TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(&entry.message)
                            .monospace()
                            .color(Theme::log_color(entry.level)),
                    );
                });
            }
        });
    }

    fn show_idle(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(
            ui,
            "Awaiting Device",
            "Connect a handset over USB and initialize the Duplex Link",
        );

        section_frame(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(RichText::new(Icons::PHONE).size(56.0).color(Theme::TEXT_MUTED));
                ui.add_space(8.0);
                let status = cx.state.link.status();
                ui.label(
                    RichText::new(format!("Link status: {}", status.label()))
                        .color(Theme::status_color(status)),
                );
                if status == crate::core::DeviceStatus::Connecting {
                    ui.add_space(8.0);
                    ResourceBar::progress(
                        ui,
                        cx.state.link.handshake_progress(cx.now),
                        Theme::PRIMARY,
                    );
                }
                ui.add_space(24.0);
            });
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            section_frame(ui, |ui| {
                ui.horizontal(|ui| {
                    stat(ui, "Vault profiles", &cx.state.profiles.len().to_string(), Theme::INFO);
                    ui.add_space(32.0);
                    stat(ui, "Log entries", &cx.state.logs.len().to_string(), Theme::TEXT_PRIMARY);
                    ui.add_space(32.0);
                    stat(
                        ui,
                        "Cloud sync",
                        cx.state.sync.last_synced().unwrap_or("Never"),
                        Theme::TEXT_SECONDARY,
                    );
                });
            });
        });
    }
}
