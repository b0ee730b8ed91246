//! Repair & update center - Bug sweep, per-bug fixes and firmware updates

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::{DeviceInfo, LogLevel};
use crate::sim::maintenance::{MaintenanceCenter, MaintenanceEvent};
use crate::ui::components::section::{page_header, primary_button, secondary_button, section_frame, section_header};
use crate::ui::components::{ResourceBar, StatusBadge};
use crate::ui::theme::{Icons, Theme};

pub struct MaintenancePanel {
    center: MaintenanceCenter,
}

impl MaintenancePanel {
    pub fn new(device: &DeviceInfo) -> Self {
        Self {
            center: MaintenanceCenter::new(&device.bugs),
        }
    }

    pub fn poll(&mut self, cx: &mut PanelCtx) {
        let Some(event) = self.center.poll(cx.now) else {
            return;
        };
        match event {
            MaintenanceEvent::ScanComplete(count) => {
                cx.state.log(
                    format!("System sweep complete: {} issues found", count),
                    LogLevel::Warning,
                );
            }
            MaintenanceEvent::BugFixed(id) => {
                cx.state.log(format!("Patch applied for {}", id), LogLevel::Success);
                cx.toasts.success(format!("{} resolved", id));
            }
            MaintenanceEvent::UpdateReady => match cx.state.install_update() {
                Ok(()) => cx.toasts.success("Firmware updated"),
                Err(e) => cx.toasts.error(e.to_string()),
            },
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Repair & Update", "Diagnose defects and push firmware");

        let device = cx.state.link.device().cloned();

        section_header(ui, Icons::CLOUD, "System Update");
        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    if let Some(device) = &device {
                        ui.label(RichText::new(&device.os_version).strong());
                        ui.label(RichText::new(&device.os_build).small().monospace().color(Theme::TEXT_MUTED));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let available = device.as_ref().is_some_and(|d| d.update_available);
                    if self.center.is_updating() {
                        ui.spinner();
                        ui.label(RichText::new("Flashing firmware...").color(Theme::INFO));
                    } else if available {
                        if primary_button(ui, true, "Install Update").clicked() {
                            self.center.install_update(cx.now);
                            cx.state.log("Downloading firmware package...", LogLevel::Info);
                        }
                    } else {
                        StatusBadge::tag(ui, "UP TO DATE", Theme::SUCCESS);
                    }
                });
            });
            if self.center.is_updating() {
                ui.add_space(8.0);
                ResourceBar::progress(ui, self.center.job_progress(cx.now), Theme::PRIMARY);
            }
        });

        section_header(ui, Icons::WRENCH, "Defect Sweep");
        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                let scanning = self.center.is_scanning();
                let label = if scanning { "Sweeping..." } else { "Run System Sweep" };
                if secondary_button(ui, !scanning, &format!("{} {}", Icons::SEARCH, label)).clicked() {
                    self.center.start_scan(cx.now);
                    cx.state.log("Running system defect sweep...", LogLevel::Info);
                }
                if scanning {
                    ui.spinner();
                }
            });
            ui.add_space(8.0);

            if self.center.bugs().is_empty() {
                ui.label(RichText::new("No known defects").color(Theme::TEXT_MUTED));
                return;
            }

            let mut fix = None;
            for bug in self.center.bugs() {
                ui.horizontal(|ui| {
                    StatusBadge::tag(ui, bug.severity.label(), Theme::bug_color(bug.severity));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&bug.component).strong());
                        ui.label(RichText::new(&bug.description).color(Theme::TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.center.is_fixed(&bug.id) {
                            StatusBadge::inline(ui, &format!("{} Fixed", Icons::SUCCESS), Theme::SUCCESS);
                        } else if self.center.is_fixing(&bug.id) {
                            ui.spinner();
                        } else if secondary_button(ui, self.center.current_job().is_none(), "Fix").clicked() {
                            fix = Some(bug.id.clone());
                        }
                    });
                });
                ui.separator();
            }
            if let Some(id) = fix {
                self.center.fix(&id, cx.now);
                cx.state.log(format!("Applying patch for {}...", id), LogLevel::Info);
            }
        });
    }
}
