//! Antivirus suite - Staged deep scan, threat review and purge

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::sim::antivirus::{AntivirusScan, SCAN_STAGES};
use crate::ui::components::section::{
    danger_button, page_header, primary_button, secondary_button, section_frame, section_header,
};
use crate::ui::components::{ResourceBar, StatusBadge};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Default)]
pub struct AntivirusPanel {
    scan: AntivirusScan,
    was_scanning: bool,
    was_cleaning: bool,
}

impl AntivirusPanel {
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        self.scan.poll(cx.now);

        if self.was_scanning && !self.scan.is_scanning() {
            let found = self.scan.threats().len();
            cx.state.log(
                format!("Deep scan complete: {} threats identified", found),
                LogLevel::Warning,
            );
            cx.toasts.warning(format!("{} threats detected", found));
        }
        if self.was_cleaning && self.scan.clean_complete() {
            cx.state.log("All threats quarantined and purged", LogLevel::Success);
            cx.toasts.success("Device integrity restored");
        }

        self.was_scanning = self.scan.is_scanning();
        self.was_cleaning = self.scan.is_cleaning();
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Antivirus Suite", "Malware heuristics and quarantine");

        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                let (icon, title, color) = if self.scan.clean_complete() {
                    (Icons::SHIELD, "Device Secured", Theme::SUCCESS)
                } else if !self.scan.threats().is_empty() {
                    (Icons::ALERT, "Threats Detected", Theme::ERROR)
                } else if self.scan.is_scanning() {
                    (Icons::SEARCH, "Scanning...", Theme::INFO)
                } else {
                    (Icons::SHIELD, "Integrity Unknown", Theme::TEXT_MUTED)
                };
                ui.label(RichText::new(icon).size(36.0).color(color));
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(18.0).strong().color(color));
                    let detail = self
                        .scan
                        .current_stage()
                        .unwrap_or("Run a deep scan to verify device integrity");
                    ui.label(RichText::new(detail).color(Theme::TEXT_SECONDARY));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.scan.clean_complete() {
                        if secondary_button(ui, true, "Rescan").clicked() {
                            self.scan.reset();
                        }
                    } else if primary_button(ui, !self.scan.is_busy(), &format!("{} Deep Scan", Icons::SEARCH)).clicked() {
                        self.scan.start(cx.now, cx.state.rng());
                        cx.state.log("Initiating heuristic deep scan...", LogLevel::Info);
                    }
                });
            });

            if self.scan.is_scanning() {
                ui.add_space(10.0);
                ResourceBar::progress(ui, self.scan.scan_progress(), Theme::PRIMARY);
                ui.add_space(6.0);
                let current = self.scan.current_stage();
                for stage in SCAN_STAGES {
                    let passed = self.scan.scan_progress() * SCAN_STAGES.len() as f32;
                    let index = SCAN_STAGES.iter().position(|s| s == stage).unwrap_or(0) as f32;
                    let (mark, color) = if current == Some(*stage) {
                        ("▶", Theme::PRIMARY_LIGHT)
                    } else if index < passed {
                        (Icons::SUCCESS, Theme::SUCCESS)
                    } else {
                        ("·", Theme::TEXT_MUTED)
                    };
                    ui.label(RichText::new(format!("{} {}", mark, stage)).small().color(color));
                }
            }
        });

        if self.scan.threats().is_empty() {
            return;
        }

        section_header(ui, Icons::ALERT, "Detected Threats");
        section_frame(ui, |ui| {
            for threat in self.scan.threats() {
                ui.horizontal(|ui| {
                    StatusBadge::severity(ui, threat.severity);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(threat.name).strong());
                        ui.label(
                            RichText::new(format!("{} · {}", threat.kind, threat.path))
                                .small()
                                .monospace()
                                .color(Theme::TEXT_MUTED),
                        );
                    });
                });
                ui.separator();
            }

            let cleaning = self.scan.is_cleaning();
            ui.horizontal(|ui| {
                let label = if cleaning { "Purging..." } else { "Quarantine & Purge All" };
                if danger_button(ui, !cleaning, &format!("{} {}", Icons::TRASH, label)).clicked() {
                    self.scan.clean(cx.now);
                    cx.state.log("Quarantining detected threats...", LogLevel::Warning);
                }
                if cleaning {
                    ui.spinner();
                }
            });
        });
    }
}
