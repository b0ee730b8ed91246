//! Elevation lab - Root escalation console

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::ui::components::section::{console_frame, danger_button, page_header, primary_button, section_frame};
use crate::ui::components::{ResourceBar, StatusBadge};
use crate::ui::theme::{Icons, Theme};
use crate::sim::elevation::ElevationLab;

#[derive(Debug, Default)]
pub struct ElevationPanel {
    lab: ElevationLab,
}

impl ElevationPanel {
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        if self.lab.poll(cx.now) {
            cx.state.log("Root privileges granted", LogLevel::Success);
            cx.toasts.success("Root access granted");
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Elevation Lab", "Temporary root escalation for deep inspection");

        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(Icons::ZAP).size(30.0).color(Theme::ROOT));
                ui.vertical(|ui| {
                    let (text, color) = if self.lab.is_elevated() {
                        ("ROOT ACCESS ACTIVE", Theme::ROOT)
                    } else if self.lab.is_processing() {
                        ("ESCALATING", Theme::WARNING)
                    } else {
                        ("STANDARD PRIVILEGES", Theme::TEXT_MUTED)
                    };
                    StatusBadge::tag(ui, text, color);
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.lab.is_elevated() {
                        if danger_button(ui, true, "Revoke Root").clicked() {
                            self.lab.revoke();
                            cx.state.log("Root privileges revoked", LogLevel::Warning);
                        }
                    } else if primary_button(ui, !self.lab.is_processing(), "Elevate Privileges").clicked() {
                        self.lab.start(cx.now, cx.state.rng());
                        cx.state.log("Root escalation initiated", LogLevel::Warning);
                    }
                });
            });
            if self.lab.is_processing() || self.lab.is_elevated() {
                ui.add_space(8.0);
                ResourceBar::progress(ui, self.lab.progress(), Theme::ROOT);
            }
        });

        console_frame(ui, 300.0, |ui| {
            if self.lab.console().is_empty() {
                ui.label(RichText::new("root@duplex:~# _").monospace().color(Theme::TEXT_MUTED));
            }
            for line in self.lab.console() {
                let color = if line.contains("SUCCESS") { Theme::SUCCESS } else { Theme::TEXT_CONSOLE };
                ui.label(RichText::new(line).monospace().color(color));
            }
        });
    }
}
