//! Action center - Factory format, secure wipe and cache clearing

use std::time::Instant;

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::sim::sanitizer::{completion_message, SanitizeAction, Sanitizer};
use crate::ui::components::section::{danger_button, page_header, secondary_button, section_frame};
use crate::ui::components::ResourceBar;
use crate::ui::dialogs::{ConfirmAction, DialogState};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Default)]
pub struct SanitizerPanel {
    sanitizer: Sanitizer,
}

impl SanitizerPanel {
    pub fn cancel(&mut self) {
        self.sanitizer.cancel();
    }

    pub fn confirm(&mut self, now: Instant) {
        self.sanitizer.confirm(now);
    }

    pub fn poll(&mut self, cx: &mut PanelCtx) {
        if let Some(action) = self.sanitizer.poll(cx.now) {
            let message = completion_message(action);
            cx.state.log(message.clone(), LogLevel::Success);
            cx.toasts.success(message);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Action Center", "Irreversible device-level operations");

        if let Some((action, progress)) = self.sanitizer.running() {
            section_frame(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new(format!("Executing {}...", action.name())).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(format!("{}%", progress)).monospace());
                    });
                });
                ui.add_space(6.0);
                ResourceBar::progress(ui, progress as f32 / 100.0, Theme::ERROR);
            });
        }

        let busy = self.sanitizer.running().is_some();
        for action in SanitizeAction::all() {
            section_frame(ui, |ui| {
                ui.horizontal(|ui| {
                    let color = if action.is_destructive() { Theme::ERROR } else { Theme::INFO };
                    ui.label(RichText::new(Icons::TRASH).size(24.0).color(color));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(action.name()).strong().size(15.0));
                        ui.label(RichText::new(action.description()).color(Theme::TEXT_SECONDARY));
                        ui.label(
                            RichText::new(format!("{} {}", Icons::ALERT, action.warning()))
                                .small()
                                .color(if action.is_destructive() { Theme::WARNING } else { Theme::TEXT_MUTED }),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let clicked = if action.is_destructive() {
                            danger_button(ui, !busy, "Execute").clicked()
                        } else {
                            secondary_button(ui, !busy, "Execute").clicked()
                        };
                        if clicked {
                            self.sanitizer.request(*action);
                            *cx.dialog = DialogState::confirm(
                                format!("Confirm {}", action.name()),
                                format!("{}\n\n{}", action.description(), action.warning()),
                                ConfirmAction::Sanitize,
                            );
                        }
                    });
                });
            });
        }
    }
}
