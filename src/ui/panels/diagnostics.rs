//! AI hardware context

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::ui::components::section::{page_header, secondary_button, section_frame};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Default)]
pub struct DiagnosticsPanel {
    pending: bool,
}

impl DiagnosticsPanel {
    /// A diagnostic came back, for this link or a dropped one
    pub fn finish(&mut self) {
        self.pending = false;
    }

    fn run(&mut self, cx: &mut PanelCtx) {
        let Some(device) = cx.state.link.device().cloned() else {
            return;
        };
        cx.ai.request_diagnostic(device);
        self.pending = true;
        cx.state.log("Querying AI diagnostic engine...", LogLevel::Info);
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        // Opening the view with nothing cached kicks off an analysis
        if !self.pending && cx.state.link.is_connected() && cx.state.link.diagnostic.is_empty() {
            self.run(cx);
        }

        ui.horizontal(|ui| {
            page_header(ui, "AI Hardware Context", "Generated assessment of the linked device");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if secondary_button(ui, !self.pending, &format!("{} Refresh Analysis", Icons::PULSE)).clicked() {
                    self.run(cx);
                }
                if self.pending {
                    ui.spinner();
                }
            });
        });

        section_frame(ui, |ui| {
            ui.set_min_height(400.0);
            if self.pending {
                ui.vertical_centered(|ui| {
                    ui.add_space(160.0);
                    ui.spinner();
                    ui.label(
                        RichText::new("QUERYING GEMINI CORE...")
                            .monospace()
                            .color(Theme::TEXT_MUTED),
                    );
                });
                return;
            }

            let text = &cx.state.link.diagnostic;
            if text.is_empty() {
                ui.label(
                    RichText::new("No analysis currently cached. Use refresh to query AI.")
                        .color(Theme::TEXT_MUTED),
                );
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for line in text.lines() {
                    let trimmed = line.trim_start_matches('#').trim();
                    if line.starts_with('#') {
                        ui.add_space(6.0);
                        ui.label(RichText::new(trimmed).strong().size(16.0).color(Theme::TEXT_PRIMARY));
                    } else {
                        ui.label(RichText::new(line.replace("**", "")).color(Theme::TEXT_SECONDARY));
                    }
                }
            });
        });
    }
}
