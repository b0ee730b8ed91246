//! Comms center - Call log and message threads from the linked handset

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::sim::comms::{search_calls, search_messages, CallDirection, CommsExport};
use crate::ui::components::section::{page_header, primary_button, search_box, section_frame, section_header};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CommsTab {
    #[default]
    Calls,
    Messages,
}

#[derive(Debug, Default)]
pub struct CommsPanel {
    tab: CommsTab,
    query: String,
    export: CommsExport,
}

impl CommsPanel {
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        if let Some(notice) = self.export.poll(cx.now) {
            cx.state.log(notice, LogLevel::Success);
            cx.toasts.success(notice);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Comms Center", "Call history and message threads");

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, CommsTab::Calls, format!("{} Calls", Icons::PHONE));
            ui.selectable_value(&mut self.tab, CommsTab::Messages, format!("{} Messages", Icons::COMMS));
            ui.add_space(12.0);
            let hint = match self.tab {
                CommsTab::Calls => "Contact or number",
                CommsTab::Messages => "Contact or message",
            };
            search_box(ui, &mut self.query, hint, 220.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let running = self.export.is_running();
                let label = if running { "Aggregating..." } else { "Export Logs" };
                if primary_button(ui, !running, &format!("{} {}", Icons::EXPORT, label)).clicked() {
                    self.export.start(cx.now);
                    cx.state.log("Aggregating communication logs for export...", LogLevel::Info);
                }
                if running {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);

        match self.tab {
            CommsTab::Calls => self.calls(ui),
            CommsTab::Messages => self.messages(ui),
        }
    }

    fn calls(&self, ui: &mut Ui) {
        section_header(ui, Icons::PHONE, "Call Log");
        section_frame(ui, |ui| {
            let calls = search_calls(&self.query);
            if calls.is_empty() {
                ui.label(RichText::new("No calls match").color(Theme::TEXT_MUTED));
            }
            egui::Grid::new("call_log")
                .num_columns(5)
                .striped(true)
                .spacing([18.0, 8.0])
                .show(ui, |ui| {
                    for call in calls {
                        let color = match call.direction {
                            CallDirection::Incoming => Theme::SUCCESS,
                            CallDirection::Outgoing => Theme::INFO,
                            CallDirection::Missed => Theme::ERROR,
                        };
                        ui.label(RichText::new(call.direction.label()).small().strong().color(color));
                        ui.label(RichText::new(call.contact).strong());
                        ui.label(RichText::new(call.number).monospace().color(Theme::TEXT_SECONDARY));
                        ui.label(RichText::new(call.time).color(Theme::TEXT_MUTED));
                        ui.label(RichText::new(call.duration).monospace());
                        ui.end_row();
                    }
                });
        });
    }

    fn messages(&self, ui: &mut Ui) {
        section_header(ui, Icons::COMMS, "Message Threads");
        let threads = search_messages(&self.query);
        if threads.is_empty() {
            section_frame(ui, |ui| {
                ui.label(RichText::new("No threads match").color(Theme::TEXT_MUTED));
            });
        }
        for thread in threads {
            section_frame(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(thread.contact).strong());
                    if thread.unread {
                        ui.label(RichText::new("●").color(Theme::PRIMARY));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(thread.time).small().color(Theme::TEXT_MUTED));
                    });
                });
                ui.label(RichText::new(thread.last_message).color(Theme::TEXT_SECONDARY));
            });
        }
    }
}
