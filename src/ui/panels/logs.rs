//! Operation log panel - Session console with level filter

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::{LogEntry, LogLevel};
use crate::ui::components::section::{console_frame, danger_button, page_header, search_box, secondary_button};
use crate::ui::dialogs::{ConfirmAction, DialogState};
use crate::ui::theme::{Icons, Theme};

const LEVELS: [LogLevel; 4] = [
    LogLevel::Info,
    LogLevel::Success,
    LogLevel::Warning,
    LogLevel::Error,
];

fn level_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "INFO",
        LogLevel::Success => "OK",
        LogLevel::Warning => "WARN",
        LogLevel::Error => "ERROR",
    }
}

#[derive(Debug, Default)]
pub struct LogsPanel {
    query: String,
    level: Option<LogLevel>,
}

impl LogsPanel {
    fn accepts(&self, entry: &LogEntry) -> bool {
        self.level.map_or(true, |level| entry.level == level)
            && (self.query.is_empty()
                || entry
                    .message
                    .to_lowercase()
                    .contains(&self.query.to_lowercase()))
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(
            ui,
            "Operation Logs",
            "Session activity from the console and the linked device",
        );

        ui.horizontal(|ui| {
            search_box(ui, &mut self.query, "Filter messages", 240.0);
            ui.add_space(8.0);
            egui::ComboBox::from_id_salt("log_level_filter")
                .selected_text(self.level.map(level_label).unwrap_or("All levels"))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.level, None, "All levels");
                    for level in LEVELS {
                        ui.selectable_value(&mut self.level, Some(level), level_label(level));
                    }
                });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_logs = !cx.state.logs.is_empty();
                if danger_button(ui, has_logs, &format!("{} Clear", Icons::TRASH)).clicked() {
                    *cx.dialog = DialogState::confirm(
                        "Clear Logs",
                        "Purge every entry from the session log?",
                        ConfirmAction::ClearLogs,
                    );
                }
                if secondary_button(ui, has_logs, &format!("{} Copy", Icons::EXPORT)).clicked() {
                    let text = cx
                        .state
                        .logs
                        .iter()
                        .rev()
                        .map(|e| format!("[{}] {:<5} {}", e.timestamp, level_label(e.level), e.message))
                        .collect::<Vec<_>>()
                        .join("\n");
                    ui.ctx().copy_text(text);
                    cx.toasts.info("Log copied to clipboard");
                }
            });
        });
        ui.add_space(8.0);

        // Buffer is newest first; the console reads top to bottom
        let entries: Vec<&LogEntry> = cx.state.logs.iter().filter(|e| self.accepts(e)).collect();
        let height = (ui.available_height() - 40.0).max(120.0);
        console_frame(ui, height, |ui| {
            if entries.is_empty() {
                ui.label(RichText::new("> no entries").monospace().color(Theme::TEXT_MUTED));
            }
            for entry in entries.iter().rev() {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("[{}]", entry.timestamp))
                            .monospace()
                            .color(Theme::TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!("{:<5}", level_label(entry.level)))
                            .monospace()
                            .strong()
                            .color(Theme::log_color(entry.level)),
                    );
                    ui.label(
                        RichText::new(&entry.message)
                            .monospace()
                            .color(Theme::TEXT_CONSOLE),
                    );
                });
            }
        });

        ui.label(
            RichText::new(format!("{} entries", cx.state.logs.len()))
                .small()
                .color(Theme::TEXT_MUTED),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_and_text_filters_combine() {
        let warn = LogEntry::new("Thermal warning on CPU", LogLevel::Warning);
        let info = LogEntry::new("Thermal check ok", LogLevel::Info);

        let mut panel = LogsPanel::default();
        assert!(panel.accepts(&warn) && panel.accepts(&info));

        panel.level = Some(LogLevel::Warning);
        assert!(panel.accepts(&warn));
        assert!(!panel.accepts(&info));

        panel.level = None;
        panel.query = "CHECK".to_string();
        assert!(!panel.accepts(&warn));
        assert!(panel.accepts(&info));
    }
}
