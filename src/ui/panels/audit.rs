//! Security audit - Attack-surface report

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::sim::audit::SecurityAudit;
use crate::ui::components::section::{page_header, primary_button, section_frame};
use crate::ui::components::{ResourceBar, StatusBadge};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Default)]
pub struct AuditPanel {
    audit: SecurityAudit,
    was_running: bool,
}

impl AuditPanel {
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        self.audit.poll(cx.now);
        if self.was_running && !self.audit.is_running() {
            let count = self.audit.results().map_or(0, |r| r.len());
            cx.state.log(
                format!("Security audit complete: {} vectors flagged", count),
                LogLevel::Warning,
            );
        }
        self.was_running = self.audit.is_running();
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Security Audit", "Probe the device for exploitable vectors");

        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(Icons::AUDIT).size(30.0).color(Theme::PRIMARY_LIGHT));
                ui.vertical(|ui| {
                    let summary = match self.audit.worst_risk() {
                        Some(risk) => format!("Highest risk: {}", risk.label()),
                        None if self.audit.is_running() => "Audit in progress".to_string(),
                        None => "No audit has been run for this link".to_string(),
                    };
                    ui.label(RichText::new(summary).strong());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let running = self.audit.is_running();
                    let label = if running { "Auditing..." } else { "Run Audit" };
                    if primary_button(ui, !running, label).clicked() {
                        self.audit.start(cx.now);
                        cx.state.log("Security audit started", LogLevel::Info);
                    }
                });
            });
            if self.audit.is_running() {
                ui.add_space(8.0);
                ResourceBar::progress(ui, self.audit.progress(cx.now), Theme::PRIMARY);
            }
        });

        let Some(findings) = self.audit.results() else {
            return;
        };
        for finding in findings {
            section_frame(ui, |ui| {
                ui.horizontal(|ui| {
                    StatusBadge::severity(ui, finding.risk);
                    ui.label(RichText::new(finding.vector).strong().size(15.0));
                });
                ui.label(RichText::new(finding.description).color(Theme::TEXT_SECONDARY));
                ui.label(
                    RichText::new(format!("{} → {}", finding.source, finding.target))
                        .small()
                        .monospace()
                        .color(Theme::TEXT_MUTED),
                );
            });
        }
    }
}
