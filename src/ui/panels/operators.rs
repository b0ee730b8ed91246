//! Operator control panel - Console accounts and the login audit trail

use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::PanelCtx;
use crate::core::{LoginLog, Operator, Role};
use crate::ui::components::section::{
    page_header, primary_button, search_box, section_frame, section_header,
};
use crate::ui::components::StatusBadge;
use crate::ui::dialogs::{ConfirmAction, DialogState, ProvisionForm};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Default)]
pub struct OperatorsPanel {
    query: String,
}

impl OperatorsPanel {
    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(
            ui,
            "Operator Control",
            "Provision and revoke console access",
        );

        ui.horizontal(|ui| {
            search_box(ui, &mut self.query, "Search operators", 260.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if primary_button(ui, true, &format!("{} Provision Operator", Icons::USERS)).clicked() {
                    *cx.dialog = DialogState::Provision(ProvisionForm::default());
                }
            });
        });
        ui.add_space(8.0);

        let acting = cx.state.user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
        let mut revoke = None;

        section_frame(ui, |ui| {
            let matches: Vec<&Operator> = cx
                .state
                .operators
                .iter()
                .filter(|op| op.matches(&self.query))
                .collect();
            if matches.is_empty() {
                ui.label(RichText::new("No operators match your search").color(Theme::TEXT_MUTED));
            }
            for op in matches {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(Icons::USERS).color(Theme::PRIMARY_LIGHT));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&op.name).strong());
                        ui.label(RichText::new(&op.email).small().color(Theme::TEXT_MUTED));
                    });
                    let role_color = match op.role {
                        Role::Admin => Theme::ROOT,
                        Role::Operator => Theme::INFO,
                    };
                    StatusBadge::tag(ui, op.role.label(), role_color);
                    if !op.is_active() {
                        StatusBadge::tag(ui, "SUSPENDED", Theme::WARNING);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let is_self = op.email == acting;
                        let button = ui.add_enabled(
                            !is_self,
                            egui::Button::new(RichText::new("Revoke").color(Theme::ERROR)),
                        );
                        if button.on_disabled_hover_text("You cannot revoke yourself").clicked() {
                            revoke = Some((op.id.clone(), op.email.clone()));
                        }
                        if let Some(last) = op.last_active {
                            ui.label(
                                RichText::new(format!("Active {}", last.format("%Y-%m-%d %H:%M")))
                                    .small()
                                    .color(Theme::TEXT_MUTED),
                            );
                        }
                    });
                });
                ui.separator();
            }
        });

        if let Some((id, email)) = revoke {
            *cx.dialog = DialogState::confirm(
                "Revoke Access",
                format!("Revoke console access for {}?", email),
                ConfirmAction::RevokeOperator(id),
            );
        }

        section_header(ui, Icons::HISTORY, "Login Audit Trail");
        section_frame(ui, |ui| login_table(ui, &cx.state.login_logs));
    }
}

fn login_table(ui: &mut Ui, logs: &[LoginLog]) {
    if logs.is_empty() {
        ui.label(RichText::new("No sign-ins recorded").color(Theme::TEXT_MUTED));
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(150.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .max_scroll_height(260.0)
        .header(22.0, |mut header| {
            for title in ["Timestamp", "Operator", "IP Address", "Method"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).small().strong().color(Theme::TEXT_MUTED));
                });
            }
        })
        .body(|mut body| {
            for log in logs {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.monospace(log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
                    });
                    row.col(|ui| {
                        ui.label(&log.email);
                    });
                    row.col(|ui| {
                        ui.monospace(&log.ip_address);
                    });
                    row.col(|ui| {
                        ui.label(log.method.label());
                    });
                });
            }
        });
}
