//! Identity manager - Credential and biometric resets

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::sim::identity::{mask_key, IdentityReset, ResetKind};
use crate::ui::components::section::{page_header, primary_button, secondary_button, section_frame};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug)]
pub struct IdentityPanel {
    reset: IdentityReset,
    kind: ResetKind,
    new_password: String,
    show_password: bool,
}

impl Default for IdentityPanel {
    fn default() -> Self {
        Self {
            reset: IdentityReset::default(),
            kind: ResetKind::Pin,
            new_password: String::new(),
            show_password: false,
        }
    }
}

impl IdentityPanel {
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        if let Some(kind) = self.reset.poll(cx.now) {
            cx.state.log(format!("{} deployed", kind.label()), LogLevel::Success);
            cx.toasts.success(format!("{} complete", kind.label()));
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Identity Manager", "Override lockscreen, biometrics and account keys");

        let busy = self.reset.in_progress().is_some();
        ui.horizontal(|ui| {
            for kind in ResetKind::all() {
                let selected = self.kind == *kind;
                if ui
                    .add_enabled(!busy, egui::SelectableLabel::new(selected, kind.label()))
                    .clicked()
                {
                    self.kind = *kind;
                }
            }
        });
        ui.add_space(8.0);

        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(Icons::KEY).size(26.0).color(Theme::PRIMARY_LIGHT));
                ui.label(RichText::new(self.kind.label()).size(17.0).strong());
            });
            ui.label(RichText::new(self.kind.description()).color(Theme::TEXT_SECONDARY));
            ui.add_space(10.0);

            if self.kind == ResetKind::Account {
                ui.horizontal(|ui| {
                    ui.label("New security key:");
                    ui.add_enabled(
                        !busy,
                        egui::TextEdit::singleline(&mut self.new_password)
                            .password(!self.show_password)
                            .desired_width(220.0),
                    );
                    let eye = if self.show_password { "Hide" } else { "Show" };
                    if ui
                        .small_button(format!("{} {}", Icons::EYE, eye))
                        .clicked()
                    {
                        self.show_password = !self.show_password;
                    }
                });
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                if primary_button(ui, !busy, "Deploy Reset").clicked() {
                    match self.reset.start(self.kind, &self.new_password, cx.now) {
                        Ok(()) => cx.state.log(
                            format!("Deploying {}...", self.kind.label()),
                            LogLevel::Warning,
                        ),
                        Err(e) => cx.toasts.error(e.to_string()),
                    }
                }
                if let Some((_, stage)) = self.reset.in_progress() {
                    ui.spinner();
                    ui.label(RichText::new(stage.label()).color(Theme::INFO));
                }
            });
        });

        if let Some(done) = self.reset.completed() {
            ui.add_space(10.0);
            self.confirmation_banner(ui, done);
        }
    }

    fn confirmation_banner(&mut self, ui: &mut Ui, done: ResetKind) {
        let target = match done {
            ResetKind::Account => "account password",
            ResetKind::Pin => "lockscreen database",
            ResetKind::Biometric => "biometric enclave",
        };
        let mut message = format!(
            "The {} has been successfully updated on the remote target.",
            target
        );
        if let Some(key) = self.reset.deployed_key() {
            message.push_str(&format!(" New Key: {}", mask_key(key)));
        }

        let mut dismissed = false;
        egui::Frame::none()
            .fill(Theme::SUCCESS.linear_multiply(0.1))
            .stroke(egui::Stroke::new(1.0, Theme::SUCCESS.linear_multiply(0.4)))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(14.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(Icons::SUCCESS).size(22.0).color(Theme::SUCCESS));
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new("Operation Confirmed")
                                .strong()
                                .color(Theme::SUCCESS),
                        );
                        ui.label(RichText::new(message).color(Theme::TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        dismissed = secondary_button(ui, true, "Dismiss").clicked();
                    });
                });
            });

        if dismissed {
            self.reset.dismiss();
            self.new_password.clear();
        }
    }
}
