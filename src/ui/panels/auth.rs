//! Sign-in screen

use std::time::Instant;

use egui::{RichText, Ui};

use crate::core::{AccessError, AppState, AuthMode};
use crate::ui::app::Notifications;
use crate::ui::components::section::{primary_button, secondary_button};
use crate::ui::theme::Theme;

#[derive(Debug, Default)]
pub struct AuthPanel {
    mode: AuthMode,
    email: String,
    password: String,
    confirm: String,
}

impl AuthPanel {
    /// Local check before a sign-in is queued
    fn validate(&self) -> Result<(), AccessError> {
        if self.mode == AuthMode::Register && self.password != self.confirm {
            return Err(AccessError::PasswordMismatch);
        }
        Ok(())
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        state: &mut AppState,
        toasts: &mut Notifications,
        now: Instant,
    ) {
        let busy = state.is_authenticating();

        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(RichText::new("◈").size(44.0).color(Theme::PRIMARY));
            ui.label(
                RichText::new("DUPLEX LINK")
                    .size(28.0)
                    .strong()
                    .color(Theme::TEXT_PRIMARY),
            );
            ui.label(
                RichText::new("Secure mobile management console")
                    .color(Theme::TEXT_SECONDARY),
            );
            ui.add_space(24.0);

            egui::Frame::none()
                .fill(Theme::BG_SECONDARY)
                .rounding(egui::Rounding::same(16.0))
                .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
                .inner_margin(egui::Margin::same(28.0))
                .show(ui, |ui| {
                    ui.set_width(360.0);

                    ui.horizontal(|ui| {
                        ui.selectable_value(&mut self.mode, AuthMode::Login, "Sign In");
                        ui.selectable_value(&mut self.mode, AuthMode::Register, "Register");
                    });
                    ui.add_space(12.0);

                    ui.label(RichText::new("Operator email").small().color(Theme::TEXT_MUTED));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.email)
                            .hint_text("operator@duplex.nexus")
                            .desired_width(f32::INFINITY),
                    );
                    ui.label(RichText::new("Password").small().color(Theme::TEXT_MUTED));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.password)
                            .password(true)
                            .desired_width(f32::INFINITY),
                    );
                    if self.mode == AuthMode::Register {
                        ui.label(
                            RichText::new("Confirm password")
                                .small()
                                .color(Theme::TEXT_MUTED),
                        );
                        ui.add(
                            egui::TextEdit::singleline(&mut self.confirm)
                                .password(true)
                                .desired_width(f32::INFINITY),
                        );
                    }

                    ui.add_space(16.0);

                    if busy {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(
                                RichText::new("Verifying credentials...").color(Theme::INFO),
                            );
                        });
                        return;
                    }

                    let label = match self.mode {
                        AuthMode::Login => "Authenticate",
                        AuthMode::Register => "Request Access",
                    };
                    let ready = !self.email.trim().is_empty();
                    if primary_button(ui, ready, label).clicked() {
                        match self.validate() {
                            Ok(()) => state.begin_sign_in(&self.email, self.mode, now),
                            Err(e) => toasts.error(e.to_string()),
                        }
                    }

                    ui.add_space(8.0);
                    ui.label(RichText::new("or").small().color(Theme::TEXT_MUTED));
                    ui.add_space(8.0);

                    if secondary_button(ui, true, "Continue with Google").clicked() {
                        state.begin_google_sign_in(now);
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_requires_matching_passwords() {
        let mut panel = AuthPanel {
            mode: AuthMode::Register,
            email: "new@duplex.nexus".into(),
            password: "alpha".into(),
            confirm: "beta".into(),
        };
        assert_eq!(panel.validate(), Err(AccessError::PasswordMismatch));

        panel.confirm = "alpha".into();
        assert_eq!(panel.validate(), Ok(()));
    }

    #[test]
    fn login_ignores_confirmation_field() {
        let panel = AuthPanel {
            mode: AuthMode::Login,
            email: "admin@duplex.nexus".into(),
            password: "x".into(),
            confirm: String::new(),
        };
        assert!(panel.validate().is_ok());
    }
}
