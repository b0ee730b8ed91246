//! Confirmation dialog

use egui::Context;

use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Pending,
    Confirmed,
    Cancelled,
}

pub fn render(ctx: &Context, title: &str, message: &str) -> ConfirmChoice {
    let mut open = true;
    let mut choice = ConfirmChoice::Pending;

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Confirm").color(Theme::ERROR))
                    .clicked()
                {
                    choice = ConfirmChoice::Confirmed;
                }

                if ui.button("Cancel").clicked() {
                    choice = ConfirmChoice::Cancelled;
                }
            });
        });

    if !open {
        choice = ConfirmChoice::Cancelled;
    }
    choice
}
