//! Snapshot dialog - commit the linked device to the GMT Vault

use egui::Context;

use crate::core::{AppState, ProfileCategory};
use crate::ui::app::Notifications;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct SnapshotForm {
    pub name: String,
    pub category: ProfileCategory,
}

/// Returns false once the dialog should close
pub fn render(
    ctx: &Context,
    form: &mut SnapshotForm,
    state: &mut AppState,
    toasts: &mut Notifications,
) -> bool {
    let mut open = true;
    let mut keep = true;

    egui::Window::new("Snapshot Device Profile")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(device) = state.link.device() {
                ui.label(
                    egui::RichText::new(format!("{} · {}", device.model, device.serial_number))
                        .small()
                        .color(Theme::TEXT_SECONDARY),
                );
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label("Profile name:");
                ui.add(
                    egui::TextEdit::singleline(&mut form.name)
                        .hint_text("e.g. Field unit 07")
                        .desired_width(240.0),
                );
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Category:");
                egui::ComboBox::from_id_salt("snapshot_category")
                    .selected_text(form.category.label())
                    .show_ui(ui, |ui| {
                        for category in ProfileCategory::all() {
                            ui.selectable_value(&mut form.category, *category, category.label());
                        }
                    });
            });

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                let can_save = !form.name.trim().is_empty();
                if ui
                    .add_enabled(can_save, egui::Button::new("Commit to Vault"))
                    .clicked()
                {
                    match state.save_profile(&form.name, form.category) {
                        Ok(_) => toasts.success(format!("'{}' saved to GMT Vault", form.name.trim())),
                        Err(e) => toasts.error(e.to_string()),
                    }
                    keep = false;
                }

                if ui.button("Cancel").clicked() {
                    keep = false;
                }
            });
        });

    open && keep
}
