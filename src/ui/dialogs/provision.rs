//! Provision operator dialog

use egui::Context;

use crate::core::{AppState, Role};
use crate::ui::app::Notifications;

#[derive(Debug, Clone, Default)]
pub struct ProvisionForm {
    pub name: String,
    pub email: String,
    pub role: Role,
}

pub fn render(
    ctx: &Context,
    form: &mut ProvisionForm,
    state: &mut AppState,
    toasts: &mut Notifications,
) -> bool {
    let mut open = true;
    let mut keep = true;

    egui::Window::new("Provision Operator")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("provision_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut form.name);
                    ui.end_row();

                    ui.label("Email:");
                    ui.text_edit_singleline(&mut form.email);
                    ui.end_row();

                    ui.label("Role:");
                    egui::ComboBox::from_id_salt("provision_role")
                        .selected_text(form.role.label())
                        .show_ui(ui, |ui| {
                            for role in Role::all() {
                                ui.selectable_value(&mut form.role, *role, role.label());
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.button("Grant Access").clicked() {
                    match state.add_operator(&form.name, &form.email, form.role) {
                        Ok(()) => {
                            toasts.success(format!("{} provisioned", form.email.trim()));
                            keep = false;
                        }
                        // Missing fields keep the form open for correction
                        Err(e) => toasts.error(e.to_string()),
                    }
                }

                if ui.button("Cancel").clicked() {
                    keep = false;
                }
            });
        });

    open && keep
}
