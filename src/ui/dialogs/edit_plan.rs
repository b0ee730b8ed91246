//! Edit plan dialog - admin pricing editor

use egui::Context;

use crate::core::{AppState, PlanDuration, SubscriptionPlan};
use crate::ui::app::Notifications;
use crate::ui::theme::Theme;

/// Working copy of a plan; features are edited one per line
#[derive(Debug, Clone)]
pub struct PlanForm {
    pub plan: SubscriptionPlan,
    pub features: String,
}

impl PlanForm {
    pub fn new(plan: SubscriptionPlan) -> Self {
        let features = plan.features.join("\n");
        Self { plan, features }
    }

    /// The edited plan with blank feature lines dropped
    pub fn to_plan(&self) -> SubscriptionPlan {
        let mut plan = self.plan.clone();
        plan.name = plan.name.trim().to_string();
        plan.features = self
            .features
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        plan
    }
}

pub fn render(
    ctx: &Context,
    form: &mut PlanForm,
    state: &mut AppState,
    toasts: &mut Notifications,
) -> bool {
    let mut open = true;
    let mut keep = true;

    egui::Window::new(format!("Edit Plan: {}", form.plan.name))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(460.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("plan_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut form.plan.name);
                    ui.end_row();

                    ui.label("Price:");
                    ui.add(
                        egui::DragValue::new(&mut form.plan.price)
                            .range(0.0..=100_000.0)
                            .prefix("$")
                            .speed(1.0),
                    );
                    ui.end_row();

                    ui.label("Duration:");
                    egui::ComboBox::from_id_salt("plan_duration")
                        .selected_text(form.plan.duration.label())
                        .show_ui(ui, |ui| {
                            for duration in PlanDuration::all() {
                                ui.selectable_value(
                                    &mut form.plan.duration,
                                    *duration,
                                    duration.label(),
                                );
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.label("Features:");
            ui.add(
                egui::TextEdit::multiline(&mut form.features)
                    .desired_rows(5)
                    .desired_width(f32::INFINITY),
            );
            ui.label(
                egui::RichText::new("One feature per line")
                    .small()
                    .color(Theme::TEXT_MUTED),
            );

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                let can_save = !form.plan.name.trim().is_empty();
                if ui
                    .add_enabled(can_save, egui::Button::new("Save Plan"))
                    .clicked()
                {
                    match state.update_plan(form.to_plan()) {
                        Ok(()) => toasts.success("Plan updated"),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_are_split_per_line_without_blanks() {
        let mut form = PlanForm::new(SubscriptionPlan::blank());
        form.plan.name = "  Field Kit ".to_string();
        form.features = "Elevation Lab\n\n  Identity Reset  \n".to_string();

        let plan = form.to_plan();
        assert_eq!(plan.name, "Field Kit");
        assert_eq!(plan.features, vec!["Elevation Lab", "Identity Reset"]);
    }
}
