//! Subscriptions panel - Plan catalogue, licensing and the admin plan editor

use chrono::Utc;
use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::subscription::current_plan;
use crate::core::SubscriptionPlan;
use crate::ui::components::section::{
    danger_button, page_header, primary_button, secondary_button, section_frame, section_header,
};
use crate::ui::components::StatusBadge;
use crate::ui::dialogs::{ConfirmAction, DialogState};
use crate::ui::theme::{Icons, Theme};

const CARD_WIDTH: f32 = 240.0;

enum PlanAction {
    Subscribe(String),
    Edit(SubscriptionPlan),
    Remove(SubscriptionPlan),
}

pub fn render(ui: &mut Ui, cx: &mut PanelCtx) {
    page_header(
        ui,
        "Subscriptions",
        "Unlock AI diagnostics, elevation and forensic tooling",
    );

    let is_admin = cx.state.is_admin();
    let active_id = cx
        .state
        .user
        .as_ref()
        .and_then(|user| current_plan(user, &cx.state.plans))
        .map(|plan| plan.id.clone());

    current_license(ui, cx);

    ui.horizontal(|ui| {
        section_header(ui, Icons::CARD, "Available Plans");
        if is_admin {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if secondary_button(ui, true, "+ Add Plan").clicked() {
                    match cx.state.add_plan() {
                        Ok(id) => {
                            if let Some(plan) = cx.state.plans.iter().find(|p| p.id == id) {
                                *cx.dialog = DialogState::edit_plan(plan);
                            }
                        }
                        Err(e) => cx.toasts.error(e.to_string()),
                    }
                }
            });
        }
    });

    let plans = cx.state.plans.clone();
    let mut action = None;

    if plans.is_empty() {
        section_frame(ui, |ui| {
            ui.label(RichText::new("No plans are on offer").color(Theme::TEXT_MUTED));
        });
    }

    ui.horizontal_wrapped(|ui| {
        for plan in &plans {
            let active = active_id.as_deref() == Some(plan.id.as_str());
            if let Some(a) = plan_card(ui, plan, active, is_admin) {
                action = Some(a);
            }
        }
    });

    match action {
        Some(PlanAction::Subscribe(id)) => match cx.state.subscribe(&id) {
            Ok(()) => cx.toasts.success("License activated"),
            Err(e) => cx.toasts.error(e.to_string()),
        },
        Some(PlanAction::Edit(plan)) => *cx.dialog = DialogState::edit_plan(&plan),
        Some(PlanAction::Remove(plan)) => {
            *cx.dialog = DialogState::confirm(
                "Remove Plan",
                format!("Remove the '{}' plan from the catalogue?", plan.name),
                ConfirmAction::RemovePlan(plan.id),
            );
        }
        None => {}
    }
}

fn current_license(ui: &mut Ui, cx: &PanelCtx) {
    let Some(user) = cx.state.user.as_ref() else {
        return;
    };
    let now = Utc::now();

    section_frame(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(Icons::KEY).size(22.0).color(Theme::PRIMARY_LIGHT));
            ui.vertical(|ui| {
                match current_plan(user, &cx.state.plans) {
                    Some(plan) => {
                        ui.label(RichText::new(&plan.name).strong().size(16.0));
                    }
                    None => {
                        ui.label(RichText::new("No active license").strong().size(16.0));
                    }
                }
                if let Some(expiry) = user.subscription.as_ref().and_then(|s| s.expiry_date) {
                    ui.label(
                        RichText::new(format!("Expires {}", expiry.format("%Y-%m-%d")))
                            .small()
                            .color(Theme::TEXT_MUTED),
                    );
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if user.has_license(now) {
                    StatusBadge::tag(ui, "LICENSED", Theme::SUCCESS);
                } else {
                    StatusBadge::tag(ui, "UNLICENSED", Theme::WARNING);
                }
            });
        });
    });
}

fn plan_card(
    ui: &mut Ui,
    plan: &SubscriptionPlan,
    active: bool,
    is_admin: bool,
) -> Option<PlanAction> {
    let mut action = None;
    let stroke = if active { Theme::PRIMARY } else { Theme::BORDER_LIGHT };

    egui::Frame::none()
        .fill(Theme::BG_SECONDARY)
        .rounding(egui::Rounding::same(14.0))
        .stroke(egui::Stroke::new(if active { 2.0 } else { 1.0 }, stroke))
        .inner_margin(egui::Margin::same(18.0))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.label(RichText::new(&plan.name).size(17.0).strong());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("${:.0}", plan.price))
                        .size(26.0)
                        .strong()
                        .color(Theme::PRIMARY_LIGHT),
                );
                ui.label(
                    RichText::new(format!("/ {}", plan.duration.label().to_lowercase()))
                        .color(Theme::TEXT_MUTED),
                );
            });
            ui.add_space(8.0);
            for feature in &plan.features {
                ui.label(
                    RichText::new(format!("{} {}", Icons::SUCCESS, feature))
                        .color(Theme::TEXT_SECONDARY),
                );
            }
            ui.add_space(12.0);

            let label = if active { "Current Plan" } else { "Subscribe" };
            if primary_button(ui, !active, label).clicked() {
                action = Some(PlanAction::Subscribe(plan.id.clone()));
            }

            if is_admin {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if secondary_button(ui, true, "Edit").clicked() {
                        action = Some(PlanAction::Edit(plan.clone()));
                    }
                    if danger_button(ui, true, &format!("{} Remove", Icons::TRASH)).clicked() {
                        action = Some(PlanAction::Remove(plan.clone()));
                    }
                });
            }
        });

    action
}
