//! GMT Vault panel - Saved device snapshots

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::profile::filter;
use crate::core::{DeviceProfile, ProfileId};
use crate::ui::components::section::{page_header, primary_button, search_box, section_frame};
use crate::ui::components::StatusBadge;
use crate::ui::dialogs::{ConfirmAction, DialogState, SnapshotForm};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Clone, Copy)]
enum VaultAction {
    Load(ProfileId),
    CopyJson(ProfileId),
    Delete(ProfileId),
}

#[derive(Debug, Default)]
pub struct VaultPanel {
    query: String,
}

impl VaultPanel {
    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(
            ui,
            "GMT Vault",
            "Encrypted device snapshots, restorable as the active link",
        );

        let connected = cx.state.link.is_connected();
        ui.horizontal(|ui| {
            search_box(ui, &mut self.query, "Search by name or model", 280.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let snapshot = primary_button(ui, connected, &format!("{} Snapshot Device", Icons::VAULT))
                    .on_disabled_hover_text("Link a device first");
                if snapshot.clicked() {
                    *cx.dialog = DialogState::Snapshot(SnapshotForm::default());
                }
            });
        });
        ui.add_space(8.0);

        let matches = filter(&cx.state.profiles, &self.query);
        if matches.is_empty() {
            empty_state(ui, cx.state.profiles.is_empty());
            return;
        }

        let mut action = None;
        ui.label(
            RichText::new(format!("{} of {} profiles", matches.len(), cx.state.profiles.len()))
                .color(Theme::TEXT_SECONDARY),
        );
        egui::ScrollArea::vertical().show(ui, |ui| {
            for profile in matches {
                if let Some(a) = profile_row(ui, profile) {
                    action = Some(a);
                }
            }
        });

        if let Some(action) = action {
            self.handle(action, ui.ctx(), cx);
        }
    }

    fn handle(&mut self, action: VaultAction, ctx: &egui::Context, cx: &mut PanelCtx) {
        match action {
            VaultAction::Load(id) => match cx.state.load_profile(id, cx.now) {
                Ok(()) => cx.toasts.success("Profile loaded as active link"),
                Err(e) => cx.toasts.error(e.to_string()),
            },
            VaultAction::CopyJson(id) => {
                let Some(profile) = cx.state.profiles.iter().find(|p| p.id == id) else {
                    return;
                };
                match profile.to_json() {
                    Ok(json) => {
                        ctx.copy_text(json);
                        cx.toasts.info("Profile JSON copied to clipboard");
                    }
                    Err(e) => {
                        tracing::error!("Failed to export profile: {}", e);
                        cx.toasts.error("Profile export failed");
                    }
                }
            }
            VaultAction::Delete(id) => {
                let name = cx
                    .state
                    .profiles
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.profile_name.clone())
                    .unwrap_or_default();
                *cx.dialog = DialogState::confirm(
                    "Purge Profile",
                    format!("Permanently delete '{}' from the vault?", name),
                    ConfirmAction::DeleteProfile(id),
                );
            }
        }
    }
}

fn profile_row(ui: &mut Ui, profile: &DeviceProfile) -> Option<VaultAction> {
    let mut action = None;
    section_frame(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(Icons::PHONE).size(26.0).color(Theme::PRIMARY_LIGHT));
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&profile.profile_name).strong().size(15.0));
                    StatusBadge::tag(ui, profile.category.label(), Theme::INFO);
                    if profile.cloud_synced {
                        StatusBadge::inline(ui, &format!("{} synced", Icons::CLOUD), Theme::SUCCESS);
                    }
                });
                ui.label(
                    RichText::new(format!(
                        "{} · {} · {}",
                        profile.device_info.model,
                        profile.device_info.serial_number,
                        profile.timestamp.format("%Y-%m-%d %H:%M")
                    ))
                    .small()
                    .color(Theme::TEXT_MUTED),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(RichText::new(Icons::TRASH).color(Theme::ERROR))
                    .on_hover_text("Delete")
                    .clicked()
                {
                    action = Some(VaultAction::Delete(profile.id));
                }
                if ui.button(Icons::EXPORT).on_hover_text("Copy JSON").clicked() {
                    action = Some(VaultAction::CopyJson(profile.id));
                }
                if ui.button("Load").clicked() {
                    action = Some(VaultAction::Load(profile.id));
                }
            });
        });
    });
    action
}

fn empty_state(ui: &mut Ui, vault_empty: bool) {
    section_frame(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.label(RichText::new(Icons::VAULT).size(44.0).color(Theme::TEXT_MUTED));
            ui.add_space(8.0);
            let text = if vault_empty {
                "The vault is empty. Snapshot a linked device to get started."
            } else {
                "No profiles match your search"
            };
            ui.label(RichText::new(text).color(Theme::TEXT_SECONDARY));
            ui.add_space(16.0);
        });
    });
}
