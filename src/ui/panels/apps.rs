//! App manager - Installed packages and sideloading

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::sim::apps::{visible_apps, AppFilter, PackageKind, RunState, Sideload};
use crate::ui::components::section::{page_header, primary_button, search_box, section_frame};
use crate::ui::components::StatusBadge;
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Default)]
pub struct AppsPanel {
    filter: AppFilter,
    query: String,
    sideload: Sideload,
}

impl AppsPanel {
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        if self.sideload.poll(cx.now) {
            cx.state.log("Package installed and verified on device", LogLevel::Success);
            cx.toasts.success("Package installed");
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "App Manager", "Installed packages on the linked device");

        ui.horizontal(|ui| {
            for filter in AppFilter::all() {
                ui.selectable_value(&mut self.filter, *filter, filter.label());
            }
            ui.add_space(12.0);
            search_box(ui, &mut self.query, "Name or package", 220.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let installing = self.sideload.is_installing();
                let label = if installing { "Installing..." } else { "Sideload APK/IPA" };
                if primary_button(ui, !installing, &format!("{} {}", Icons::APP, label)).clicked() {
                    self.sideload.start(cx.now);
                    cx.state.log("Pushing package to device...", LogLevel::Info);
                }
                if installing {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);

        let apps = visible_apps(self.filter, &self.query);
        if apps.is_empty() {
            section_frame(ui, |ui| {
                ui.label(RichText::new("No packages match").color(Theme::TEXT_MUTED));
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for app in apps {
                section_frame(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(Icons::APP).size(24.0).color(Theme::PRIMARY_LIGHT));
                        ui.vertical(|ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(app.name).strong());
                                if app.verified {
                                    StatusBadge::inline(ui, &format!("{} verified", Icons::SUCCESS), Theme::SUCCESS);
                                }
                            });
                            ui.label(
                                RichText::new(format!("{} · v{} · {}", app.package, app.version, app.size))
                                    .small()
                                    .color(Theme::TEXT_MUTED),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let state_color = match app.state {
                                RunState::Running => Theme::SUCCESS,
                                RunState::Sleeping => Theme::WARNING,
                                RunState::Stopped => Theme::TEXT_MUTED,
                            };
                            StatusBadge::tag(ui, app.state.label(), state_color);
                            if app.kind == PackageKind::System {
                                StatusBadge::tag(ui, "SYSTEM", Theme::ROOT);
                            } else if app.is_removable() {
                                StatusBadge::tag(ui, "USER", Theme::INFO);
                            }
                        });
                    });
                });
            }
        });
    }
}
