//! File explorer - Breadcrumb browser over the handset's user storage

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::core::LogLevel;
use crate::sim::files::{FileBrowser, FileEntry};
use crate::ui::components::section::{page_header, search_box, secondary_button, section_frame};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Default)]
pub struct FilesPanel {
    browser: FileBrowser,
    query: String,
}

fn icon_for(entry: &FileEntry) -> &'static str {
    if entry.is_folder() {
        return Icons::FOLDER;
    }
    match entry.extension() {
        Some("apk") => Icons::APP,
        Some("jpg" | "png" | "mp4") => Icons::EYE,
        _ => Icons::FILE,
    }
}

impl FilesPanel {
    pub fn poll(&mut self, cx: &mut PanelCtx) {
        if let Some(notice) = self.browser.poll(cx.now) {
            cx.state.log(notice.clone(), LogLevel::Success);
            cx.toasts.success(notice);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "File Explorer", "Browse user storage on the linked device");

        ui.horizontal(|ui| {
            if secondary_button(ui, !self.browser.at_mount_point(), "⬆ Up").clicked() {
                self.browser.up();
                self.query.clear();
            }
            ui.add_space(4.0);

            let mut jump = None;
            for (i, segment) in self.browser.segments().iter().enumerate() {
                let label = if i == 0 { "/" } else { segment.as_str() };
                if ui.link(RichText::new(label).monospace()).clicked() {
                    jump = Some(i);
                }
                if i > 0 {
                    ui.label(RichText::new("/").monospace().color(Theme::TEXT_MUTED));
                }
            }
            if let Some(i) = jump {
                self.browser.jump_to(i);
                self.query.clear();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let exporting = self.browser.is_exporting();
                if secondary_button(ui, !exporting, &format!("{} Export Manifest", Icons::EXPORT)).clicked() {
                    self.browser.start_export(cx.now);
                    cx.state.log(
                        format!("Generating manifest for {}", self.browser.display_path()),
                        LogLevel::Info,
                    );
                }
                if exporting {
                    ui.spinner();
                }
                search_box(ui, &mut self.query, "Search this folder", 180.0);
            });
        });
        ui.add_space(8.0);

        let entries = self.browser.entries(&self.query);
        let mut open = None;

        section_frame(ui, |ui| {
            if entries.is_empty() {
                ui.label(RichText::new("This folder is empty").color(Theme::TEXT_MUTED));
                return;
            }
            egui::Grid::new("file_listing")
                .num_columns(4)
                .striped(true)
                .spacing([18.0, 6.0])
                .show(ui, |ui| {
                    for entry in &entries {
                        let name = RichText::new(format!("{} {}", icon_for(entry), entry.name));
                        if entry.is_folder() {
                            let color = if entry.protected { Theme::TEXT_MUTED } else { Theme::TEXT_PRIMARY };
                            let response = ui.add(
                                egui::Label::new(name.color(color)).sense(egui::Sense::click()),
                            );
                            if response.double_clicked() || response.clicked() {
                                open = Some(*entry);
                            }
                        } else {
                            ui.label(name);
                        }
                        ui.label(RichText::new(entry.size).monospace().color(Theme::TEXT_SECONDARY));
                        ui.label(RichText::new(entry.modified).color(Theme::TEXT_MUTED));
                        if entry.protected {
                            ui.label(RichText::new(format!("{} system", Icons::LOCK)).small().color(Theme::WARNING));
                        } else {
                            ui.label("");
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(entry) = open {
            if self.browser.enter(entry) {
                self.query.clear();
            } else {
                cx.toasts.warning(format!("Access to '{}' is restricted", entry.name));
            }
        }
    }
}
