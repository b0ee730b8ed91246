//! Hardware specs and security context

use egui::{Color32, RichText, Ui};

use super::PanelCtx;
use crate::ui::components::section::{page_header, section_frame};
use crate::ui::theme::Theme;

fn spec_row(ui: &mut Ui, label: &str, value: &str, color: Color32) {
    egui::Frame::none()
        .fill(Theme::BG_TERTIARY.linear_multiply(0.4))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).color(Theme::TEXT_SECONDARY));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(value).strong().color(color));
                });
            });
        });
    ui.add_space(6.0);
}

pub fn render(ui: &mut Ui, cx: &mut PanelCtx) {
    let Some(device) = cx.state.link.device() else {
        return;
    };
    page_header(ui, "Hardware", &format!("{} · build {}", device.model, device.os_build));

    ui.columns(2, |cols| {
        section_frame(&mut cols[0], |ui| {
            ui.label(RichText::new("PHYSICAL SPECS").small().strong().color(Theme::TEXT_MUTED));
            ui.add_space(8.0);
            spec_row(ui, "Processor Node", &device.cpu, Theme::PRIMARY_LIGHT);
            spec_row(ui, "LPDDR5 RAM", &device.ram, Theme::PRIMARY_LIGHT);
            spec_row(ui, "Display Cluster", "AMOLED 2X 120Hz", Theme::PRIMARY_LIGHT);
        });
        section_frame(&mut cols[1], |ui| {
            ui.label(RichText::new("SECURITY CONTEXT").small().strong().color(Theme::TEXT_MUTED));
            ui.add_space(8.0);
            spec_row(ui, "Encryption Status", "ACTIVE (AES-GCM)", Theme::SUCCESS);
            spec_row(ui, "TEE Environment", "SECURE ENCLAVE", Theme::SUCCESS);
            spec_row(ui, "Kernel Integrity", "VERIFIED BOOT", Theme::SUCCESS);
        });
    });
}
