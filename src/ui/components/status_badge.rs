//! Status badges for the link state and finding severities

use egui::{Color32, Response, Rounding, Ui, Vec2};

use crate::core::DeviceStatus;
use crate::sim::Severity;
use crate::ui::theme::Theme;

pub struct StatusBadge;

impl StatusBadge {
    /// Pill with a pulsing dot for the link state
    pub fn link(ui: &mut Ui, status: DeviceStatus) -> Response {
        let color = Theme::status_color(status);
        let (rect, response) = ui.allocate_exact_size(Vec2::new(120.0, 26.0), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, Rounding::same(13.0), color.linear_multiply(0.15));
            painter.rect_stroke(
                rect,
                Rounding::same(13.0),
                egui::Stroke::new(1.0, color.linear_multiply(0.3)),
            );

            let dot_center = rect.left_center() + Vec2::new(14.0, 0.0);
            if status != DeviceStatus::Disconnected {
                let t = ui.input(|i| i.time) as f32;
                let pulse = 0.5 + 0.5 * (t * 3.0).sin();
                painter.circle_filled(dot_center, 4.0 + 2.5 * pulse, color.linear_multiply(0.3));
                ui.ctx().request_repaint();
            }
            painter.circle_filled(dot_center, 4.0, color);

            painter.text(
                rect.center() + Vec2::new(8.0, 0.0),
                egui::Align2::CENTER_CENTER,
                status.label().to_uppercase(),
                egui::FontId::proportional(11.0),
                color,
            );
        }

        response
    }

    /// Compact severity tag
    pub fn severity(ui: &mut Ui, severity: Severity) -> Response {
        Self::tag(ui, severity.label(), Theme::severity_color(severity))
    }

    pub fn tag(ui: &mut Ui, text: &str, color: Color32) -> Response {
        egui::Frame::none()
            .fill(color.linear_multiply(0.15))
            .rounding(Rounding::same(4.0))
            .stroke(egui::Stroke::new(1.0, color.linear_multiply(0.4)))
            .inner_margin(egui::Margin::symmetric(6.0, 2.0))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(text.to_uppercase())
                        .size(10.0)
                        .strong()
                        .color(color),
                );
            })
            .response
    }

    /// Small dot followed by a label
    pub fn inline(ui: &mut Ui, text: &str, color: Color32) -> Response {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::new(8.0, 8.0), egui::Sense::hover());
            if ui.is_rect_visible(rect) {
                ui.painter().circle_filled(rect.center(), 3.5, color);
            }
            ui.add_space(4.0);
            ui.label(egui::RichText::new(text).size(12.0).color(color));
        })
        .response
    }
}
