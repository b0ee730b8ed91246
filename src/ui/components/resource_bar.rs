//! Bars, gauges and sparklines for device telemetry

use egui::{Color32, Rect, Response, Rounding, Ui, Vec2};

use crate::ui::theme::Theme;

pub struct ResourceBar;

impl ResourceBar {
    /// Horizontal load bar with an inline label
    pub fn horizontal(
        ui: &mut Ui,
        value: f32, // 0.0 - 1.0
        label: &str,
        width: f32,
        show_percentage: bool,
    ) -> Response {
        let height = 22.0;
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, height), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let clamped = value.clamp(0.0, 1.0);

            painter.rect_filled(rect, Rounding::same(6.0), Theme::BG_TERTIARY);
            painter.rect_stroke(
                rect,
                Rounding::same(6.0),
                egui::Stroke::new(1.0, Theme::BORDER_LIGHT),
            );

            let fill_width = rect.width() * clamped;
            if fill_width > 0.0 {
                let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill_width, height));
                painter.rect_filled(
                    fill_rect,
                    Rounding::same(6.0),
                    Self::color_for_value(clamped).linear_multiply(0.8),
                );
            }

            let text = if show_percentage {
                format!("{}: {:.0}%", label, clamped * 100.0)
            } else {
                label.to_string()
            };
            painter.text(
                rect.center() + Vec2::new(1.0, 1.0),
                egui::Align2::CENTER_CENTER,
                &text,
                egui::FontId::proportional(11.0),
                Color32::from_black_alpha(100),
            );
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                text,
                egui::FontId::proportional(11.0),
                Theme::TEXT_PRIMARY,
            );
        }

        response
    }

    /// Thin accent-colored progress strip for running jobs
    pub fn progress(ui: &mut Ui, value: f32, color: Color32) -> Response {
        let width = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(Vec2::new(width, 6.0), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, Rounding::same(3.0), Theme::BG_TERTIARY);
            let fill = rect.width() * value.clamp(0.0, 1.0);
            if fill > 0.0 {
                let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill, rect.height()));
                painter.rect_filled(fill_rect, Rounding::same(3.0), color);
            }
        }

        response
    }

    /// Vertical bar, filled from the bottom
    pub fn vertical(ui: &mut Ui, value: f32, width: f32, height: f32) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, height), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let clamped = value.clamp(0.0, 1.0);
            painter.rect_filled(rect, Rounding::same(3.0), Theme::BG_TERTIARY);

            let fill_height = rect.height() * clamped;
            if fill_height > 0.0 {
                let fill_rect =
                    Rect::from_min_max(egui::pos2(rect.min.x, rect.max.y - fill_height), rect.max);
                painter.rect_filled(fill_rect, Rounding::same(3.0), Self::color_for_value(clamped));
            }
        }

        response.on_hover_text(format!("{:.0}%", value * 100.0))
    }

    /// Ring gauge with the percentage in the middle
    pub fn circular(ui: &mut Ui, value: f32, size: f32) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = rect.center();
            let radius = size * 0.4;
            let stroke_width = size * 0.1;
            let clamped = value.clamp(0.0, 1.0);

            painter.circle_stroke(
                center,
                radius,
                egui::Stroke::new(stroke_width, Theme::BG_TERTIARY),
            );

            if clamped > 0.0 {
                // Health gauges read high-is-good, so invert the load palette
                let fill_color = Self::color_for_value(1.0 - clamped);
                let n_points = (32.0 * clamped).max(2.0) as usize;
                let start_angle = -std::f32::consts::FRAC_PI_2;
                let end_angle = start_angle + std::f32::consts::TAU * clamped;

                let points: Vec<egui::Pos2> = (0..=n_points)
                    .map(|i| {
                        let t = i as f32 / n_points as f32;
                        let angle = start_angle + (end_angle - start_angle) * t;
                        center + Vec2::new(angle.cos(), angle.sin()) * radius
                    })
                    .collect();
                painter.add(egui::Shape::line(
                    points,
                    egui::Stroke::new(stroke_width, fill_color),
                ));
            }

            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                format!("{:.0}%", clamped * 100.0),
                egui::FontId::proportional(size * 0.2),
                Theme::TEXT_PRIMARY,
            );
        }

        response
    }

    /// Filled line chart of percentage samples, oldest first
    pub fn sparkline(ui: &mut Ui, values: &[u8], color: Color32, size: Vec2) -> Response {
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());

        if ui.is_rect_visible(rect) && values.len() > 1 {
            let painter = ui.painter();
            painter.rect_filled(rect, Rounding::same(6.0), Theme::BG_TERTIARY.linear_multiply(0.5));

            let step = rect.width() / (values.len() - 1) as f32;
            let points: Vec<egui::Pos2> = values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let y = rect.bottom() - rect.height() * (*v as f32 / 100.0).clamp(0.0, 1.0);
                    egui::pos2(rect.left() + step * i as f32, y)
                })
                .collect();

            for pair in points.windows(2) {
                let quad = vec![
                    pair[0],
                    pair[1],
                    egui::pos2(pair[1].x, rect.bottom()),
                    egui::pos2(pair[0].x, rect.bottom()),
                ];
                painter.add(egui::Shape::convex_polygon(
                    quad,
                    color.linear_multiply(0.12),
                    egui::Stroke::NONE,
                ));
            }
            painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, color)));
        }

        response
    }

    fn color_for_value(value: f32) -> Color32 {
        if value < 0.5 {
            Theme::SUCCESS
        } else if value < 0.75 {
            let t = (value - 0.5) / 0.25;
            Self::lerp_color(Theme::SUCCESS, Theme::WARNING, t)
        } else if value < 0.9 {
            Theme::WARNING
        } else {
            let t = (value - 0.9) / 0.1;
            Self::lerp_color(Theme::WARNING, Theme::ERROR, t.min(1.0))
        }
    }

    fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        Color32::from_rgba_unmultiplied(
            (a.r() as f32 + (b.r() as f32 - a.r() as f32) * t) as u8,
            (a.g() as f32 + (b.g() as f32 - a.g() as f32) * t) as u8,
            (a.b() as f32 + (b.b() as f32 - a.b() as f32) * t) as u8,
            (a.a() as f32 + (b.a() as f32 - a.a() as f32) * t) as u8,
        )
    }
}
