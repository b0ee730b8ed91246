//! Location matrix - Node history, device finder and nearby support

use egui::{Pos2, Rect, RichText, Ui, Vec2};

use super::PanelCtx;
use crate::ai::SupportInfo;
use crate::core::LogLevel;
use crate::sim::location::{
    is_email_query, Coordinates, DeviceFinder, LocationMatrix, LocationPing, TrackingMode,
};
use crate::ui::components::section::{page_header, primary_button, search_box, secondary_button, section_frame, section_header};
use crate::ui::theme::{Icons, Theme};

#[derive(Debug)]
pub struct LocationPanel {
    matrix: LocationMatrix,
    finder: DeviceFinder,
    query: String,
    support: Option<SupportInfo>,
    support_pending: bool,
    was_searching: bool,
}

impl Default for LocationPanel {
    fn default() -> Self {
        Self {
            matrix: LocationMatrix::new(Coordinates::operator_from_env()),
            finder: DeviceFinder::default(),
            query: String::new(),
            support: None,
            support_pending: false,
            was_searching: false,
        }
    }
}

impl LocationPanel {
    pub fn receive_support(&mut self, info: SupportInfo) {
        self.support_pending = false;
        self.support = Some(info);
    }

    pub fn poll(&mut self, cx: &mut PanelCtx) {
        self.finder.poll(cx.now);
        if self.was_searching && !self.finder.is_searching() {
            if let Some(result) = self.finder.result() {
                cx.state.log(
                    format!("Finder located {} in {}", result.model, result.location),
                    LogLevel::Success,
                );
            }
        }
        self.was_searching = self.finder.is_searching();
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        page_header(ui, "Location Matrix", "Node history, global finder and nearby support");

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.matrix.mode, TrackingMode::Target, "Target");
            ui.selectable_value(&mut self.matrix.mode, TrackingMode::Operator, "Operator");
            ui.add_space(12.0);
            let heat = if self.matrix.show_heatmap { "Hide Heatmap" } else { "Show Heatmap" };
            if secondary_button(ui, true, heat).clicked() {
                self.matrix.toggle_heatmap();
            }
        });
        ui.add_space(6.0);

        section_frame(ui, |ui| self.map(ui));

        match self.matrix.mode {
            TrackingMode::Target => {
                if let Some(ping) = self.matrix.latest_target() {
                    ui.label(
                        RichText::new(format!("Last fix {} · {} · {}", ping.time, ping.label, ping.coords.display()))
                            .color(Theme::TEXT_SECONDARY),
                    );
                }
            }
            TrackingMode::Operator => {
                let text = match self.matrix.operator_coords {
                    Some(coords) => format!("Operator at {}", coords.display()),
                    None => format!(
                        "Operator position unavailable, using {}",
                        self.matrix.support_coords().display()
                    ),
                };
                ui.label(RichText::new(text).color(Theme::TEXT_SECONDARY));
            }
        }

        ui.columns(2, |cols| {
            self.finder_section(&mut cols[0], cx);
            self.support_section(&mut cols[1], cx);
        });
    }

    fn map(&self, ui: &mut Ui) {
        let size = Vec2::new(ui.available_width(), 220.0);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, egui::Rounding::same(8.0), Theme::BG_CONSOLE);

        for i in 1..8 {
            let x = rect.left() + rect.width() * i as f32 / 8.0;
            let y = rect.top() + rect.height() * i as f32 / 8.0;
            let grid = egui::Stroke::new(0.5, Theme::BORDER);
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid);
        }

        let points = project(&self.matrix.history, rect.shrink(30.0));
        if points.len() > 1 {
            painter.add(egui::Shape::line(
                points.clone(),
                egui::Stroke::new(1.5, Theme::PRIMARY.linear_multiply(0.6)),
            ));
        }
        for (point, ping) in points.iter().zip(&self.matrix.history) {
            if self.matrix.show_heatmap {
                for (radius, alpha) in [(36.0, 0.08), (22.0, 0.15), (12.0, 0.3)] {
                    painter.circle_filled(*point, radius, Theme::ERROR.linear_multiply(alpha));
                }
            }
            painter.circle_filled(*point, 5.0, Theme::PRIMARY_LIGHT);
            painter.text(
                *point + Vec2::new(8.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                ping.label,
                egui::FontId::proportional(11.0),
                Theme::TEXT_CONSOLE,
            );
        }
    }

    fn finder_section(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        section_header(ui, Icons::SEARCH, "Global Device Finder");
        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                search_box(ui, &mut self.query, "Phone number or email", 200.0);
                let searching = self.finder.is_searching();
                if primary_button(ui, !searching && !self.query.trim().is_empty(), "Locate").clicked()
                    && self.finder.search(&self.query, cx.now)
                {
                    let kind = if is_email_query(&self.query) { "account" } else { "number" };
                    cx.state.log(format!("Triangulating {} {}", kind, self.query.trim()), LogLevel::Info);
                }
                if searching {
                    ui.spinner();
                }
            });

            if let Some(result) = self.finder.result() {
                ui.add_space(8.0);
                egui::Grid::new("finder_result").num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
                    for (label, value) in [
                        ("Status", result.status),
                        ("Model", result.model),
                        ("Last seen", result.last_seen),
                        ("Location", result.location),
                        ("Carrier", result.carrier),
                        ("Network", result.network_state),
                        ("Signal", result.signal_strength),
                    ] {
                        ui.label(RichText::new(label).color(Theme::TEXT_MUTED));
                        ui.label(value);
                        ui.end_row();
                    }
                });
            }
        });
    }

    fn support_section(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        section_header(ui, Icons::PIN, "Nearby Repair Support");
        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                let label = if self.support_pending { "Searching..." } else { "Find Support" };
                if primary_button(ui, !self.support_pending, label).clicked() {
                    let brand = cx
                        .state
                        .link
                        .device()
                        .map(|d| d.brand.clone())
                        .unwrap_or_default();
                    cx.ai.request_support(self.matrix.support_coords(), brand);
                    self.support_pending = true;
                    cx.state.log("Querying authorised repair centres...", LogLevel::Info);
                }
                if self.support_pending {
                    ui.spinner();
                }
            });

            let Some(info) = &self.support else {
                return;
            };
            ui.add_space(8.0);
            ui.label(RichText::new(&info.text).color(Theme::TEXT_SECONDARY));
            if !info.sources.is_empty() {
                ui.add_space(6.0);
                ui.label(RichText::new("SOURCES").small().color(Theme::TEXT_MUTED));
                for source in &info.sources {
                    ui.hyperlink_to(source.title.as_str(), &source.uri);
                }
            }
        });
    }
}

/// Fit geographic points into `rect`, north up
fn project(history: &[LocationPing], rect: Rect) -> Vec<Pos2> {
    if history.is_empty() {
        return Vec::new();
    }
    let (mut min_lat, mut max_lat) = (f64::MAX, f64::MIN);
    let (mut min_lng, mut max_lng) = (f64::MAX, f64::MIN);
    for ping in history {
        min_lat = min_lat.min(ping.coords.lat);
        max_lat = max_lat.max(ping.coords.lat);
        min_lng = min_lng.min(ping.coords.lng);
        max_lng = max_lng.max(ping.coords.lng);
    }
    let span_lat = (max_lat - min_lat).max(1e-6);
    let span_lng = (max_lng - min_lng).max(1e-6);

    history
        .iter()
        .map(|ping| {
            let x = ((ping.coords.lng - min_lng) / span_lng) as f32;
            let y = ((max_lat - ping.coords.lat) / span_lat) as f32;
            Pos2::new(rect.left() + x * rect.width(), rect.top() + y * rect.height())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::location::location_history;

    #[test]
    fn projection_keeps_points_inside_the_map() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 100.0));
        let points = project(&location_history(), rect);

        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| rect.expand(0.01).contains(*p)));
        // Westernmost ping sits on the left edge
        assert!(points.iter().any(|p| p.x.abs() < 0.01));
    }

    #[test]
    fn support_result_clears_pending_flag() {
        let mut panel = LocationPanel {
            support_pending: true,
            ..Default::default()
        };
        panel.receive_support(SupportInfo {
            text: "Uptown Repair".to_string(),
            sources: Vec::new(),
        });
        assert!(!panel.support_pending);
        assert_eq!(panel.support.as_ref().map(|s| s.text.as_str()), Some("Uptown Repair"));
    }
}
