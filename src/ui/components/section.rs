//! Page scaffolding shared by every panel: headers, framed sections,
//! toggle switches and labelled setting rows

use egui::{Color32, RichText, Ui, Vec2};

use crate::ui::theme::Theme;

/// Title and subtitle at the top of a panel
pub fn page_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(title).size(24.0).strong().color(Theme::TEXT_PRIMARY));
    ui.label(RichText::new(subtitle).size(13.0).color(Theme::TEXT_SECONDARY));
    ui.add_space(16.0);
}

pub fn section_header(ui: &mut Ui, icon: &str, title: &str) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).size(18.0).color(Theme::PRIMARY_LIGHT));
        ui.add_space(6.0);
        ui.label(RichText::new(title).size(16.0).strong().color(Theme::TEXT_PRIMARY));
    });
    ui.add_space(10.0);
}

/// Rounded card around a block of content
pub fn section_frame<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::none()
        .fill(Theme::BG_SECONDARY)
        .rounding(egui::Rounding::same(12.0))
        .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
        .inner_margin(egui::Margin::same(18.0))
        .outer_margin(egui::Margin::symmetric(0.0, 4.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

/// Black terminal frame for console output
pub fn console_frame(ui: &mut Ui, height: f32, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::none()
        .fill(Theme::BG_CONSOLE)
        .rounding(egui::Rounding::same(10.0))
        .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::ScrollArea::vertical()
                .max_height(height)
                .auto_shrink([false, true])
                .stick_to_bottom(true)
                .show(ui, add_contents);
        });
}

/// Small labelled value used in stat grids
pub fn stat(ui: &mut Ui, label: &str, value: &str, color: Color32) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label.to_uppercase()).size(10.0).color(Theme::TEXT_MUTED));
        ui.label(RichText::new(value).size(16.0).strong().color(color));
    });
}

pub fn primary_button(ui: &mut Ui, enabled: bool, text: &str) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(text).color(Color32::WHITE))
            .fill(Theme::PRIMARY)
            .rounding(egui::Rounding::same(8.0))
            .min_size(egui::vec2(120.0, 34.0)),
    )
}

pub fn danger_button(ui: &mut Ui, enabled: bool, text: &str) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(text).color(Color32::WHITE))
            .fill(Theme::ERROR.linear_multiply(0.85))
            .rounding(egui::Rounding::same(8.0))
            .min_size(egui::vec2(120.0, 34.0)),
    )
}

pub fn secondary_button(ui: &mut Ui, enabled: bool, text: &str) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(text).color(Theme::TEXT_PRIMARY))
            .fill(Theme::BG_TERTIARY)
            .rounding(egui::Rounding::same(8.0))
            .min_size(egui::vec2(100.0, 34.0)),
    )
}

/// Search field with a leading glyph
pub fn search_box(ui: &mut Ui, query: &mut String, hint: &str, width: f32) {
    egui::Frame::none()
        .fill(Theme::BG_SECONDARY)
        .rounding(egui::Rounding::same(8.0))
        .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
        .inner_margin(egui::Margin::symmetric(12.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⌕").size(14.0).color(Theme::TEXT_MUTED));
                ui.add(
                    egui::TextEdit::singleline(query)
                        .hint_text(hint)
                        .desired_width(width)
                        .frame(false),
                );
            });
        });
}

/// Animated on/off switch
pub fn toggle_switch(ui: &mut Ui, on: &mut bool) -> egui::Response {
    let desired_size = Vec2::new(44.0, 24.0);
    let (rect, mut response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let how_on = ui.ctx().animate_bool_responsive(response.id, *on);
        let track_color = if *on {
            Theme::PRIMARY.linear_multiply(0.9 + 0.1 * how_on)
        } else {
            Theme::BG_TERTIARY
        };
        ui.painter().rect(
            rect,
            egui::Rounding::same(12.0),
            track_color,
            egui::Stroke::new(1.0, if *on { Theme::PRIMARY } else { Theme::BORDER }),
        );

        let circle_x = egui::lerp((rect.left() + 12.0)..=(rect.right() - 12.0), how_on);
        let circle_center = egui::pos2(circle_x, rect.center().y);
        ui.painter().circle(
            circle_center + Vec2::new(0.0, 1.0),
            9.0,
            Color32::from_black_alpha(30),
            egui::Stroke::NONE,
        );
        ui.painter()
            .circle(circle_center, 9.0, Color32::WHITE, egui::Stroke::NONE);
    }

    response
}

/// Label and description on the left, a widget on the right
pub fn setting_row<R>(
    ui: &mut Ui,
    label: &str,
    description: &str,
    add_widget: impl FnOnce(&mut Ui) -> R,
) -> R {
    let inner = ui
        .horizontal(|ui| {
            ui.vertical(|ui| {
                ui.add_space(2.0);
                ui.label(RichText::new(label).size(14.0).color(Theme::TEXT_PRIMARY));
                ui.label(RichText::new(description).size(12.0).color(Theme::TEXT_SECONDARY));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), add_widget)
                .inner
        })
        .inner;
    ui.add_space(12.0);
    inner
}

/// Setting row with a toggle switch; true when flipped this frame
pub fn toggle_setting(ui: &mut Ui, value: &mut bool, label: &str, description: &str) -> bool {
    setting_row(ui, label, description, |ui| toggle_switch(ui, value).changed())
}
