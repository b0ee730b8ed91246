//! Identifier rows that hide all but the last four characters

use egui::{RichText, Ui};

use crate::core::mask_sensitive;
use crate::ui::theme::{Icons, Theme};

/// A label, the masked (or revealed) value and an eye toggle
pub fn masked_field(ui: &mut Ui, label: &str, value: &str, reveal: &mut bool) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).size(12.0).color(Theme::TEXT_MUTED));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let eye = if *reveal { Icons::CLOSE } else { Icons::EYE };
            if ui
                .small_button(eye)
                .on_hover_text(if *reveal { "Hide" } else { "Reveal" })
                .clicked()
            {
                *reveal = !*reveal;
            }
            ui.label(
                RichText::new(mask_sensitive(value, *reveal))
                    .monospace()
                    .color(Theme::TEXT_PRIMARY),
            );
        });
    });
}
