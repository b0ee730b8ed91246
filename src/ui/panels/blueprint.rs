//! Device blueprint - Generated internal schematic of the linked handset

use anyhow::{Context as _, Result};
use egui::{ColorImage, Context, RichText, TextureHandle, TextureOptions, Ui};

use super::PanelCtx;
use crate::core::DeviceInfo;
use crate::ui::components::section::{page_header, secondary_button, section_frame, section_header};
use crate::ui::components::StatusBadge;
use crate::ui::theme::{Icons, Theme};

/// Decode PNG bytes into an egui image
fn decode_png(bytes: &[u8]) -> Result<ColorImage> {
    let image = image::load_from_memory(bytes).context("Failed to decode schematic")?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

fn component_map(device: &DeviceInfo) -> [(&'static str, &'static str, String); 5] {
    [
        ("SoC Module", "Top Center", "98%".to_string()),
        ("Lithium Ion Cell", "Mid Chassis", format!("{}%", device.battery_health)),
        ("Optic Cluster", "Rear Top Left", "100%".to_string()),
        ("Sub-G Antenna", "Perimeter Rails", "Optimal".to_string()),
        ("Haptic Engine", "Bottom Right", "Verified".to_string()),
    ]
}

#[derive(Default)]
pub struct BlueprintPanel {
    texture: Option<TextureHandle>,
    requested: bool,
    pending: bool,
}

impl BlueprintPanel {
    /// Accept a generated schematic; `None` leaves the placeholder up
    pub fn receive(&mut self, ctx: &Context, png: Option<Vec<u8>>) {
        self.pending = false;
        let Some(bytes) = png else {
            self.texture = None;
            return;
        };
        match decode_png(&bytes) {
            Ok(image) => {
                self.texture = Some(ctx.load_texture("device_blueprint", image, TextureOptions::LINEAR));
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                self.texture = None;
            }
        }
    }

    fn request(&mut self, cx: &mut PanelCtx) {
        if let Some(device) = cx.state.link.device() {
            cx.ai.request_blueprint(device);
            self.requested = true;
            self.pending = true;
        }
    }

    pub fn show(&mut self, ui: &mut Ui, cx: &mut PanelCtx) {
        if !self.requested {
            self.request(cx);
        }
        let Some(device) = cx.state.link.device().cloned() else {
            return;
        };

        ui.horizontal(|ui| {
            page_header(
                ui,
                "Structural Design Layout",
                &format!("Generated internal hardware schematic for {} {}", device.brand, device.model),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if secondary_button(ui, !self.pending, "Regenerate").clicked() {
                    self.request(cx);
                }
                StatusBadge::tag(ui, "X-RAY VIEW", Theme::INFO);
            });
        });

        ui.columns(2, |cols| {
            section_header(&mut cols[0], Icons::LAYERS, "Component Mapping");
            section_frame(&mut cols[0], |ui| {
                for (name, position, health) in component_map(&device) {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(name).strong());
                            ui.label(RichText::new(position).small().color(Theme::TEXT_MUTED));
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(health).monospace().color(Theme::PRIMARY_LIGHT));
                        });
                    });
                    ui.add_space(4.0);
                }
            });
            section_frame(&mut cols[0], |ui| {
                ui.label(RichText::new(format!("{} Hardware Insight", Icons::ZAP)).strong().color(Theme::PRIMARY_LIGHT));
                ui.label(
                    RichText::new(format!(
                        "The internal layout uses a \"Sandwich\" motherboard design to maximize thermal dissipation for the {}. Thermal pads are positioned directly beneath the OLED panel.",
                        device.cpu
                    ))
                    .color(Theme::TEXT_SECONDARY),
                );
            });

            section_frame(&mut cols[1], |ui| {
                ui.set_min_height(520.0);
                ui.vertical_centered(|ui| {
                    if self.pending {
                        ui.add_space(200.0);
                        ui.spinner();
                        ui.label(
                            RichText::new("GENERATING TECHNICAL SCHEMATIC...")
                                .monospace()
                                .color(Theme::TEXT_MUTED),
                        );
                    } else if let Some(texture) = &self.texture {
                        ui.add(egui::Image::new(texture).max_height(560.0).rounding(10.0));
                    } else {
                        ui.add_space(200.0);
                        ui.label(RichText::new(Icons::LAYERS).size(48.0).color(Theme::TEXT_MUTED));
                        ui.label(
                            RichText::new("Schematic unavailable. Regenerate to try again.")
                                .color(Theme::TEXT_MUTED),
                        );
                    }
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_png_dimensions() {
        let mut bytes = Vec::new();
        image::RgbaImage::from_pixel(3, 5, image::Rgba([10, 20, 30, 255]))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_png(&bytes).unwrap();
        assert_eq!(decoded.size, [3, 5]);
        assert_eq!(decoded.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(decode_png(b"not a png").is_err());
    }

    #[test]
    fn battery_health_feeds_component_map() {
        let device = DeviceInfo::mock();
        let map = component_map(&device);
        assert_eq!(map[1].2, "92%");
    }
}
