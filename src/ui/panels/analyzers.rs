//! Advanced analyzers - Spectrum load, signal entropy and packet capture

use std::time::Instant;

use egui::{RichText, Ui};

use super::PanelCtx;
use crate::sim::analyzers::SignalAnalyzer;
use crate::ui::components::section::{console_frame, page_header, section_frame, section_header, stat};
use crate::ui::components::ResourceBar;
use crate::ui::theme::{Icons, Theme};

pub struct AnalyzersPanel {
    analyzer: SignalAnalyzer,
}

impl AnalyzersPanel {
    pub fn new(now: Instant) -> Self {
        Self {
            analyzer: SignalAnalyzer::new(now),
        }
    }

    pub fn poll(&mut self, cx: &mut PanelCtx) {
        self.analyzer.poll(cx.now, cx.state.rng());
    }

    pub fn show(&mut self, ui: &mut Ui) {
        page_header(ui, "Advanced Analyzers", "RF spectrum and baseband traffic");

        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                stat(
                    ui,
                    "SIGNAL ENTROPY",
                    &format!("{:.3}", self.analyzer.entropy),
                    Theme::ROOT,
                );
                ui.add_space(40.0);
                let snr = self
                    .analyzer
                    .snr_delta()
                    .map_or("--".to_string(), |v| format!("{:.1} dB", v));
                stat(ui, "MEAN SNR", &snr, Theme::INFO);
                ui.add_space(40.0);
                stat(
                    ui,
                    "PACKETS",
                    &self.analyzer.packets.len().to_string(),
                    Theme::TEXT_PRIMARY,
                );
            });
        });

        section_header(ui, Icons::CHART, "Spectrum");
        section_frame(ui, |ui| {
            if self.analyzer.spectrum.is_empty() {
                ui.label(RichText::new("Waiting for first sweep...").color(Theme::TEXT_MUTED));
                return;
            }
            ui.horizontal(|ui| {
                for reading in &self.analyzer.spectrum {
                    ui.vertical(|ui| {
                        ResourceBar::vertical(ui, reading.load as f32 / 100.0, 36.0, 120.0);
                        ui.label(RichText::new(reading.band).small().monospace());
                        ui.label(
                            RichText::new(format!("{:.1} dB", reading.snr))
                                .small()
                                .color(Theme::TEXT_MUTED),
                        );
                    });
                    ui.add_space(10.0);
                }
            });
        });

        section_header(ui, Icons::TERMINAL, "Packet Capture");
        console_frame(ui, 240.0, |ui| {
            for packet in &self.analyzer.packets {
                let color = if packet.entropy > 0.7 { Theme::WARNING } else { Theme::TEXT_CONSOLE };
                ui.label(
                    RichText::new(format!(
                        "#{:05} [{}] {:<10} {} (H={:.2})",
                        packet.seq, packet.timestamp, packet.protocol, packet.action, packet.entropy
                    ))
                    .monospace()
                    .color(color),
                );
            }
        });
    }
}
