//! Performance lab - Live CPU, memory and per-core telemetry

use std::time::Instant;

use egui::{RichText, Ui, Vec2};

use super::PanelCtx;
use crate::sim::performance::{CoreTier, PerformanceMonitor};
use crate::ui::components::section::{page_header, section_frame, section_header, stat};
use crate::ui::components::ResourceBar;
use crate::ui::theme::{Icons, Theme};

pub struct PerformancePanel {
    monitor: PerformanceMonitor,
}

impl PerformancePanel {
    pub fn new(now: Instant) -> Self {
        Self {
            monitor: PerformanceMonitor::new(now),
        }
    }

    pub fn poll(&mut self, cx: &mut PanelCtx) {
        self.monitor.poll(cx.now, cx.state.rng());
    }

    pub fn show(&mut self, ui: &mut Ui) {
        page_header(ui, "Performance Lab", "Real-time load across the SoC");

        let cpu: Vec<u8> = self.monitor.cpu.iter().map(|s| s.value).collect();
        let ram: Vec<u8> = self.monitor.ram.iter().map(|s| s.value).collect();

        ui.columns(2, |cols| {
            chart(&mut cols[0], "CPU LOAD", self.monitor.latest_cpu(), &cpu, Theme::PRIMARY);
            chart(&mut cols[1], "MEMORY", self.monitor.latest_ram(), &ram, Theme::ROOT);
        });

        section_header(ui, Icons::CPU, "Core Cluster");
        section_frame(ui, |ui| {
            egui::Grid::new("core_grid")
                .num_columns(5)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    for core in &self.monitor.cores {
                        let color = match core.tier {
                            CoreTier::Prime => Theme::ROOT,
                            CoreTier::Gold => Theme::WARNING,
                            CoreTier::Silver => Theme::TEXT_SECONDARY,
                        };
                        ui.label(RichText::new(format!("CPU{}", core.id)).monospace().strong());
                        ui.label(RichText::new(core.tier.label()).small().color(color));
                        ui.label(RichText::new(core.arch).color(Theme::TEXT_MUTED));
                        ui.label(RichText::new(format!("{:.2} GHz", core.clock)).monospace());
                        ResourceBar::horizontal(ui, core.load as f32 / 100.0, "Load", 180.0, true);
                        ui.end_row();
                    }
                });
        });
    }
}

fn chart(ui: &mut Ui, title: &str, latest: Option<u8>, values: &[u8], color: egui::Color32) {
    section_frame(ui, |ui| {
        let current = latest.map_or("--".to_string(), |v| format!("{}%", v));
        stat(ui, title, &current, color);
        ui.add_space(6.0);
        let width = ui.available_width();
        ResourceBar::sparkline(ui, values, color, Vec2::new(width, 120.0));
    });
}
