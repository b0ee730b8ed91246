//! Theme and styling for the console

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::core::{BugSeverity, DeviceStatus, LogLevel};
use crate::sim::Severity;

/// Console color palette
pub struct Theme;

impl Theme {
    // Accent - link blue
    pub const PRIMARY: Color32 = Color32::from_rgb(37, 99, 235); // Blue-600
    pub const PRIMARY_LIGHT: Color32 = Color32::from_rgb(96, 165, 250); // Blue-400
    pub const PRIMARY_DARK: Color32 = Color32::from_rgb(29, 78, 216); // Blue-700

    // Status
    pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129); // Emerald-500
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11); // Amber-500
    pub const ERROR: Color32 = Color32::from_rgb(244, 63, 94); // Rose-500
    pub const INFO: Color32 = Color32::from_rgb(6, 182, 212); // Cyan-500
    pub const ROOT: Color32 = Color32::from_rgb(168, 85, 247); // Purple-500

    // Slate surfaces (dark theme)
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(2, 6, 23); // Slate-950
    pub const BG_SECONDARY: Color32 = Color32::from_rgb(15, 23, 42); // Slate-900
    pub const BG_TERTIARY: Color32 = Color32::from_rgb(30, 41, 59); // Slate-800
    pub const BG_HOVER: Color32 = Color32::from_rgb(51, 65, 85); // Slate-700
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(20, 30, 50);
    pub const BG_CONSOLE: Color32 = Color32::from_rgb(0, 0, 0);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(241, 245, 249); // Slate-100
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184); // Slate-400
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 116, 139); // Slate-500
    pub const TEXT_CONSOLE: Color32 = Color32::from_rgb(74, 222, 128); // Green-400

    pub const BORDER: Color32 = Color32::from_rgb(51, 65, 85);
    pub const BORDER_LIGHT: Color32 = Color32::from_rgb(30, 41, 59);

    pub fn apply(ctx: &egui::Context, theme: crate::core::settings::Theme) {
        match theme {
            crate::core::settings::Theme::Dark => Self::apply_dark(ctx),
            crate::core::settings::Theme::Light => Self::apply_light(ctx),
        }
    }

    /// Apply dark theme to egui
    pub fn apply_dark(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = Visuals::dark();

        visuals.panel_fill = Self::BG_PRIMARY;
        visuals.window_fill = Self::BG_ELEVATED;
        visuals.extreme_bg_color = Self::BG_PRIMARY;
        visuals.faint_bg_color = Self::BG_TERTIARY;

        visuals.widgets.noninteractive.bg_fill = Self::BG_SECONDARY;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.5, Self::BORDER_LIGHT);

        visuals.widgets.inactive.bg_fill = Self::BG_TERTIARY;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.bg_stroke = Stroke::new(0.5, Self::BORDER);

        visuals.widgets.hovered.bg_fill = Self::BG_HOVER;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.6));
        visuals.widgets.hovered.expansion = 1.0;

        visuals.widgets.active.bg_fill = Self::PRIMARY;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, Self::PRIMARY_DARK);

        visuals.widgets.open.bg_fill = Self::BG_ELEVATED;
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.open.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.5));

        visuals.selection.bg_fill = Self::PRIMARY.linear_multiply(0.25);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY);

        visuals.window_stroke = Stroke::new(0.5, Self::BORDER);
        visuals.window_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 10.0),
            blur: 30.0,
            spread: 8.0,
            color: Color32::from_black_alpha(140),
        };
        visuals.popup_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 6.0),
            blur: 16.0,
            spread: 4.0,
            color: Color32::from_black_alpha(100),
        };

        Self::finish(&mut style, visuals);
        ctx.set_style(style);
    }

    /// Apply light theme to egui
    pub fn apply_light(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = Visuals::light();

        let bg_primary = Color32::from_rgb(248, 250, 252); // Slate-50
        let bg_secondary = Color32::from_rgb(241, 245, 249); // Slate-100
        let bg_tertiary = Color32::from_rgb(226, 232, 240); // Slate-200
        let bg_hover = Color32::from_rgb(203, 213, 225); // Slate-300
        let text_primary = Color32::from_rgb(15, 23, 42); // Slate-900
        let text_secondary = Color32::from_rgb(71, 85, 105); // Slate-600
        let border = Color32::from_rgb(203, 213, 225);

        visuals.panel_fill = bg_primary;
        visuals.window_fill = Color32::WHITE;
        visuals.extreme_bg_color = Color32::WHITE;
        visuals.faint_bg_color = bg_secondary;

        visuals.widgets.noninteractive.bg_fill = bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.5, border);

        visuals.widgets.inactive.bg_fill = bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_secondary);
        visuals.widgets.inactive.bg_stroke = Stroke::new(0.5, border);

        visuals.widgets.hovered.bg_fill = bg_hover;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.7));
        visuals.widgets.hovered.expansion = 1.0;

        visuals.widgets.active.bg_fill = Self::PRIMARY;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, Self::PRIMARY_DARK);

        visuals.widgets.open.bg_fill = Color32::WHITE;
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.open.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.6));

        visuals.selection.bg_fill = Self::PRIMARY.linear_multiply(0.15);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY);

        visuals.window_stroke = Stroke::new(0.5, border);
        visuals.window_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 8.0),
            blur: 24.0,
            spread: 4.0,
            color: Color32::from_black_alpha(20),
        };
        visuals.popup_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 4.0),
            blur: 12.0,
            spread: 2.0,
            color: Color32::from_black_alpha(15),
        };

        Self::finish(&mut style, visuals);
        ctx.set_style(style);
    }

    /// Rounding, fonts and spacing shared by both themes
    fn finish(style: &mut Style, mut visuals: Visuals) {
        let widgets = &mut visuals.widgets;
        for state in [
            &mut widgets.noninteractive,
            &mut widgets.inactive,
            &mut widgets.hovered,
            &mut widgets.active,
            &mut widgets.open,
        ] {
            state.rounding = Rounding::same(6.0);
        }
        visuals.window_rounding = Rounding::same(12.0);
        visuals.menu_rounding = Rounding::same(8.0);
        visuals.striped = true;
        style.visuals = visuals;

        style.text_styles = [
            (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
        ]
        .into();

        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.window_margin = egui::Margin::same(16.0);
        style.spacing.button_padding = egui::vec2(14.0, 8.0);
        style.spacing.indent = 20.0;
        style.spacing.slider_width = 160.0;
        style.spacing.combo_width = 120.0;
        style.spacing.icon_width = 18.0;
        style.spacing.icon_spacing = 6.0;
        style.interaction.tooltip_delay = 0.3;
    }

    pub fn status_color(status: DeviceStatus) -> Color32 {
        match status {
            DeviceStatus::Connected => Self::SUCCESS,
            DeviceStatus::Connecting => Self::WARNING,
            DeviceStatus::Disconnected => Self::TEXT_MUTED,
            DeviceStatus::Error => Self::ERROR,
        }
    }

    pub fn severity_color(severity: Severity) -> Color32 {
        match severity {
            Severity::Low => Self::INFO,
            Severity::Medium => Self::WARNING,
            Severity::High => Self::ERROR,
            Severity::Critical => Self::ROOT,
        }
    }

    pub fn bug_color(severity: BugSeverity) -> Color32 {
        match severity {
            BugSeverity::Low => Self::INFO,
            BugSeverity::Medium => Self::WARNING,
            BugSeverity::High => Self::ERROR,
        }
    }

    pub fn log_color(level: LogLevel) -> Color32 {
        match level {
            LogLevel::Info => Self::PRIMARY_LIGHT,
            LogLevel::Success => Self::SUCCESS,
            LogLevel::Warning => Self::WARNING,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Icon characters (Unicode symbols)
pub struct Icons;

impl Icons {
    pub const PHONE: &'static str = "📱";
    pub const CARD: &'static str = "💳";
    pub const VAULT: &'static str = "🔖";
    pub const COMMS: &'static str = "💬";
    pub const FOLDER: &'static str = "📁";
    pub const FILE: &'static str = "📄";
    pub const APP: &'static str = "📦";
    pub const SHIELD: &'static str = "🛡";
    pub const PIN: &'static str = "📍";
    pub const PULSE: &'static str = "📈";
    pub const CHART: &'static str = "📊";
    pub const LAYERS: &'static str = "▤";
    pub const WRENCH: &'static str = "🔧";
    pub const TERMINAL: &'static str = "⌨";
    pub const KEY: &'static str = "🔑";
    pub const AUDIT: &'static str = "🔍";
    pub const ZAP: &'static str = "⚡";
    pub const CPU: &'static str = "🖥";
    pub const ALERT: &'static str = "⚠";
    pub const USERS: &'static str = "👥";
    pub const HISTORY: &'static str = "📜";
    pub const SETTINGS: &'static str = "⚙";
    pub const LOCK: &'static str = "🔒";
    pub const CLOUD: &'static str = "☁";
    pub const LINK: &'static str = "🔗";
    pub const SUCCESS: &'static str = "✓";
    pub const CLOSE: &'static str = "✕";
    pub const INFO: &'static str = "ℹ";
    pub const SEARCH: &'static str = "⌕";
    pub const EYE: &'static str = "👁";
    pub const TRASH: &'static str = "🗑";
    pub const EXPORT: &'static str = "📤";
}
