//! Application theming
//!
//! A theme is five color roles. Persisted themes travel as a plain
//! color table (see `app_core::config`); this module converts between
//! that table and egui visuals.

use egui::{Color32, Visuals};
use std::collections::BTreeMap;

/// Application theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color32,
    pub text: Color32,
    pub selected_bg: Color32,
    pub hover_bg: Color32,
    pub tooltip_bg: Color32,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            text: Color32::from_rgb(0xdd, 0xdd, 0xdd),
            selected_bg: Color32::from_rgb(0x00, 0x7a, 0xcc),
            hover_bg: Color32::from_rgb(0x09, 0x47, 0x71),
            tooltip_bg: Color32::from_rgb(0x33, 0x33, 0x33),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(0xf0, 0xf0, 0xf0),
            text: Color32::from_rgb(0x20, 0x20, 0x20),
            selected_bg: Color32::from_rgb(0x00, 0x7a, 0xcc),
            hover_bg: Color32::from_rgb(0xcc, 0xe4, 0xf7),
            tooltip_bg: Color32::from_rgb(0xee, 0xee, 0xee),
        }
    }

    /// Build a theme from a persisted color table.
    ///
    /// Key presence is validated at settings load; an individually
    /// unparseable color falls back to the dark theme's value for that
    /// role.
    pub fn from_colors(colors: &BTreeMap<String, String>) -> Self {
        let fallback = Self::dark();
        let pick = |role: &str, default: Color32| {
            colors
                .get(role)
                .and_then(|hex| Self::parse_color(hex))
                .unwrap_or(default)
        };

        Self {
            background: pick("background", fallback.background),
            text: pick("text", fallback.text),
            selected_bg: pick("selected_bg", fallback.selected_bg),
            hover_bg: pick("hover_bg", fallback.hover_bg),
            tooltip_bg: pick("tooltip_bg", fallback.tooltip_bg),
        }
    }

    /// The persisted form of this theme.
    pub fn to_colors(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("background".to_string(), Self::format_color(self.background)),
            ("text".to_string(), Self::format_color(self.text)),
            ("selected_bg".to_string(), Self::format_color(self.selected_bg)),
            ("hover_bg".to_string(), Self::format_color(self.hover_bg)),
            ("tooltip_bg".to_string(), Self::format_color(self.tooltip_bg)),
        ])
    }

    /// Apply theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = if is_dark(self.background) {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.tooltip_bg;
        visuals.extreme_bg_color = self.background;
        visuals.faint_bg_color = self.hover_bg;

        visuals.widgets.noninteractive.bg_fill = self.background;
        visuals.widgets.noninteractive.fg_stroke.color = self.text;

        visuals.widgets.inactive.fg_stroke.color = self.text;

        visuals.widgets.hovered.bg_fill = self.hover_bg;
        visuals.widgets.hovered.weak_bg_fill = self.hover_bg;
        visuals.widgets.hovered.fg_stroke.color = self.text;

        visuals.widgets.active.bg_fill = self.selected_bg;
        visuals.widgets.active.fg_stroke.color = self.text;

        visuals.selection.bg_fill = self.selected_bg;
        visuals.selection.stroke.color = self.text;

        style.visuals = visuals;
        ctx.set_style(style);
    }

    /// Parse a "#rrggbb" or "#aarrggbb" color string.
    pub fn parse_color(hex: &str) -> Option<Color32> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        } else if hex.len() == 8 {
            let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Color32::from_rgba_unmultiplied(r, g, b, a))
        } else {
            None
        }
    }

    /// Format a color as "#rrggbb".
    pub fn format_color(color: Color32) -> String {
        format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

fn is_dark(color: Color32) -> bool {
    // Perceived luminance, good enough to pick the egui base visuals
    let luma =
        0.299 * color.r() as f32 + 0.587 * color.g() as f32 + 0.114 * color.b() as f32;
    luma < 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(
            Theme::parse_color("#007acc"),
            Some(Color32::from_rgb(0x00, 0x7a, 0xcc))
        );
        assert_eq!(
            Theme::parse_color("1e1e1e"),
            Some(Color32::from_rgb(0x1e, 0x1e, 0x1e))
        );
        assert_eq!(Theme::parse_color("#xyz"), None);
        assert_eq!(Theme::parse_color(""), None);
    }

    #[test]
    fn test_color_table_round_trip() {
        let theme = Theme::light();
        let table = theme.to_colors();
        assert_eq!(Theme::from_colors(&table), theme);
    }

    #[test]
    fn test_matches_default_settings_theme() {
        // The dark theme and the settings-layer default table must agree,
        // otherwise a fresh profile renders differently after its first
        // save/load cycle.
        let table = app_core::config::default_theme();
        assert_eq!(Theme::from_colors(&table), Theme::dark());
        assert_eq!(Theme::dark().to_colors(), table);
    }

    #[test]
    fn test_unparseable_color_falls_back() {
        let mut table = Theme::dark().to_colors();
        table.insert("text".to_string(), "not-a-color".to_string());

        let theme = Theme::from_colors(&table);
        assert_eq!(theme.text, Theme::dark().text);
        assert_eq!(theme.background, Theme::dark().background);
    }
}
