use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeTheme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,
    pub tree_theme: TreeTheme,
    pub animate_edges: bool,

    // Highlight class → color mapping
    pub highlight_colors: HashMap<String, [u8; 4]>,
}

pub const ACTION_COLOR: &str = "action";
pub const TRANSPORT_COLOR: &str = "transport";
pub const ACTIVE_EDGE_COLOR: &str = "active_edge";
pub const IDLE_COLOR: &str = "idle";

impl Default for UiSettings {
    fn default() -> Self {
        let mut highlight_colors = HashMap::new();

        highlight_colors.insert(ACTION_COLOR.into(), [46, 160, 67, 255]);
        highlight_colors.insert(TRANSPORT_COLOR.into(), [56, 120, 220, 255]);
        highlight_colors.insert(ACTIVE_EDGE_COLOR.into(), [220, 80, 140, 255]);
        highlight_colors.insert(IDLE_COLOR.into(), [140, 140, 140, 255]);

        Self {
            ui_scale: 1.0,
            tree_theme: TreeTheme::Light,
            animate_edges: true,
            highlight_colors,
        }
    }
}

impl UiSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.highlight_colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::GRAY)
    }

    pub fn set_color(&mut self, key: &str, color: Color32) {
        self.highlight_colors.insert(
            key.to_string(),
            [color.r(), color.g(), color.b(), color.a()],
        );
    }

    pub fn clamped_scale(&self) -> f32 {
        self.ui_scale.clamp(0.75, 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_color_key_is_gray() {
        assert_eq!(UiSettings::default().color("nope"), Color32::GRAY);
    }

    #[test]
    fn set_color_round_trips() {
        let mut s = UiSettings::default();
        s.set_color(ACTION_COLOR, Color32::from_rgb(1, 2, 3));
        assert_eq!(s.color(ACTION_COLOR), Color32::from_rgb(1, 2, 3));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let s: UiSettings = serde_json::from_str(r#"{ "ui_scale": 1.5 }"#).unwrap();
        assert_eq!(s.ui_scale, 1.5);
        assert!(s.animate_edges);
        assert_eq!(s.tree_theme, TreeTheme::Light);
        assert!(s.highlight_colors.contains_key(TRANSPORT_COLOR));
    }

    #[test]
    fn scale_is_clamped() {
        let s = UiSettings {
            ui_scale: 9.0,
            ..Default::default()
        };
        assert_eq!(s.clamped_scale(), 2.0);
    }
}
