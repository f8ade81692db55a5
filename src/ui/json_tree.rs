//! Read-only, collapsible view of an arbitrary JSON value.

use eframe::egui;
use egui::{Color32, RichText};
use serde_json::Value;
use std::hash::Hash;

use crate::ui::settings::TreeTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    pub show_types: bool,
    pub enable_clipboard: bool,
    pub theme: TreeTheme,
}

impl TreeOptions {
    /// Payload and before/after snapshots.
    pub fn compact(theme: TreeTheme) -> Self {
        Self {
            show_types: false,
            enable_clipboard: false,
            theme,
        }
    }

    /// Memory inspection.
    pub fn inspector(theme: TreeTheme) -> Self {
        Self {
            show_types: true,
            enable_clipboard: true,
            theme,
        }
    }
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        Value::Array(items) => format!("[{}]", items.len()),
        Value::Object(map) => format!("{{{}}}", map.len()),
        other => other.to_string(),
    }
}

fn leaf_color(value: &Value, theme: TreeTheme) -> Color32 {
    let light = theme == TreeTheme::Light;
    match value {
        Value::String(_) if light => Color32::from_rgb(163, 21, 21),
        Value::String(_) => Color32::from_rgb(206, 145, 120),
        Value::Number(_) if light => Color32::from_rgb(9, 134, 88),
        Value::Number(_) => Color32::from_rgb(181, 206, 168),
        Value::Bool(_) | Value::Null if light => Color32::from_rgb(0, 0, 255),
        Value::Bool(_) | Value::Null => Color32::from_rgb(86, 156, 214),
        _ if light => Color32::BLACK,
        _ => Color32::WHITE,
    }
}

fn key_color(theme: TreeTheme) -> Color32 {
    match theme {
        TreeTheme::Light => Color32::from_rgb(70, 40, 120),
        TreeTheme::Dark => Color32::from_rgb(156, 220, 254),
    }
}

fn background(theme: TreeTheme) -> Color32 {
    match theme {
        TreeTheme::Light => Color32::from_rgb(250, 250, 250),
        TreeTheme::Dark => Color32::from_rgb(30, 30, 30),
    }
}

pub fn show_json_tree(ui: &mut egui::Ui, id_salt: impl Hash, value: &Value, opts: TreeOptions) {
    let id = ui.make_persistent_id(id_salt);

    egui::Frame::new()
        .fill(background(opts.theme))
        .corner_radius(4.0)
        .inner_margin(6.0)
        .show(ui, |ui| {
            if opts.enable_clipboard {
                if let Ok(pretty) = serde_json::to_string_pretty(value) {
                    if ui.small_button("📋 Copy JSON").clicked() {
                        ui.ctx().copy_text(pretty);
                    }
                }
            }

            // The root itself gets no row of its own.
            match value {
                Value::Object(map) => {
                    for (k, v) in map {
                        show_node(ui, id.with(k), k, v, opts, 0);
                    }
                }
                Value::Array(items) => {
                    for (i, v) in items.iter().enumerate() {
                        show_node(ui, id.with(i), &i.to_string(), v, opts, 0);
                    }
                }
                leaf => show_leaf(ui, None, leaf, opts),
            }
        });
}

fn show_node(
    ui: &mut egui::Ui,
    id: egui::Id,
    key: &str,
    value: &Value,
    opts: TreeOptions,
    depth: usize,
) {
    let children: Vec<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => {
            show_leaf(ui, Some(key), value, opts);
            return;
        }
    };

    let mut header = format!("{key}: {}", leaf_text(value));
    if opts.show_types {
        header.push_str(&format!("  {}", type_name(value)));
    }

    egui::CollapsingHeader::new(RichText::new(header).color(key_color(opts.theme)))
        .id_salt(id)
        .default_open(depth < 2)
        .show(ui, |ui| {
            for (k, v) in &children {
                show_node(ui, id.with(k), k, v, opts, depth + 1);
            }
        });
}

fn show_leaf(ui: &mut egui::Ui, key: Option<&str>, value: &Value, opts: TreeOptions) {
    ui.horizontal_wrapped(|ui| {
        if let Some(key) = key {
            ui.label(RichText::new(format!("{key}:")).color(key_color(opts.theme)));
        }
        ui.label(
            RichText::new(leaf_text(value))
                .monospace()
                .color(leaf_color(value, opts.theme)),
        );
        if opts.show_types {
            ui.label(RichText::new(type_name(value)).small().weak());
        }
        if opts.enable_clipboard && ui.small_button("📋").on_hover_text("Copy").clicked() {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            ui.ctx().copy_text(text);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(3)), "int");
        assert_eq!(type_name(&json!(1.5)), "float");
        assert_eq!(type_name(&json!("x")), "string");
        assert_eq!(type_name(&json!([1])), "array");
        assert_eq!(type_name(&json!({})), "object");
    }

    #[test]
    fn leaves_render_like_json() {
        assert_eq!(leaf_text(&json!("15°C")), "\"15°C\"");
        assert_eq!(leaf_text(&json!(true)), "true");
        assert_eq!(leaf_text(&json!(null)), "null");
    }

    #[test]
    fn containers_render_their_size() {
        assert_eq!(leaf_text(&json!({ "a": 1, "b": 2 })), "{2}");
        assert_eq!(leaf_text(&json!([1, 2, 3])), "[3]");
    }

    #[test]
    fn option_presets() {
        let c = TreeOptions::compact(TreeTheme::Light);
        assert!(!c.show_types && !c.enable_clipboard);
        let i = TreeOptions::inspector(TreeTheme::Dark);
        assert!(i.show_types && i.enable_clipboard);
    }
}
