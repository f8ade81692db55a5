use eframe::egui;
use egui::RichText;

use crate::engine::protocol::VisualiserCommand;
use crate::model::step::StepKind;
use crate::model::trace::Trace;
use crate::ui::app::{LeftTab, PanelAction, UiState};
use crate::ui::settings::{TreeTheme, ACTION_COLOR, ACTIVE_EDGE_COLOR, TRANSPORT_COLOR};

pub fn draw_left_panel(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    trace: &Trace,
    current: usize,
) -> Option<PanelAction> {
    let mut action = None;

    egui::SidePanel::left("left")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut ui_state.left_tab, LeftTab::Steps, "Steps");
                ui.selectable_value(&mut ui_state.left_tab, LeftTab::Settings, "Settings");
            });

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match ui_state.left_tab {
                LeftTab::Steps => {
                    let follow = std::mem::take(&mut ui_state.follow_current);
                    if let Some(index) = draw_steps(ui, trace, current, follow) {
                        action = Some(PanelAction::Command(VisualiserCommand::JumpTo(index)));
                    }
                }
                LeftTab::Settings => action = draw_settings(ui, ui_state),
            });
        });

    action
}

/* =========================
   Timeline
   ========================= */

fn draw_steps(ui: &mut egui::Ui, trace: &Trace, current: usize, follow: bool) -> Option<usize> {
    let mut clicked = None;

    for step in &trace.steps {
        let badge = match step.kind {
            StepKind::Info => "ℹ",
            StepKind::Action(_) => "⚡",
            StepKind::Transport(_) => "➡",
        };
        let text = format!("{:>2}. {} {}", step.index + 1, badge, step.description);

        let response = ui.selectable_label(step.index == current, text);
        if follow && step.index == current {
            response.scroll_to_me(None);
        }
        if response.clicked() {
            clicked = Some(step.index);
        }
    }

    clicked
}

/* =========================
   Settings
   ========================= */

fn draw_settings(ui: &mut egui::Ui, state: &mut UiState) -> Option<PanelAction> {
    let mut action = None;
    let before = state.settings.clone();
    let s = &mut state.settings;

    ui.label("UI Scale");
    ui.add(egui::Slider::new(&mut s.ui_scale, 0.75..=2.0));

    ui.separator();
    ui.label("JSON theme");
    ui.horizontal(|ui| {
        ui.radio_value(&mut s.tree_theme, TreeTheme::Light, "Light");
        ui.radio_value(&mut s.tree_theme, TreeTheme::Dark, "Dark");
    });

    ui.checkbox(&mut s.animate_edges, "Animate active edges");

    ui.separator();
    ui.collapsing("Highlight colors", |ui| {
        for (key, label) in [
            (ACTION_COLOR, "Action"),
            (TRANSPORT_COLOR, "Transport"),
            (ACTIVE_EDGE_COLOR, "Active edge"),
        ] {
            ui.horizontal(|ui| {
                let mut color = s.color(key);
                if ui.color_edit_button_srgba(&mut color).changed() {
                    s.set_color(key, color);
                }
                ui.label(label);
            });
        }
    });

    ui.separator();
    ui.label(RichText::new("Trace").strong());
    ui.horizontal(|ui| {
        if ui.button("Open trace…").clicked() {
            action = Some(PanelAction::OpenTrace);
        }
        if ui.button("Built-in").clicked() {
            action = Some(PanelAction::LoadBuiltin);
        }
    });

    if state.settings != before {
        state.settings_dirty = true;
    }

    action
}
