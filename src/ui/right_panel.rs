use eframe::egui;
use egui::RichText;
use serde_json::Value;

use crate::engine::projection::{StepPanel, ViewState, NO_DATA, NO_MEMORY_DATA};
use crate::engine::protocol::VisualiserCommand;
use crate::model::trace::Trace;
use crate::ui::json_tree::{show_json_tree, TreeOptions};
use crate::ui::settings::UiSettings;

pub fn draw_right_panel(
    ctx: &egui::Context,
    trace: &Trace,
    view: &ViewState<'_>,
    settings: &UiSettings,
) -> Option<VisualiserCommand> {
    let mut command = None;

    egui::SidePanel::right("right")
        .resizable(true)
        .default_width(380.0)
        .min_width(280.0)
        .show(ctx, |ui| {
            ui.heading(&trace.title);

            ui.horizontal(|ui| {
                if ui.button("◀ Prev").clicked() {
                    command = Some(VisualiserCommand::Retreat);
                }
                if ui.button("Next ▶").clicked() {
                    command = Some(VisualiserCommand::Advance);
                }
            });

            ui.label(
                RichText::new(format!("Step {}/{}:", view.index + 1, view.len)).strong(),
            );
            ui.label(view.description);
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                draw_step_panel(ui, view, settings);

                if let Some(memory) = &view.memory {
                    ui.separator();
                    ui.heading(format!(
                        "Memory: {} (Click)",
                        memory_title(trace, &memory.participant_id)
                    ));
                    format_line(ui, memory.is_structured_format);

                    match &memory.data {
                        Some(data) if memory.has_specific_data() => show_json_tree(
                            ui,
                            ("memory", view.index, &memory.participant_id),
                            data,
                            TreeOptions::inspector(settings.tree_theme),
                        ),
                        _ => {
                            ui.label(RichText::new(NO_MEMORY_DATA).italics().weak());
                            if let Some(status) = memory.status() {
                                ui.label(format!("Status: {status}"));
                            }
                        }
                    }

                    if ui.button("Close").clicked() {
                        command = Some(VisualiserCommand::CloseInspection);
                    }
                }
            });
        });

    command
}

/// `Backend App (backend)` for known ids, the bare id otherwise.
pub fn memory_title(trace: &Trace, participant_id: &str) -> String {
    match trace.participant(participant_id) {
        Some(p) => format!("{} ({})", p.label, p.id),
        None => participant_id.to_string(),
    }
}

fn draw_step_panel(ui: &mut egui::Ui, view: &ViewState<'_>, settings: &UiSettings) {
    let opts = TreeOptions::compact(settings.tree_theme);

    match &view.panel {
        StepPanel::Idle { message } => {
            ui.label(*message);
        }

        StepPanel::Action {
            actor_id,
            change_description,
            is_structured_update,
            before,
            after,
        } => {
            ui.heading(format!("Action: {actor_id}"));
            ui.horizontal_wrapped(|ui| {
                ui.label(*change_description);
                if *is_structured_update {
                    ui.label(RichText::new("(MCP Update)").strong());
                }
            });

            ui.columns(2, |cols| {
                snapshot(&mut cols[0], "Before", ("before", view.index), *before, opts);
                snapshot(&mut cols[1], "After", ("after", view.index), *after, opts);
            });
        }

        StepPanel::Transport {
            source_id,
            target_id,
            is_structured_format,
            payload,
        } => {
            ui.heading(format!("Transport: {source_id} → {target_id}"));
            format_line(ui, *is_structured_format);
            snapshot(ui, "Payload", ("payload", view.index), *payload, opts);
        }
    }
}

fn snapshot(
    ui: &mut egui::Ui,
    label: &str,
    id_salt: (&str, usize),
    value: Option<&Value>,
    opts: TreeOptions,
) {
    ui.label(RichText::new(label).strong());
    match value {
        Some(v) => show_json_tree(ui, id_salt, v, opts),
        None => {
            ui.label(RichText::new(NO_DATA).italics().weak());
        }
    }
}

fn format_line(ui: &mut egui::Ui, structured: bool) {
    ui.horizontal(|ui| {
        ui.label("Format:");
        if structured {
            ui.label(RichText::new("MCP").strong());
        } else {
            ui.label("Other/Raw");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_title_uses_participant_label() {
        let trace = Trace::builtin().unwrap();
        assert_eq!(memory_title(&trace, "backend"), "Backend App (backend)");
        assert_eq!(memory_title(&trace, "get_weather_tool"), "Tool: get_weather (get_weather_tool)");
    }

    #[test]
    fn memory_title_falls_back_to_id() {
        let trace = Trace::builtin().unwrap();
        assert_eq!(memory_title(&trace, "ghost"), "ghost");
    }
}
