use eframe::egui;
use tracing::{error, info};

use crate::engine::engine::Engine;
use crate::engine::protocol::VisualiserCommand;
use crate::model::trace::Trace;
use crate::ui::diagram::{draw_diagram, DiagramCamera};
use crate::ui::left_panel::draw_left_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::save_settings;

/* =========================
   Tabs & actions
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftTab {
    #[default]
    Steps,
    Settings,
}

/// What a panel asks for after drawing. Most of it goes to the engine,
/// trace switching is handled by the app itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Command(VisualiserCommand),
    OpenTrace,
    LoadBuiltin,
}

impl From<VisualiserCommand> for PanelAction {
    fn from(cmd: VisualiserCommand) -> Self {
        PanelAction::Command(cmd)
    }
}

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub left_tab: LeftTab,
    pub settings: UiSettings,
    pub settings_dirty: bool,
    pub follow_current: bool,
    pub status: Option<String>,
    pub camera: DiagramCamera,
}

/* =========================
   App
   ========================= */

pub struct VisualiserApp {
    engine: Engine,
    ui: UiState,
}

impl VisualiserApp {
    pub fn new(trace: Trace, start_step: usize, settings: UiSettings) -> Self {
        let mut engine = Engine::new(trace);
        if start_step > 0 {
            engine.handle(VisualiserCommand::JumpTo(start_step));
        }

        Self {
            engine,
            ui: UiState {
                settings,
                follow_current: true,
                ..Default::default()
            },
        }
    }

    fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::Command(cmd) => {
                let moved = matches!(
                    cmd,
                    VisualiserCommand::Advance
                        | VisualiserCommand::Retreat
                        | VisualiserCommand::JumpTo(_)
                );
                if self.engine.handle(cmd) && moved {
                    self.ui.follow_current = true;
                }
            }
            PanelAction::OpenTrace => self.open_trace(),
            PanelAction::LoadBuiltin => match Trace::builtin() {
                Ok(trace) => self.switch_trace(trace, "built-in trace".into()),
                Err(e) => self.report(format!("Built-in trace is broken: {e}")),
            },
        }
    }

    fn open_trace(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Trace", &["json"])
            .pick_file()
        else {
            return;
        };

        match Trace::load(&path) {
            Ok(trace) => self.switch_trace(trace, path.display().to_string()),
            Err(e) => self.report(format!("Could not load {}: {e}", path.display())),
        }
    }

    fn switch_trace(&mut self, trace: Trace, source: String) {
        self.engine.replace_trace(trace);
        self.ui.camera.fit();
        self.ui.follow_current = true;
        self.ui.status = Some(format!("Loaded {source}"));
    }

    fn report(&mut self, message: String) {
        error!("{message}");
        self.ui.status = Some(message);
    }

    /// Global shortcuts. A focused widget owns the keyboard: Space already
    /// clicks a focused button and arrows already move a focused slider.
    fn keyboard_command(ctx: &egui::Context) -> Option<VisualiserCommand> {
        if ctx.memory(|m| m.focused().is_some()) {
            return None;
        }

        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space) {
                Some(VisualiserCommand::Advance)
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                Some(VisualiserCommand::Retreat)
            } else if i.key_pressed(egui::Key::Escape) {
                Some(VisualiserCommand::CloseInspection)
            } else {
                None
            }
        })
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for VisualiserApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        let scale = self.ui.settings.clamped_scale();
        if ctx.pixels_per_point() != scale {
            ctx.set_pixels_per_point(scale);
        }

        self.show(ctx);
    }
}

impl VisualiserApp {
    /// One frame: draw every panel, then apply what they asked for.
    fn show(&mut self, ctx: &egui::Context) {
        let mut actions: Vec<PanelAction> = Vec::new();
        if let Some(cmd) = Self::keyboard_command(ctx) {
            actions.push(cmd.into());
        }

        if let Some(view) = self.engine.view() {
            let trace = self.engine.trace();

            /* LEFT PANEL */
            actions.extend(draw_left_panel(ctx, &mut self.ui, trace, view.index));

            /* RIGHT PANEL */
            actions.extend(
                draw_right_panel(ctx, trace, &view, &self.ui.settings).map(PanelAction::from),
            );

            /* STATUS BAR */
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("←/→ step · click a node to inspect · Esc closes · drag to pan, scroll to zoom")
                            .weak(),
                    );
                    if let Some(status) = &self.ui.status {
                        ui.separator();
                        ui.label(status);
                    }
                });
            });

            /* CENTER */
            egui::CentralPanel::default().show(ctx, |ui| {
                let selected = view.memory.as_ref().map(|m| m.participant_id.as_str());
                actions.extend(
                    draw_diagram(
                        ui,
                        &view.nodes,
                        &view.edges,
                        selected,
                        &mut self.ui.camera,
                        &self.ui.settings,
                    )
                    .map(PanelAction::from),
                );
            });
        }

        for action in actions {
            self.apply(action);
        }

        if self.ui.settings_dirty && !ctx.input(|i| i.pointer.any_down()) {
            save_settings(&self.ui.settings);
            info!("saved ui settings");
            self.ui.settings_dirty = false;
        }
    }
}
