//! Node-and-edge diagram drawn straight onto an egui painter.

use eframe::egui;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::engine::projection::{EdgeView, NodeHighlight, NodeView};
use crate::engine::protocol::VisualiserCommand;
use crate::model::participant::{HandleSide, Participant, ParticipantKind};
use crate::ui::settings::{UiSettings, ACTION_COLOR, ACTIVE_EDGE_COLOR, IDLE_COLOR, TRANSPORT_COLOR};

/// Node footprint in trace coordinates.
pub const NODE_SIZE: Vec2 = vec2(150.0, 44.0);
const PADDING: f32 = 40.0;
const PARALLEL_GAP: f32 = 5.0;

/* =========================
   Camera
   ========================= */

/// User zoom and pan on top of the fitted layout. Zoom is about the
/// center of the panel, pan is in screen points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramCamera {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for DiagramCamera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl DiagramCamera {
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 3.0;

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn is_fitted(&self) -> bool {
        *self == Self::default()
    }

    pub fn fit(&mut self) {
        *self = Self::default();
    }
}

/* =========================
   Layout
   ========================= */

/// Maps trace coordinates into a screen rect, keeping aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramLayout {
    trace_min: Pos2,
    screen_min: Pos2,
    scale: f32,
}

impl DiagramLayout {
    pub fn fit(participants: &[Participant], area: Rect, camera: &DiagramCamera) -> Self {
        let mut min = pos2(f32::INFINITY, f32::INFINITY);
        let mut max = pos2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in participants {
            let [x, y] = p.position;
            min = min.min(pos2(x, y));
            max = max.max(pos2(x, y) + NODE_SIZE);
        }
        if participants.is_empty() {
            min = Pos2::ZERO;
            max = Pos2::ZERO + NODE_SIZE;
        }

        let inner = area.shrink(PADDING);
        let span = (max - min).max(vec2(1.0, 1.0));
        let scale = (inner.width() / span.x)
            .min(inner.height() / span.y)
            .clamp(0.25, 2.0)
            * camera.zoom;

        // Center the scaled bounds inside the area.
        let used = span * scale;
        let screen_min = inner.center() - used / 2.0 + camera.pan;

        Self {
            trace_min: min,
            screen_min,
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_screen(&self, p: Pos2) -> Pos2 {
        self.screen_min + (p - self.trace_min) * self.scale
    }

    pub fn node_rect(&self, participant: &Participant) -> Rect {
        let [x, y] = participant.position;
        Rect::from_min_size(self.to_screen(pos2(x, y)), NODE_SIZE * self.scale)
    }
}

pub fn anchor(rect: Rect, side: HandleSide) -> Pos2 {
    match side {
        HandleSide::Top => rect.center_top(),
        HandleSide::Bottom => rect.center_bottom(),
        HandleSide::Left => rect.left_center(),
        HandleSide::Right => rect.right_center(),
    }
}

/// Sides facing each other, for edges with no explicit handles.
pub fn facing_sides(source: Rect, target: Rect) -> (HandleSide, HandleSide) {
    let d = target.center() - source.center();
    if d.x.abs() >= d.y.abs() {
        if d.x >= 0.0 {
            (HandleSide::Right, HandleSide::Left)
        } else {
            (HandleSide::Left, HandleSide::Right)
        }
    } else if d.y >= 0.0 {
        (HandleSide::Bottom, HandleSide::Top)
    } else {
        (HandleSide::Top, HandleSide::Bottom)
    }
}

/* =========================
   Drawing
   ========================= */

pub fn draw_diagram(
    ui: &mut egui::Ui,
    nodes: &[NodeView<'_>],
    edges: &[EdgeView<'_>],
    selected: Option<&str>,
    camera: &mut DiagramCamera,
    settings: &UiSettings,
) -> Option<VisualiserCommand> {
    ui.horizontal(|ui| {
        if ui.small_button("➖").on_hover_text("Zoom out").clicked() {
            camera.zoom_by(1.0 / 1.25);
        }
        if ui.small_button("➕").on_hover_text("Zoom in").clicked() {
            camera.zoom_by(1.25);
        }
        if ui
            .add_enabled(!camera.is_fitted(), egui::Button::new("Fit").small())
            .clicked()
        {
            camera.fit();
        }
        ui.label(egui::RichText::new(format!("{:.0}%", camera.zoom * 100.0)).weak());
    });

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
    let area = response.rect;

    if response.dragged() {
        camera.pan_by(response.drag_delta());
    }
    if response.hovered() {
        let (scroll, pinch) = ui.input(|i| (i.smooth_scroll_delta.y, i.zoom_delta()));
        let factor = pinch * (scroll * 0.002).exp();
        if factor != 1.0 {
            camera.zoom_by(factor);
        }
    }

    let participants: Vec<Participant> = nodes.iter().map(|n| n.participant.clone()).collect();
    let layout = DiagramLayout::fit(&participants, area, camera);
    let rect_of = |id: &str| {
        nodes
            .iter()
            .find(|n| n.participant.id == id)
            .map(|n| layout.node_rect(n.participant))
    };

    let time = ui.input(|i| i.time);
    let mut animating = false;

    for view in edges {
        let edge = view.edge;
        let (Some(src), Some(tgt)) = (rect_of(edge.source.as_str()), rect_of(edge.target.as_str())) else {
            continue;
        };

        let (auto_src, auto_tgt) = facing_sides(src, tgt);
        let a = anchor(src, edge.source_side().unwrap_or(auto_src));
        let b = anchor(tgt, edge.target_side().unwrap_or(auto_tgt));

        // Offset so a → b and b → a don't overlap.
        let has_reverse = edges
            .iter()
            .any(|o| o.edge.source == edge.target && o.edge.target == edge.source);
        let dir = (b - a).normalized();
        let shift = if has_reverse {
            vec2(-dir.y, dir.x) * PARALLEL_GAP * layout.scale()
        } else {
            Vec2::ZERO
        };
        let (a, b) = (a + shift, b + shift);

        let stroke = if view.active {
            Stroke::new(3.0, settings.color(ACTIVE_EDGE_COLOR))
        } else {
            Stroke::new(1.2, settings.color(IDLE_COLOR))
        };
        painter.line_segment([a, b], stroke);

        let head = 9.0 * layout.scale().max(0.6);
        let back = b - dir * head;
        let side = vec2(-dir.y, dir.x) * head * 0.5;
        painter.line_segment([b, back + side], stroke);
        painter.line_segment([b, back - side], stroke);

        if view.active && settings.animate_edges {
            let t = (time * 0.6).fract() as f32;
            painter.circle_filled(a + (b - a) * t, 4.0, stroke.color);
            animating = true;
        }
    }

    let mut command = None;

    for view in nodes {
        let p = view.participant;
        let rect = layout.node_rect(p);

        let fill = match p.kind {
            ParticipantKind::Tool => Color32::from_rgb(245, 238, 255),
            _ => Color32::WHITE,
        };
        let stroke = match view.highlight {
            NodeHighlight::Action => Stroke::new(3.0, settings.color(ACTION_COLOR)),
            NodeHighlight::Transport => Stroke::new(3.0, settings.color(TRANSPORT_COLOR)),
            NodeHighlight::None if view.is_active => Stroke::new(2.0, Color32::DARK_GRAY),
            NodeHighlight::None => Stroke::new(1.0, settings.color(IDLE_COLOR)),
        };

        painter.rect_filled(rect, 5.0, fill);
        painter.rect_stroke(rect, 5.0, stroke, StrokeKind::Outside);
        if selected == Some(p.id.as_str()) {
            painter.rect_stroke(
                rect.expand(4.0),
                7.0,
                Stroke::new(2.0, Color32::from_rgb(230, 180, 30)),
                StrokeKind::Outside,
            );
        }
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            format!("{} {}", p.kind.icon(), p.label),
            FontId::proportional(13.0 * layout.scale().clamp(0.7, 1.5)),
            Color32::BLACK,
        );

        let node = ui
            .interact(rect, ui.id().with(("node", &p.id)), Sense::click())
            .on_hover_text(format!("Inspect memory of {}", p.id));
        if node.clicked() {
            command = Some(VisualiserCommand::Inspect(p.id.clone()));
        }
    }

    if animating {
        ui.ctx().request_repaint();
    }

    command
}
