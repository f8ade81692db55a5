//! Pure derivation of everything a frame shows from the current step.
//!
//! Nothing here touches egui, so highlight rules are tested directly.

use serde_json::{json, Value};

use crate::engine::cursor::StepCursor;
use crate::model::participant::{DiagramEdge, EdgeRule, Participant};
use crate::model::step::{ActionPayload, StepKind, StepRecord, TransportPayload};
use crate::model::trace::Trace;

pub const IDLE_MESSAGE: &str = "System is ready. Click 'Next' to start.";
pub const NO_DATA: &str = "(no data)";
pub const NO_MEMORY_DATA: &str = "(No specific data in memory)";
pub const UNDEFINED_STATUS: &str = "undefined for this step";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeHighlight {
    Action,
    Transport,
    None,
}

impl NodeHighlight {
    pub fn class_name(&self) -> &'static str {
        match self {
            NodeHighlight::Action => "action-highlight",
            NodeHighlight::Transport => "transport-highlight",
            NodeHighlight::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeView<'a> {
    pub participant: &'a Participant,
    pub highlight: NodeHighlight,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView<'a> {
    pub edge: &'a DiagramEdge,
    pub active: bool,
}

impl EdgeView<'_> {
    pub fn class_name(&self) -> &'static str {
        if self.active {
            "transport-edge-highlight"
        } else {
            "none"
        }
    }
}

/// The kind-driven block of the side panel.
#[derive(Debug, Clone, PartialEq)]
pub enum StepPanel<'a> {
    Idle {
        message: &'static str,
    },
    Action {
        actor_id: &'a str,
        change_description: &'a str,
        is_structured_update: bool,
        before: Option<&'a Value>,
        after: Option<&'a Value>,
    },
    Transport {
        source_id: &'a str,
        target_id: &'a str,
        is_structured_format: bool,
        payload: Option<&'a Value>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryView {
    pub participant_id: String,
    pub data: Option<Value>,
    pub is_structured_format: bool,
}

impl MemoryView {
    /// False for null, empty containers and a lone `{status: ..}` object,
    /// which the panel shows as a one-line status instead of a tree.
    pub fn has_specific_data(&self) -> bool {
        match &self.data {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => {
                !(map.is_empty() || (map.len() == 1 && map.contains_key("status")))
            }
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.data.as_ref()?.get("status")?.as_str()
    }
}

/// Everything one frame needs, borrowed from the trace.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<'a> {
    pub index: usize,
    pub len: usize,
    pub description: &'a str,
    pub kind: &'static str,
    pub nodes: Vec<NodeView<'a>>,
    pub edges: Vec<EdgeView<'a>>,
    pub panel: StepPanel<'a>,
    pub memory: Option<MemoryView>,
}

/* =========================
   Highlights
   ========================= */

pub fn node_highlight(step: &StepRecord, participant_id: &str) -> NodeHighlight {
    match &step.kind {
        StepKind::Action(a) if a.actor_id == participant_id => NodeHighlight::Action,
        StepKind::Transport(_) if step.is_active(participant_id) => NodeHighlight::Transport,
        _ => NodeHighlight::None,
    }
}

pub fn edge_is_active(step: &StepRecord, edge: &DiagramEdge, rule: EdgeRule) -> bool {
    match rule {
        EdgeRule::TransportPair => match &step.kind {
            StepKind::Transport(t) => edge.connects(&t.source_id, &t.target_id),
            _ => false,
        },
        EdgeRule::ActiveEndpoints => step.is_active(&edge.source) && step.is_active(&edge.target),
    }
}

pub fn project_nodes<'a>(step: &StepRecord, participants: &'a [Participant]) -> Vec<NodeView<'a>> {
    participants
        .iter()
        .map(|p| NodeView {
            participant: p,
            highlight: node_highlight(step, &p.id),
            is_active: step.is_active(&p.id),
        })
        .collect()
}

pub fn project_edges<'a>(
    step: &StepRecord,
    edges: &'a [DiagramEdge],
    rule: EdgeRule,
) -> Vec<EdgeView<'a>> {
    edges
        .iter()
        .map(|e| EdgeView {
            edge: e,
            active: edge_is_active(step, e, rule),
        })
        .collect()
}

/* =========================
   Side panel
   ========================= */

pub fn step_panel(step: &StepRecord) -> StepPanel<'_> {
    match &step.kind {
        StepKind::Info => StepPanel::Idle {
            message: IDLE_MESSAGE,
        },
        StepKind::Action(ActionPayload {
            actor_id,
            before,
            after,
            change_description,
            is_structured_update,
        }) => StepPanel::Action {
            actor_id,
            change_description,
            is_structured_update: *is_structured_update,
            before: before.as_ref(),
            after: after.as_ref(),
        },
        StepKind::Transport(TransportPayload {
            source_id,
            target_id,
            payload,
            is_structured_format,
        }) => StepPanel::Transport {
            source_id,
            target_id,
            is_structured_format: *is_structured_format,
            payload: payload.as_ref(),
        },
    }
}

pub fn inspect_memory(step: &StepRecord, participant_id: &str) -> MemoryView {
    match step.memory.get(participant_id) {
        Some(entry) => MemoryView {
            participant_id: participant_id.to_string(),
            data: entry.data.clone(),
            is_structured_format: entry.is_structured_format,
        },
        None => MemoryView {
            participant_id: participant_id.to_string(),
            data: Some(json!({ "status": UNDEFINED_STATUS })),
            is_structured_format: false,
        },
    }
}

/// Projects the step under the cursor. Returns `None` only when the cursor
/// was built for a different trace.
pub fn project<'a>(trace: &'a Trace, cursor: &StepCursor) -> Option<ViewState<'a>> {
    let step = trace.step(cursor.index())?;

    Some(ViewState {
        index: step.index,
        len: trace.len(),
        description: &step.description,
        kind: step.kind.short_name(),
        nodes: project_nodes(step, &trace.participants),
        edges: project_edges(step, &trace.edges, trace.edge_rule),
        panel: step_panel(step),
        memory: cursor.selected().map(|id| inspect_memory(step, id)),
    })
}
