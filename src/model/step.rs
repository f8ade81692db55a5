use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/* =========================
   Payloads
   ========================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPayload {
    pub actor_id: String,
    #[serde(default)]
    pub before: Option<Value>,
    #[serde(default)]
    pub after: Option<Value>,
    pub change_description: String,
    #[serde(default)]
    pub is_structured_update: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportPayload {
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub payload: Option<Value>,
    #[serde(default)]
    pub is_structured_format: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    Info,
    Action(ActionPayload),
    Transport(TransportPayload),
}

impl StepKind {
    pub fn short_name(&self) -> &'static str {
        match self {
            StepKind::Info => "INFO",
            StepKind::Action(_) => "ACTION",
            StepKind::Transport(_) => "TRANSPORT",
        }
    }
}

/// What a participant holds at the end of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub is_structured_format: bool,
}

/* =========================
   Step
   ========================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Position in the trace, filled in on load.
    #[serde(skip)]
    pub index: usize,
    pub description: String,
    #[serde(default)]
    pub active_participants: Vec<String>,
    pub kind: StepKind,
    pub memory: HashMap<String, MemoryEntry>,
}

impl StepRecord {
    pub fn is_active(&self, participant_id: &str) -> bool {
        self.active_participants.iter().any(|p| p == participant_id)
    }

    pub fn action(&self) -> Option<&ActionPayload> {
        match &self.kind {
            StepKind::Action(a) => Some(a),
            _ => None,
        }
    }

    pub fn transport(&self) -> Option<&TransportPayload> {
        match &self.kind {
            StepKind::Transport(t) => Some(t),
            _ => None,
        }
    }

    /// Every participant id this step mentions outside of `memory`.
    pub fn referenced_participants(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.active_participants.iter().map(String::as_str).collect();
        match &self.kind {
            StepKind::Info => {}
            StepKind::Action(a) => ids.push(&a.actor_id),
            StepKind::Transport(t) => {
                ids.push(&t.source_id);
                ids.push(&t.target_id);
            }
        }
        ids
    }
}
