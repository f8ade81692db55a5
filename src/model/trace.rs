//! The step fixture: participants, edges and the authored timeline.
//!
//! A trace is data, not code. The canonical one is compiled into the binary,
//! others can be loaded from disk. Every constructor validates, so the rest of
//! the crate can index steps and look up participants without checking again.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::model::participant::{DiagramEdge, EdgeRule, Participant};
use crate::model::step::{StepKind, StepRecord};

pub const BUILTIN_TRACE: &str = include_str!("../../assets/weather_tool_trace.json");

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("trace is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("trace has no steps")]
    Empty,

    #[error("participant '{0}' is declared more than once")]
    DuplicateParticipant(String),

    #[error("edge '{0}' is declared more than once")]
    DuplicateEdge(String),

    #[error("edge '{edge}' points at unknown participant '{participant}'")]
    UnknownEdgeEndpoint { edge: String, participant: String },

    #[error("step {step} refers to unknown participant '{participant}'")]
    UnknownParticipant { step: usize, participant: String },

    #[error("step {step} has no memory entry for '{participant}'")]
    MissingMemory { step: usize, participant: String },

    #[error("step {step} transports {source_id} → {target_id} but {matches} edges match")]
    TransportEdge {
        step: usize,
        source_id: String,
        target_id: String,
        matches: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub edge_rule: EdgeRule,
    pub participants: Vec<Participant>,
    pub edges: Vec<DiagramEdge>,
    pub steps: Vec<StepRecord>,
}

fn default_title() -> String {
    "MCP Visualiser".into()
}

impl Trace {
    pub fn builtin() -> Result<Self, TraceError> {
        Self::from_json(BUILTIN_TRACE)
    }

    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let mut trace: Trace = serde_json::from_str(json)?;
        for (i, step) in trace.steps.iter_mut().enumerate() {
            step.index = i;
        }
        trace.validate()?;
        Ok(trace)
    }

    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let json = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trace = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            steps = trace.len(),
            participants = trace.participants.len(),
            "loaded trace"
        );
        Ok(trace)
    }

    pub fn validate(&self) -> Result<(), TraceError> {
        if self.steps.is_empty() {
            return Err(TraceError::Empty);
        }

        let mut known = HashSet::new();
        for p in &self.participants {
            if !known.insert(p.id.as_str()) {
                return Err(TraceError::DuplicateParticipant(p.id.clone()));
            }
        }

        let mut edge_ids = HashSet::new();
        for e in &self.edges {
            if !edge_ids.insert(e.id.as_str()) {
                return Err(TraceError::DuplicateEdge(e.id.clone()));
            }
            for end in [&e.source, &e.target] {
                if !known.contains(end.as_str()) {
                    return Err(TraceError::UnknownEdgeEndpoint {
                        edge: e.id.clone(),
                        participant: end.clone(),
                    });
                }
            }
        }

        for step in &self.steps {
            if let Some(unknown) = step
                .referenced_participants()
                .into_iter()
                .chain(step.memory.keys().map(String::as_str))
                .find(|id| !known.contains(id))
            {
                return Err(TraceError::UnknownParticipant {
                    step: step.index,
                    participant: unknown.to_string(),
                });
            }

            if let Some(missing) = self
                .participants
                .iter()
                .find(|p| !step.memory.contains_key(&p.id))
            {
                return Err(TraceError::MissingMemory {
                    step: step.index,
                    participant: missing.id.clone(),
                });
            }

            if let (EdgeRule::TransportPair, StepKind::Transport(t)) = (self.edge_rule, &step.kind) {
                let matches = self
                    .edges
                    .iter()
                    .filter(|e| e.connects(&t.source_id, &t.target_id))
                    .count();
                if matches != 1 {
                    return Err(TraceError::TransportEdge {
                        step: step.index,
                        source_id: t.source_id.clone(),
                        target_id: t.target_id.clone(),
                        matches,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn summary(&self) -> String {
        let (mut info, mut action, mut transport) = (0, 0, 0);
        for step in &self.steps {
            match step.kind {
                StepKind::Info => info += 1,
                StepKind::Action(_) => action += 1,
                StepKind::Transport(_) => transport += 1,
            }
        }
        format!(
            "{}: {} participants, {} edges, {} steps ({} info, {} action, {} transport)",
            self.title,
            self.participants.len(),
            self.edges.len(),
            self.len(),
            info,
            action,
            transport
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn minimal() -> Value {
        json!({
            "title": "tiny",
            "participants": [
                { "id": "a", "label": "A", "kind": "user", "position": [0.0, 0.0] },
                { "id": "b", "label": "B", "kind": "client", "position": [100.0, 0.0] }
            ],
            "edges": [ { "id": "a-b", "source": "a", "target": "b" } ],
            "steps": [
                {
                    "description": "start",
                    "kind": { "type": "info" },
                    "memory": {
                        "a": { "data": null, "is_structured_format": false },
                        "b": { "data": null, "is_structured_format": false }
                    }
                },
                {
                    "description": "send",
                    "active_participants": ["a", "b"],
                    "kind": { "type": "transport", "source_id": "a", "target_id": "b", "payload": null },
                    "memory": {
                        "a": { "data": { "status": "sent" } },
                        "b": { "data": { "got": 1 } }
                    }
                }
            ]
        })
    }

    fn parse(v: Value) -> Result<Trace, TraceError> {
        Trace::from_json(&v.to_string())
    }

    #[test]
    fn builtin_trace_is_valid() {
        let trace = Trace::builtin().unwrap();
        assert_eq!(trace.len(), 25);
        assert_eq!(trace.participants.len(), 5);
        assert_eq!(trace.edges.len(), 8);
        assert_eq!(trace.edge_rule, EdgeRule::TransportPair);
    }

    #[test]
    fn steps_are_indexed_by_position() {
        let trace = parse(minimal()).unwrap();
        assert_eq!(trace.step(0).unwrap().index, 0);
        assert_eq!(trace.step(1).unwrap().index, 1);
        assert!(trace.step(2).is_none());
    }

    #[test]
    fn missing_memory_entry_is_rejected() {
        let mut v = minimal();
        v["steps"][1]["memory"].as_object_mut().unwrap().remove("b");
        let err = parse(v).unwrap_err();
        assert!(matches!(err, TraceError::MissingMemory { step: 1, ref participant } if participant == "b"));
    }

    #[test]
    fn transport_without_edge_is_rejected() {
        let mut v = minimal();
        v["steps"][1]["kind"]["source_id"] = json!("b");
        v["steps"][1]["kind"]["target_id"] = json!("a");
        let err = parse(v).unwrap_err();
        assert!(matches!(err, TraceError::TransportEdge { matches: 0, .. }));
    }

    #[test]
    fn active_endpoints_rule_does_not_need_transport_edges() {
        let mut v = minimal();
        v["edge_rule"] = json!("active_endpoints");
        v["steps"][1]["kind"]["source_id"] = json!("b");
        v["steps"][1]["kind"]["target_id"] = json!("a");
        assert!(parse(v).is_ok());
    }

    #[test]
    fn unknown_actor_is_rejected() {
        let mut v = minimal();
        v["steps"][1]["kind"] = json!({
            "type": "action",
            "actor_id": "ghost",
            "change_description": "boo"
        });
        let err = parse(v).unwrap_err();
        assert!(matches!(err, TraceError::UnknownParticipant { step: 1, .. }));
    }

    #[test]
    fn duplicate_participant_is_rejected() {
        let mut v = minimal();
        v["participants"][1]["id"] = json!("a");
        assert!(matches!(parse(v), Err(TraceError::DuplicateParticipant(id)) if id == "a"));
    }

    #[test]
    fn edge_to_nowhere_is_rejected() {
        let mut v = minimal();
        v["edges"][0]["target"] = json!("c");
        assert!(matches!(parse(v), Err(TraceError::UnknownEdgeEndpoint { .. })));
    }

    #[test]
    fn empty_trace_is_rejected() {
        let mut v = minimal();
        v["steps"] = json!([]);
        assert!(matches!(parse(v), Err(TraceError::Empty)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Trace::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
    }

    #[test]
    fn load_reads_trace_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(&path, minimal().to_string()).unwrap();

        let trace = Trace::load(&path).unwrap();
        assert_eq!(trace.title, "tiny");
        assert!(trace.summary().contains("2 steps (1 info, 0 action, 1 transport)"));
    }
}
