use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    User,
    Client,
    Backend,
    Llm,
    Tool,
}

impl ParticipantKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ParticipantKind::User => "👤",
            ParticipantKind::Client => "💻",
            ParticipantKind::Backend => "⚙",
            ParticipantKind::Llm => "🧠",
            ParticipantKind::Tool => "🔧",
        }
    }
}

/// A fixed actor on the diagram. Position is in trace coordinates,
/// the renderer fits them into whatever area it gets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub label: String,
    pub kind: ParticipantKind,
    pub position: [f32; 2],
}

/* =========================
   Edges
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleSide {
    /// Handle ids carry their side in the name (`bottom-source`, `top-target`).
    pub fn from_handle_id(id: &str) -> Option<HandleSide> {
        let id = id.to_ascii_lowercase();
        if id.contains("top") {
            Some(HandleSide::Top)
        } else if id.contains("bottom") {
            Some(HandleSide::Bottom)
        } else if id.contains("left") {
            Some(HandleSide::Left)
        } else if id.contains("right") {
            Some(HandleSide::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl DiagramEdge {
    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }

    pub fn source_side(&self) -> Option<HandleSide> {
        self.source_handle.as_deref().and_then(HandleSide::from_handle_id)
    }

    pub fn target_side(&self) -> Option<HandleSide> {
        self.target_handle.as_deref().and_then(HandleSide::from_handle_id)
    }
}

/// How a step decides which edges light up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRule {
    /// Only on transport steps, the one edge matching (source, target).
    #[default]
    TransportPair,
    /// Any edge whose endpoints are both active this step.
    ActiveEndpoints,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_side_is_read_from_the_id() {
        assert_eq!(HandleSide::from_handle_id("bottom-source"), Some(HandleSide::Bottom));
        assert_eq!(HandleSide::from_handle_id("top-target"), Some(HandleSide::Top));
        assert_eq!(HandleSide::from_handle_id("client-left-target"), Some(HandleSide::Left));
        assert_eq!(HandleSide::from_handle_id("handle-1"), None);
    }

    #[test]
    fn edge_without_handles_has_no_fixed_side() {
        let edge = DiagramEdge {
            id: "e".into(),
            source: "a".into(),
            target: "b".into(),
            source_handle: None,
            target_handle: None,
        };
        assert!(edge.connects("a", "b"));
        assert!(!edge.connects("b", "a"));
        assert_eq!(edge.source_side(), None);
    }
}
