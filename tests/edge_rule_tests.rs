use serde_json::json;

use mcp_visualiser::engine::cursor::StepCursor;
use mcp_visualiser::engine::projection::{project, NodeHighlight};
use mcp_visualiser::model::participant::EdgeRule;
use mcp_visualiser::model::trace::Trace;

/// Four participants, no tool, edges lit by active endpoints.
fn simple_trace() -> Trace {
    let memory = json!({
        "user": { "data": null },
        "client": { "data": null },
        "backend": { "data": null },
        "llm": { "data": null }
    });

    let doc = json!({
        "title": "simple",
        "edge_rule": "active_endpoints",
        "participants": [
            { "id": "user", "label": "User", "kind": "user", "position": [0.0, 0.0] },
            { "id": "client", "label": "Client", "kind": "client", "position": [200.0, 0.0] },
            { "id": "backend", "label": "Backend", "kind": "backend", "position": [400.0, 0.0] },
            { "id": "llm", "label": "LLM", "kind": "llm", "position": [600.0, 0.0] }
        ],
        "edges": [
            { "id": "uc", "source": "user", "target": "client" },
            { "id": "cb", "source": "client", "target": "backend" },
            { "id": "bl", "source": "backend", "target": "llm" }
        ],
        "steps": [
            { "description": "ready", "kind": { "type": "info" }, "memory": memory },
            {
                "description": "user talks to client",
                "active_participants": ["user", "client"],
                "kind": { "type": "info" },
                "memory": memory
            },
            {
                "description": "client and backend",
                "active_participants": ["client", "backend"],
                "kind": { "type": "transport", "source_id": "client", "target_id": "backend" },
                "memory": memory
            }
        ]
    });

    Trace::from_json(&doc.to_string()).expect("simple trace")
}

#[test]
fn test_simple_trace_parses_with_endpoint_rule() {
    let trace = simple_trace();
    assert_eq!(trace.edge_rule, EdgeRule::ActiveEndpoints);
    assert_eq!(trace.participants.len(), 4);
}

#[test]
fn test_endpoint_rule_lights_edges_on_info_steps() {
    let trace = simple_trace();
    let mut cursor = StepCursor::new(trace.len());
    cursor.advance();

    let view = project(&trace, &cursor).unwrap();
    let lit: Vec<_> = view.edges.iter().filter(|e| e.active).map(|e| e.edge.id.as_str()).collect();
    assert_eq!(lit, vec!["uc"]);
    assert!(view.nodes.iter().all(|n| n.highlight == NodeHighlight::None));
}

#[test]
fn test_endpoint_rule_with_transport_step() {
    let trace = simple_trace();
    let mut cursor = StepCursor::new(trace.len());
    cursor.retreat();

    let view = project(&trace, &cursor).unwrap();
    let lit: Vec<_> = view.edges.iter().filter(|e| e.active).map(|e| e.edge.id.as_str()).collect();
    assert_eq!(lit, vec!["cb"]);

    let transport: Vec<_> = view
        .nodes
        .iter()
        .filter(|n| n.highlight == NodeHighlight::Transport)
        .map(|n| n.participant.id.as_str())
        .collect();
    assert_eq!(transport, vec!["client", "backend"]);
}
