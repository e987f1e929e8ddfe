// src/export/json.rs

use serde::Serialize;

use crate::dag::GraphLayout;
use crate::errors::Result;

#[derive(Debug, Serialize)]
struct JsonLayout<'a> {
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
    dropped_back_edges: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonNode<'a> {
    id: &'a str,
    name: &'a str,
    status: &'a str,
    layer: usize,
    position: JsonPosition,
}

#[derive(Debug, Serialize)]
struct JsonPosition {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct JsonEdge<'a> {
    id: String,
    from: &'a str,
    to: &'a str,
    color: &'a str,
}

/// Pretty-printed JSON with `nodes`, `edges` and `dropped_back_edges`.
pub fn render_json(layout: &GraphLayout) -> Result<String> {
    let doc = JsonLayout {
        nodes: layout
            .nodes
            .iter()
            .map(|n| JsonNode {
                id: &n.id,
                name: n.task.display_name(),
                status: n.task.status.as_str(),
                layer: n.layer,
                position: JsonPosition {
                    x: n.position.x,
                    y: n.position.y,
                },
            })
            .collect(),
        edges: layout
            .edges
            .iter()
            .map(|e| JsonEdge {
                id: e.id.to_string(),
                from: &e.from.id,
                to: &e.to.id,
                color: &e.color,
            })
            .collect(),
        dropped_back_edges: layout
            .dropped_back_edges
            .iter()
            .map(ToString::to_string)
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::{LayoutSettings, compute_layout};
    use crate::palette::DefaultPalette;
    use crate::task::{Task, TaskSnapshot};

    #[test]
    fn emits_node_and_edge_descriptors() {
        let mut b = Task::new("b");
        b.name = "Second".to_string();
        b.dependencies = vec!["a".to_string()];
        let layout = compute_layout(
            &TaskSnapshot::new(vec![Task::new("a"), b]),
            &LayoutSettings::default(),
            &DefaultPalette,
        );

        let value: serde_json::Value = serde_json::from_str(&render_json(&layout).unwrap()).unwrap();

        assert_eq!(value["nodes"][1]["id"], "b");
        assert_eq!(value["nodes"][1]["name"], "Second");
        assert_eq!(value["nodes"][1]["position"]["x"], 300.0);
        assert_eq!(value["edges"][0]["id"], "b-a");
        assert_eq!(value["edges"][0]["color"], "gray");
        assert_eq!(value["dropped_back_edges"].as_array().unwrap().len(), 0);
    }
}
