// src/export/dot.rs

use std::collections::HashMap;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::dag::{Edge, GraphLayout, Node};

/// Graphviz rendering of `layout`.
///
/// Edges point from the dependency to the dependent task, which is the
/// direction work flows in. Nodes carry `pos` attributes so `neato -n`
/// reproduces the computed coordinates.
pub fn render_dot(layout: &GraphLayout) -> String {
    let mut graph: DiGraph<&Node, &Edge> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    for node in &layout.nodes {
        index.insert(node.id.as_str(), graph.add_node(node.as_ref()));
    }
    for edge in &layout.edges {
        if let (Some(&dep), Some(&dependent)) =
            (index.get(edge.to.id.as_str()), index.get(edge.from.id.as_str()))
        {
            graph.add_edge(dep, dependent, edge);
        }
    }

    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge| {
            let e = edge.weight();
            format!("id=\"{}\" color=\"{}\"", escape(&e.id.to_string()), escape(&e.color))
        },
        &|_, (_, node)| {
            format!(
                "label=\"{}\" pos=\"{},{}!\"",
                escape(node.task.display_name()),
                node.position.x,
                // Graphviz y grows upwards.
                0.0 - node.position.y
            )
        },
    );

    format!("{:?}", dot)
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::{LayoutSettings, compute_layout};
    use crate::palette::DefaultPalette;
    use crate::task::{Task, TaskSnapshot};

    #[test]
    fn edges_run_from_dependency_to_dependent() {
        let mut api = Task::new("api");
        api.name = "Build \"API\"".to_string();
        api.dependencies = vec!["db".to_string()];
        let layout = compute_layout(
            &TaskSnapshot::new(vec![api, Task::new("db")]),
            &LayoutSettings::default(),
            &DefaultPalette,
        );

        let dot = render_dot(&layout);

        assert!(dot.starts_with("digraph {"));
        // db is node 0 (layer 0), api is node 1.
        assert!(dot.contains("0 -> 1"));
        assert!(dot.contains("id=\"api-db\""));
        assert!(dot.contains("label=\"Build \\\"API\\\"\""));
        assert!(dot.contains("pos=\"300,0!\""));
    }
}
