// src/export/text.rs

use std::fmt;

use crate::dag::GraphLayout;

/// One line per node, then one per edge, then any cycle fallbacks.
///
/// ```text
/// nodes (2):
///   schema [0] (0, 0) done
///   api [1] (300, 0) in_progress
/// edges (1):
///   api-schema: api -> schema [green]
/// ```
pub fn render_text(layout: &GraphLayout) -> String {
    TextLayout(layout).to_string()
}

struct TextLayout<'a>(&'a GraphLayout);

impl fmt::Display for TextLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.0;

        writeln!(f, "nodes ({}):", layout.nodes.len())?;
        for node in &layout.nodes {
            writeln!(
                f,
                "  {} [{}] ({}, {}) {}",
                node.id, node.layer, node.position.x, node.position.y, node.task.status
            )?;
        }

        writeln!(f, "edges ({}):", layout.edges.len())?;
        for edge in &layout.edges {
            writeln!(
                f,
                "  {}: {} -> {} [{}]",
                edge.id, edge.from.id, edge.to.id, edge.color
            )?;
        }

        if !layout.dropped_back_edges.is_empty() {
            writeln!(f, "cycle fallbacks ({}):", layout.dropped_back_edges.len())?;
            for edge in &layout.dropped_back_edges {
                writeln!(f, "  ignored {} -> {}", edge.from, edge.to)?;
            }
        }

        Ok(())
    }
}
