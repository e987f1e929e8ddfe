// src/dag/layout.rs

//! Grid placement of layered nodes.
//!
//! Layers become columns (`x = layer * layer_spacing`), nodes within a layer
//! are stacked by id (`y = index * node_spacing`), and every column is
//! centered against the tallest one.

use std::sync::Arc;

use crate::dag::graph::TaskGraph;
use crate::dag::layering::Layering;
use crate::dag::model::{Node, Position};

/// Default horizontal distance between layers.
pub const LAYER_SPACING: f64 = 300.0;

/// Default vertical distance between nodes in a layer.
pub const NODE_SPACING: f64 = 120.0;

/// Grid spacing used by [`position_nodes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub layer_spacing: f64,
    pub node_spacing: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            layer_spacing: LAYER_SPACING,
            node_spacing: NODE_SPACING,
        }
    }
}

/// Place every node of `graph`, returning them ordered by layer, then id.
pub fn position_nodes(
    graph: &TaskGraph,
    layering: &Layering,
    settings: &LayoutSettings,
) -> Vec<Arc<Node>> {
    let Some(max_layer) = layering.max_layer() else {
        return Vec::new();
    };

    // Graph indices are already in id order, so pushing in index order keeps
    // every column sorted.
    let mut columns: Vec<Vec<usize>> = vec![Vec::new(); max_layer + 1];
    for idx in 0..graph.len() {
        columns[layering.layer_of(idx)].push(idx);
    }
    debug_assert!(columns
        .iter()
        .all(|col| col.windows(2).all(|w| graph.id(w[0]) < graph.id(w[1]))));

    let tallest = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut nodes = Vec::with_capacity(graph.len());

    for (layer, column) in columns.iter().enumerate() {
        let offset = (tallest - column.len()) as f64 * settings.node_spacing / 2.0;
        let x = layer as f64 * settings.layer_spacing;

        for (row, &idx) in column.iter().enumerate() {
            let task = graph.task(idx);
            nodes.push(Arc::new(Node {
                id: task.id.clone(),
                task: Arc::clone(task),
                position: Position {
                    x,
                    y: row as f64 * settings.node_spacing + offset,
                },
                layer,
            }));
        }
    }

    nodes
}
