// src/dag/mod.rs

//! Dependency graph construction and layout.
//!
//! - [`graph`] turns a task snapshot into an indexed dependency graph.
//! - [`layering`] assigns each node its depth, breaking cycles.
//! - [`layout`] places layered nodes on a grid.
//! - [`edges`] derives colored edges for the placed nodes.
//! - [`model`] holds the output value types.
//!
//! [`compute_layout`] runs the whole pipeline.

pub mod edges;
pub mod graph;
pub mod layering;
pub mod layout;
pub mod model;

use tracing::debug;

pub use edges::derive_edges;
pub use graph::{DropReason, DroppedReference, TaskGraph};
pub use layering::{Layering, assign_layers};
pub use layout::{LayoutSettings, position_nodes};
pub use model::{DependencyRelation, Edge, EdgeId, GraphLayout, Node, Position};

use crate::palette::StatusPalette;
use crate::task::TaskSnapshot;

/// Compute a complete layout for `snapshot`.
///
/// Pure and infallible: the same snapshot always yields the same positions,
/// edge ids and colors, and every call returns freshly allocated output.
pub fn compute_layout<P>(snapshot: &TaskSnapshot, settings: &LayoutSettings, palette: &P) -> GraphLayout
where
    P: StatusPalette + ?Sized,
{
    let graph = TaskGraph::build(snapshot.tasks());
    let layering = assign_layers(&graph);
    let nodes = position_nodes(&graph, &layering, settings);

    let mut dependencies = DependencyRelation::default();
    for idx in 0..graph.len() {
        let retained = layering
            .retained_dependencies(idx)
            .iter()
            .map(|&d| graph.id(d).to_string())
            .collect();
        dependencies.insert(graph.id(idx).to_string(), retained);
    }

    let dropped_back_edges = layering
        .back_edges()
        .iter()
        .map(|&(from, to)| EdgeId::new(graph.id(from), graph.id(to)))
        .collect();

    let edges = derive_edges(&nodes, &dependencies, palette);

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        layers = layering.max_layer().map_or(0, |m| m + 1),
        "computed layout"
    );

    GraphLayout {
        nodes,
        edges,
        dependencies,
        dropped_back_edges,
    }
}
