// src/dag/model.rs

//! Value types produced by a layout pass.
//!
//! Everything here is recomputed from scratch on each pass and never mutated
//! afterwards; a renderer may hold on to a [`GraphLayout`] while the next one
//! is being computed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::palette::ColorToken;
use crate::task::{Task, TaskId};

/// Canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One task placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: TaskId,
    pub task: Arc<Task>,
    pub position: Position,
    /// Depth in the dependency order; 0 means no retained dependencies.
    pub layer: usize,
}

/// Stable identity of a dependency edge: `"<from>-<to>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    /// The dependent task.
    pub from: TaskId,
    /// The task depended upon.
    pub to: TaskId,
}

impl EdgeId {
    pub fn new(from: impl Into<TaskId>, to: impl Into<TaskId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// One resolved dependency, `from` depends on `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: Arc<Node>,
    pub to: Arc<Node>,
    pub color: ColorToken,
}

/// Resolved, acyclic dependency relation: dependent id → dependency ids in
/// declaration order.
///
/// This is what the edge deriver consumes, so edges can be re-derived for a
/// moved or re-colored node set without running layout again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRelation {
    deps: HashMap<TaskId, Vec<TaskId>>,
}

impl DependencyRelation {
    pub fn insert(&mut self, dependent: TaskId, dependencies: Vec<TaskId>) {
        if !dependencies.is_empty() {
            self.deps.insert(dependent, dependencies);
        }
    }

    pub fn dependencies_of(&self, dependent: &str) -> &[TaskId] {
        self.deps.get(dependent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of dependency pairs.
    pub fn pair_count(&self) -> usize {
        self.deps.values().map(Vec::len).sum()
    }
}

/// Complete result of one layout pass.
#[derive(Debug, Clone, Default)]
pub struct GraphLayout {
    /// Nodes ordered by layer, then task id.
    pub nodes: Vec<Arc<Node>>,
    /// Edges grouped by `from` in node order, then by declaration order.
    pub edges: Vec<Edge>,
    /// Retained dependency relation the edges were derived from.
    pub dependencies: DependencyRelation,
    /// Dependencies ignored to break cycles.
    pub dropped_back_edges: Vec<EdgeId>,
}

impl GraphLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Arc<Node>> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_cycles(&self) -> bool {
        !self.dropped_back_edges.is_empty()
    }
}
