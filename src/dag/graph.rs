// src/dag/graph.rs

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::task::{Task, TaskId};

/// Why a dependency reference did not make it into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No task with that id exists in the snapshot.
    Unresolved,
    /// The task lists itself.
    SelfReference,
    /// The same dependency appears more than once in one task.
    Repeated,
}

/// A dependency reference the builder skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedReference {
    pub task: TaskId,
    pub reference: TaskId,
    pub reason: DropReason,
}

/// Internal node structure: stores immediate deps and dependents as indices.
#[derive(Debug, Clone, Default)]
struct GraphNode {
    /// Resolved dependencies, in declaration order.
    deps: Vec<usize>,
    /// Tasks that depend on this one, in index order.
    dependents: Vec<usize>,
}

/// Directed dependency graph over one task snapshot.
///
/// Tasks are indexed by position after sorting by id, so index order is
/// lexical id order regardless of the order of the input. When the snapshot
/// contains the same id more than once, the last occurrence wins.
///
/// The graph may contain cycles; breaking them is the layering step's job.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<Arc<Task>>,
    index: HashMap<TaskId, usize>,
    nodes: Vec<GraphNode>,
    dropped: Vec<DroppedReference>,
}

impl TaskGraph {
    /// Build the graph from a task collection.
    ///
    /// Never fails: unresolved, self and repeated references are recorded in
    /// [`TaskGraph::dropped_references`] and otherwise ignored.
    pub fn build(tasks: &[Arc<Task>]) -> Self {
        // Later inserts overwrite earlier ones: last occurrence wins.
        let mut unique: BTreeMap<&str, &Arc<Task>> = BTreeMap::new();
        for task in tasks {
            unique.insert(task.id.as_str(), task);
        }

        let tasks: Vec<Arc<Task>> = unique.into_values().map(Arc::clone).collect();
        let index: HashMap<TaskId, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        let mut nodes = vec![GraphNode::default(); tasks.len()];
        let mut dropped = Vec::new();

        let mut seen: HashSet<usize> = HashSet::new();

        for (i, task) in tasks.iter().enumerate() {
            seen.clear();
            for reference in &task.dependencies {
                let reason = match index.get(reference) {
                    None => Some(DropReason::Unresolved),
                    Some(&dep) if dep == i => Some(DropReason::SelfReference),
                    Some(&dep) if !seen.insert(dep) => Some(DropReason::Repeated),
                    Some(&dep) => {
                        nodes[i].deps.push(dep);
                        nodes[dep].dependents.push(i);
                        None
                    }
                };

                if let Some(reason) = reason {
                    debug!(task = %task.id, reference = %reference, ?reason, "dropping dependency reference");
                    dropped.push(DroppedReference {
                        task: task.id.clone(),
                        reference: reference.clone(),
                        reason,
                    });
                }
            }
        }

        debug!(
            nodes = tasks.len(),
            dropped = dropped.len(),
            "built task graph"
        );

        Self {
            tasks,
            index,
            nodes,
            dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Return all task ids, in index (lexical) order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.id.as_str())
    }

    pub fn task(&self, idx: usize) -> &Arc<Task> {
        &self.tasks[idx]
    }

    pub fn id(&self, idx: usize) -> &str {
        &self.tasks[idx].id
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Resolved dependencies of the task at `idx`, in declaration order.
    pub fn dependencies_of(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].deps
    }

    /// Tasks whose resolved dependencies include the task at `idx`.
    pub fn dependents_of(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].dependents
    }

    /// Immediate dependency ids of a task; empty for unknown ids.
    pub fn dependency_ids(&self, id: &str) -> Vec<&str> {
        self.index_of(id)
            .map(|i| self.nodes[i].deps.iter().map(|&d| self.id(d)).collect())
            .unwrap_or_default()
    }

    /// Immediate dependent ids of a task; empty for unknown ids.
    pub fn dependent_ids(&self, id: &str) -> Vec<&str> {
        self.index_of(id)
            .map(|i| self.nodes[i].dependents.iter().map(|&d| self.id(d)).collect())
            .unwrap_or_default()
    }

    pub fn dropped_references(&self) -> &[DroppedReference] {
        &self.dropped
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.deps.len()).sum()
    }
}
