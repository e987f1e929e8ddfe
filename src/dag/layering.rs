// src/dag/layering.rs

//! Layer assignment: longest dependency chain ending at each node.
//!
//! `layer(n) = 0` when `n` has no dependencies, otherwise
//! `1 + max(layer(d))` over its dependencies.
//!
//! # Cycles
//!
//! Task data may contain dependency cycles. The traversal is an iterative
//! depth-first search that keeps the current path in an explicit state
//! vector. A dependency pointing at a node that is *on the current path* is a
//! back-edge: it is ignored for layering and for edge derivation, and it is
//! reported in [`Layering::back_edges`]. This is a fallback policy for
//! malformed data, not part of normal layout.
//!
//! Roots are visited in index (lexical id) order and dependencies in
//! declaration order, so the choice of dropped edge is deterministic. For the
//! cycle `a → b → c → a` the dropped edge is `c → a`.

use tracing::debug;

use crate::dag::graph::TaskGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

#[derive(Debug)]
struct Frame {
    node: usize,
    next_dep: usize,
}

/// Result of layer assignment over a [`TaskGraph`].
#[derive(Debug, Clone, Default)]
pub struct Layering {
    layers: Vec<usize>,
    retained: Vec<Vec<usize>>,
    back_edges: Vec<(usize, usize)>,
}

impl Layering {
    /// Layer of the node at `idx`.
    pub fn layer_of(&self, idx: usize) -> usize {
        self.layers[idx]
    }

    /// Dependencies of `idx` that survived cycle breaking, in declaration order.
    pub fn retained_dependencies(&self, idx: usize) -> &[usize] {
        &self.retained[idx]
    }

    /// `(dependent, dependency)` index pairs ignored to break cycles, in the
    /// order they were found.
    pub fn back_edges(&self) -> &[(usize, usize)] {
        &self.back_edges
    }

    /// Highest layer in use, or `None` for an empty graph.
    pub fn max_layer(&self) -> Option<usize> {
        self.layers.iter().copied().max()
    }
}

/// Assign a layer to every node of `graph`. Always terminates, in O(V + E).
pub fn assign_layers(graph: &TaskGraph) -> Layering {
    let n = graph.len();
    let mut state = vec![Visit::New; n];
    let mut layers = vec![0usize; n];
    // Per node, parallel to its dependency list; left empty until a cut.
    let mut cut: Vec<Vec<bool>> = vec![Vec::new(); n];
    let mut retained: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut back_edges = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..n {
        if state[root] != Visit::New {
            continue;
        }
        state[root] = Visit::OnPath;
        stack.push(Frame {
            node: root,
            next_dep: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let deps = graph.dependencies_of(node);

            let pos = frame.next_dep;
            if let Some(&dep) = deps.get(pos) {
                frame.next_dep += 1;
                match state[dep] {
                    Visit::New => {
                        state[dep] = Visit::OnPath;
                        stack.push(Frame {
                            node: dep,
                            next_dep: 0,
                        });
                    }
                    Visit::OnPath => {
                        debug!(
                            from = graph.id(node),
                            to = graph.id(dep),
                            "ignoring back-edge that closes a dependency cycle"
                        );
                        if cut[node].is_empty() {
                            cut[node] = vec![false; deps.len()];
                        }
                        cut[node][pos] = true;
                        back_edges.push((node, dep));
                    }
                    Visit::Done => {}
                }
                continue;
            }

            // All dependencies explored: every kept one is Done by now.
            let kept: Vec<usize> = if cut[node].is_empty() {
                deps.to_vec()
            } else {
                deps.iter()
                    .zip(&cut[node])
                    .filter(|&(_, &is_cut)| !is_cut)
                    .map(|(&d, _)| d)
                    .collect()
            };
            let layer = kept.iter().map(|&d| layers[d] + 1).max().unwrap_or(0);
            layers[node] = layer;
            retained[node] = kept;
            state[node] = Visit::Done;
            stack.pop();
        }
    }

    Layering {
        layers,
        retained,
        back_edges,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::task::Task;

    fn graph(spec: &[(&str, &[&str])]) -> TaskGraph {
        let tasks: Vec<Arc<Task>> = spec
            .iter()
            .map(|(id, deps)| {
                let mut t = Task::new(*id);
                t.dependencies = deps.iter().map(|d| d.to_string()).collect();
                Arc::new(t)
            })
            .collect();
        TaskGraph::build(&tasks)
    }

    fn layer(g: &TaskGraph, l: &Layering, id: &str) -> usize {
        l.layer_of(g.index_of(id).unwrap())
    }

    #[test]
    fn longest_chain_determines_layer() {
        // d depends on a directly and via b -> a.
        let g = graph(&[("a", &[]), ("b", &["a"]), ("c", &["b"]), ("d", &["a", "c"])]);
        let l = assign_layers(&g);

        assert_eq!(layer(&g, &l, "a"), 0);
        assert_eq!(layer(&g, &l, "b"), 1);
        assert_eq!(layer(&g, &l, "c"), 2);
        assert_eq!(layer(&g, &l, "d"), 3);
        assert!(l.back_edges().is_empty());
        assert_eq!(l.max_layer(), Some(3));
    }

    #[test]
    fn three_cycle_drops_closing_edge() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let l = assign_layers(&g);

        let c = g.index_of("c").unwrap();
        let a = g.index_of("a").unwrap();
        assert_eq!(l.back_edges(), &[(c, a)]);
        assert_eq!(layer(&g, &l, "c"), 0);
        assert_eq!(layer(&g, &l, "b"), 1);
        assert_eq!(layer(&g, &l, "a"), 2);
        assert!(l.retained_dependencies(c).is_empty());
    }

    #[test]
    fn two_cycle_keeps_one_direction() {
        let g = graph(&[("x", &["y"]), ("y", &["x"])]);
        let l = assign_layers(&g);

        assert_eq!(l.back_edges().len(), 1);
        assert_eq!(layer(&g, &l, "y"), 0);
        assert_eq!(layer(&g, &l, "x"), 1);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let ids: Vec<String> = (0..20_000).map(|i| format!("t{i:05}")).collect();
        let tasks: Vec<Arc<Task>> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let mut t = Task::new(id.clone());
                // Each task depends on the next one, so the walk from the
                // lexically first root is 20k frames deep.
                if let Some(next) = ids.get(i + 1) {
                    t.dependencies = vec![next.clone()];
                }
                Arc::new(t)
            })
            .collect();
        let g = TaskGraph::build(&tasks);
        let l = assign_layers(&g);

        assert_eq!(l.max_layer(), Some(19_999));
        assert_eq!(l.layer_of(0), 19_999);
    }

    #[test]
    fn wide_fan_out_cuts_only_the_closing_dependency() {
        let leaves: Vec<String> = (0..10_000).map(|i| format!("l{i:05}")).collect();
        let mut hub = Task::new("a");
        hub.dependencies = leaves.clone();
        let mut tasks = vec![Arc::new(hub)];
        for id in &leaves {
            let mut leaf = Task::new(id.clone());
            if id == "l05000" {
                leaf.dependencies = vec!["a".to_string()];
            }
            tasks.push(Arc::new(leaf));
        }
        let g = TaskGraph::build(&tasks);
        let l = assign_layers(&g);

        let a = g.index_of("a").unwrap();
        let closing = g.index_of("l05000").unwrap();
        assert_eq!(l.back_edges(), &[(closing, a)]);
        assert_eq!(l.retained_dependencies(a).len(), 10_000);
        assert!(l.retained_dependencies(closing).is_empty());
        assert_eq!(layer(&g, &l, "a"), 1);
    }

    #[test]
    fn empty_graph_has_no_layers() {
        let l = assign_layers(&TaskGraph::default());
        assert_eq!(l.max_layer(), None);
    }
}
