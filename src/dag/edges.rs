// src/dag/edges.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::dag::model::{DependencyRelation, Edge, EdgeId, Node};
use crate::palette::StatusPalette;

/// Derive the edge list for `nodes` from a resolved dependency relation.
///
/// Emits one edge per dependency whose both ends are in `nodes`, grouped by
/// `from` in node order and then by declaration order. The color of each edge
/// comes from `palette` applied to the status of the `to` task.
pub fn derive_edges<P>(nodes: &[Arc<Node>], relation: &DependencyRelation, palette: &P) -> Vec<Edge>
where
    P: StatusPalette + ?Sized,
{
    let by_id: HashMap<&str, &Arc<Node>> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut edges = Vec::with_capacity(relation.pair_count());

    for from in nodes {
        for dep in relation.dependencies_of(&from.id) {
            let Some(to) = by_id.get(dep.as_str()) else {
                continue;
            };
            if to.id == from.id {
                continue;
            }
            edges.push(Edge {
                id: EdgeId::new(from.id.clone(), to.id.clone()),
                from: Arc::clone(from),
                to: Arc::clone(to),
                color: palette.color_for(&to.task.status),
            });
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::model::Position;
    use crate::palette::DefaultPalette;
    use crate::task::Task;
    use crate::types::TaskStatus;

    fn node(id: &str, status: TaskStatus) -> Arc<Node> {
        let mut task = Task::new(id);
        task.status = status;
        Arc::new(Node {
            id: id.to_string(),
            task: Arc::new(task),
            position: Position::default(),
            layer: 0,
        })
    }

    #[test]
    fn colors_follow_target_status() {
        let nodes = vec![node("api", TaskStatus::Todo), node("db", TaskStatus::Done)];
        let mut rel = DependencyRelation::default();
        rel.insert("api".to_string(), vec!["db".to_string()]);

        let palette = |status: &TaskStatus| match status {
            TaskStatus::Done => "green".to_string(),
            _ => "gray".to_string(),
        };
        let edges = derive_edges(&nodes, &rel, &palette);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id.to_string(), "api-db");
        assert_eq!(edges[0].color, "green");
        assert!(Arc::ptr_eq(&edges[0].to, &nodes[1]));
    }

    #[test]
    fn skips_targets_missing_from_the_node_set() {
        let nodes = vec![node("a", TaskStatus::Todo)];
        let mut rel = DependencyRelation::default();
        rel.insert("a".to_string(), vec!["gone".to_string(), "a".to_string()]);

        assert!(derive_edges(&nodes, &rel, &DefaultPalette).is_empty());
    }

    #[test]
    fn orders_by_node_then_declaration() {
        let nodes = vec![
            node("a", TaskStatus::Todo),
            node("b", TaskStatus::Todo),
            node("c", TaskStatus::Todo),
        ];
        let mut rel = DependencyRelation::default();
        rel.insert("c".to_string(), vec!["b".to_string(), "a".to_string()]);
        rel.insert("b".to_string(), vec!["a".to_string()]);

        let ids: Vec<String> = derive_edges(&nodes, &rel, &DefaultPalette)
            .iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b-a", "c-b", "c-a"]);
    }
}
