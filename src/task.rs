// src/task.rs

//! Task records as supplied by the task source, and immutable snapshots of
//! them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::TaskStatus;

/// Canonical task identifier type.
pub type TaskId = String;

/// A single task as read from the task source.
///
/// The engine only reads tasks; it never validates them. `dependents` is
/// carried for display purposes and is not used for layout.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Task {
    pub id: TaskId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TaskStatus,

    /// Ids of the tasks this one depends on, in declaration order.
    ///
    /// Accepts either plain ids (`["a", "b"]`) or reference objects
    /// (`[{ id = "a" }]`). A missing or `null` list is empty.
    #[serde(default, deserialize_with = "deserialize_refs")]
    pub dependencies: Vec<TaskId>,

    #[serde(default, deserialize_with = "deserialize_refs")]
    pub dependents: Vec<TaskId>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            status: TaskStatus::default(),
            dependencies: Vec::new(),
            dependents: Vec::new(),
        }
    }

    /// Display name, falling back to the id for unnamed tasks.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskRef {
    Id(TaskId),
    Object { id: TaskId },
}

fn deserialize_refs<'de, D>(deserializer: D) -> Result<Vec<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<TaskRef>>::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|r| match r {
            TaskRef::Id(id) | TaskRef::Object { id } => id,
        })
        .collect())
}

/// Task sources may send `null` for optional fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Immutable, cheaply clonable view of the task collection at one point in
/// time.
///
/// Every change in the task source produces a new snapshot; the engine is a
/// function from snapshot to layout.
#[derive(Clone)]
pub struct TaskSnapshot {
    tasks: Arc<[Arc<Task>]>,
}

impl TaskSnapshot {
    pub fn new(tasks: Vec<Task>) -> Self {
        tasks.into_iter().map(Arc::new).collect()
    }

    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Task>> {
        self.tasks.iter()
    }
}

impl Default for TaskSnapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<Arc<Task>> for TaskSnapshot {
    fn from_iter<I: IntoIterator<Item = Arc<Task>>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Task>> for TaskSnapshot {
    fn from(tasks: Vec<Task>) -> Self {
        Self::new(tasks)
    }
}

impl fmt::Debug for TaskSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSnapshot")
            .field("len", &self.tasks.len())
            .finish()
    }
}
