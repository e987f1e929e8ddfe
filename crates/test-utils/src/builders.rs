#![allow(dead_code)]

use taskgraph::config::{ColorSection, ConfigFile, LayoutSection, RawConfigFile};
use taskgraph::{Task, TaskSnapshot, TaskStatus};

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        Self { task: Task::new(id) }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.task.name = name.to_string();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn depends_on(mut self, dep: &str) -> Self {
        self.task.dependencies.push(dep.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for `TaskSnapshot`; tasks keep insertion order.
#[derive(Default)]
pub struct SnapshotBuilder {
    tasks: Vec<Task>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Shorthand for a `Todo` task with the given dependencies.
    pub fn with(mut self, id: &str, deps: &[&str]) -> Self {
        let mut builder = TaskBuilder::new(id);
        for dep in deps {
            builder = builder.depends_on(dep);
        }
        self.tasks.push(builder.build());
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn build(self) -> TaskSnapshot {
        TaskSnapshot::new(self.tasks)
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                layout: LayoutSection::default(),
                colors: ColorSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.config.task.push(task);
        self
    }

    pub fn with_spacing(mut self, layer_spacing: f64, node_spacing: f64) -> Self {
        self.config.layout.layer_spacing = layer_spacing;
        self.config.layout.node_spacing = node_spacing;
        self
    }

    pub fn with_done_color(mut self, color: &str) -> Self {
        self.config.colors.done = Some(color.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
