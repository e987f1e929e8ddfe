// src/config/model.rs

use serde::Deserialize;

use crate::dag::layout::{LAYER_SPACING, LayoutSettings, NODE_SPACING};
use crate::task::{Task, TaskSnapshot};

/// Validated task file.
///
/// Use [`crate::config::load_and_validate`] (or `TryFrom<RawConfigFile>`)
/// to construct one; the fields mirror [`RawConfigFile`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub layout: LayoutSection,
    pub colors: ColorSection,
    pub task: Vec<Task>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(layout: LayoutSection, colors: ColorSection, task: Vec<Task>) -> Self {
        Self {
            layout,
            colors,
            task,
        }
    }

    /// Immutable snapshot of the tasks, in file order.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot::new(self.task.clone())
    }

    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            layer_spacing: self.layout.layer_spacing,
            node_spacing: self.layout.node_spacing,
        }
    }
}

/// Task file exactly as deserialized, before validation.
///
/// ```toml
/// [layout]
/// layer_spacing = 300.0
/// node_spacing = 120.0
///
/// [colors]
/// done = "green"
/// default = "gray"
///
/// [[task]]
/// id = "api"
/// name = "Build API"
/// status = "in_progress"
/// dependencies = ["schema"]
/// ```
///
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub colors: ColorSection,

    /// Tasks from `[[task]]` tables, in file order.
    #[serde(default)]
    pub task: Vec<Task>,
}

/// `[layout]` section.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutSection {
    /// Horizontal distance between dependency layers.
    #[serde(default = "default_layer_spacing")]
    pub layer_spacing: f64,

    /// Vertical distance between nodes in the same layer.
    #[serde(default = "default_node_spacing")]
    pub node_spacing: f64,
}

fn default_layer_spacing() -> f64 {
    LAYER_SPACING
}

fn default_node_spacing() -> f64 {
    NODE_SPACING
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            layer_spacing: default_layer_spacing(),
            node_spacing: default_node_spacing(),
        }
    }
}

/// `[colors]` section: per-status color overrides.
///
/// `default` applies to statuses the palette does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColorSection {
    #[serde(default)]
    pub todo: Option<String>,
    #[serde(default)]
    pub in_progress: Option<String>,
    #[serde(default)]
    pub done: Option<String>,
    #[serde(default)]
    pub blocked: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
}
