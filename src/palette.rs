// src/palette.rs

//! Status → color mapping used to paint edges.
//!
//! The edge deriver never decides colors itself; it calls a
//! [`StatusPalette`] once per edge. Any `Fn(&TaskStatus) -> ColorToken`
//! closure is a palette, as are [`DefaultPalette`] and the `[colors]`-driven
//! [`ConfiguredPalette`].

use crate::config::model::ColorSection;
use crate::types::TaskStatus;

/// Opaque color token handed to the renderer (e.g. `"green"`, `"#22c55e"`).
pub type ColorToken = String;

/// Pure, total mapping from task status to a color token.
pub trait StatusPalette {
    fn color_for(&self, status: &TaskStatus) -> ColorToken;
}

impl<F> StatusPalette for F
where
    F: Fn(&TaskStatus) -> ColorToken,
{
    fn color_for(&self, status: &TaskStatus) -> ColorToken {
        self(status)
    }
}

pub const TODO_COLOR: &str = "gray";
pub const IN_PROGRESS_COLOR: &str = "darkorange";
pub const DONE_COLOR: &str = "green";
pub const BLOCKED_COLOR: &str = "red";
pub const FALLBACK_COLOR: &str = "gray";

/// Built-in palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPalette;

impl StatusPalette for DefaultPalette {
    fn color_for(&self, status: &TaskStatus) -> ColorToken {
        let color = match status {
            TaskStatus::Todo => TODO_COLOR,
            TaskStatus::InProgress => IN_PROGRESS_COLOR,
            TaskStatus::Done => DONE_COLOR,
            TaskStatus::Blocked => BLOCKED_COLOR,
            TaskStatus::Other(_) => FALLBACK_COLOR,
        };
        color.to_string()
    }
}

/// Palette built from a `[colors]` config section.
///
/// Statuses without an override use the built-in colors; unknown statuses use
/// `default` (or the built-in fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredPalette {
    todo: ColorToken,
    in_progress: ColorToken,
    done: ColorToken,
    blocked: ColorToken,
    fallback: ColorToken,
}

impl ConfiguredPalette {
    pub fn from_section(section: &ColorSection) -> Self {
        let pick = |value: &Option<String>, builtin: &str| {
            value.clone().unwrap_or_else(|| builtin.to_string())
        };
        Self {
            todo: pick(&section.todo, TODO_COLOR),
            in_progress: pick(&section.in_progress, IN_PROGRESS_COLOR),
            done: pick(&section.done, DONE_COLOR),
            blocked: pick(&section.blocked, BLOCKED_COLOR),
            fallback: pick(&section.default, FALLBACK_COLOR),
        }
    }
}

impl Default for ConfiguredPalette {
    fn default() -> Self {
        Self::from_section(&ColorSection::default())
    }
}

impl StatusPalette for ConfiguredPalette {
    fn color_for(&self, status: &TaskStatus) -> ColorToken {
        match status {
            TaskStatus::Todo => self.todo.clone(),
            TaskStatus::InProgress => self.in_progress.clone(),
            TaskStatus::Done => self.done.clone(),
            TaskStatus::Blocked => self.blocked.clone(),
            TaskStatus::Other(_) => self.fallback.clone(),
        }
    }
}
