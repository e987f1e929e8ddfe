// src/config/validate.rs

use crate::config::model::{ColorSection, ConfigFile, LayoutSection, RawConfigFile};
use crate::errors::{Result, TaskGraphError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TaskGraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.layout, raw.colors, raw.task))
    }
}

/// Check layout and color settings.
///
/// Tasks are deliberately not inspected here.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_layout(&cfg.layout)?;
    validate_colors(&cfg.colors)?;
    Ok(())
}

fn validate_layout(layout: &LayoutSection) -> Result<()> {
    check_spacing("layer_spacing", layout.layer_spacing)?;
    check_spacing("node_spacing", layout.node_spacing)?;
    Ok(())
}

fn check_spacing(key: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TaskGraphError::ConfigError(format!(
            "[layout].{key} must be a positive number (got {value})"
        )));
    }
    Ok(())
}

fn validate_colors(colors: &ColorSection) -> Result<()> {
    let entries = [
        ("todo", &colors.todo),
        ("in_progress", &colors.in_progress),
        ("done", &colors.done),
        ("blocked", &colors.blocked),
        ("default", &colors.default),
    ];

    for (key, value) in entries {
        if let Some(color) = value {
            if color.trim().is_empty() {
                return Err(TaskGraphError::ConfigError(format!(
                    "[colors].{key} must not be empty"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    #[test]
    fn rejects_non_positive_spacing() {
        let raw = RawConfigFile {
            layout: LayoutSection {
                layer_spacing: 0.0,
                ..LayoutSection::default()
            },
            ..RawConfigFile::default()
        };
        match ConfigFile::try_from(raw) {
            Err(TaskGraphError::ConfigError(msg)) => assert!(msg.contains("layer_spacing")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_nan_spacing() {
        let raw = RawConfigFile {
            layout: LayoutSection {
                node_spacing: f64::NAN,
                ..LayoutSection::default()
            },
            ..RawConfigFile::default()
        };
        assert!(ConfigFile::try_from(raw).is_err());
    }

    #[test]
    fn rejects_blank_color() {
        let raw = RawConfigFile {
            colors: ColorSection {
                done: Some("  ".to_string()),
                ..ColorSection::default()
            },
            ..RawConfigFile::default()
        };
        assert!(ConfigFile::try_from(raw).is_err());
    }

    #[test]
    fn task_data_is_not_validated() {
        let mut looping = Task::new("a");
        looping.dependencies = vec!["a".to_string(), "missing".to_string()];
        let raw = RawConfigFile {
            task: vec![looping, Task::new("a")],
            ..RawConfigFile::default()
        };
        let cfg = ConfigFile::try_from(raw).unwrap();
        assert_eq!(cfg.task.len(), 2);
    }
}
