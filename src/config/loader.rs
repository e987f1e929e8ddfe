// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;
use crate::task::Task;

/// Load a task file from a given path and return the raw `RawConfigFile`.
///
/// Files ending in `.json` are read as a plain JSON array of tasks (the shape
/// a task API returns) with default layout and colors. Everything else is
/// parsed as TOML.
///
/// This only deserializes; use [`load_and_validate`] for the settings checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_contents(path, &contents)
}

/// Parse already-read file contents, choosing the format from `path`.
pub fn parse_contents(path: &Path, contents: &str) -> Result<RawConfigFile> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw = if is_json {
        let task: Vec<Task> = serde_json::from_str(contents)?;
        RawConfigFile {
            task,
            ..RawConfigFile::default()
        }
    } else {
        toml::from_str(contents)?
    };

    debug!(path = ?path, tasks = raw.task.len(), json = is_json, "parsed task file");
    Ok(raw)
}

/// Load a task file from path and validate its settings.
///
/// Task data is passed through untouched: duplicate ids, dangling
/// dependencies and cycles are the layout engine's business, not errors.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}
