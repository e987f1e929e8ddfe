// src/config/mod.rs

//! Task file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a task file from disk, TOML or JSON (`loader.rs`).
//! - Validate layout and color settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ColorSection, ConfigFile, LayoutSection, RawConfigFile};
pub use validate::validate_config;
