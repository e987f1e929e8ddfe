// src/export/mod.rs

//! Serialising a computed layout for the outside world.
//!
//! - [`text`]: human readable listing, for terminals.
//! - [`json`]: node and edge descriptors for a rendering surface.
//! - [`dot`]: Graphviz, with nodes pinned at their computed positions.

pub mod dot;
pub mod json;
pub mod text;

use crate::cli::OutputFormat;
use crate::dag::GraphLayout;
use crate::errors::Result;

/// Render `layout` in the requested format.
pub fn render(layout: &GraphLayout, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_text(layout)),
        OutputFormat::Json => json::render_json(layout),
        OutputFormat::Dot => Ok(dot::render_dot(layout)),
    }
}
