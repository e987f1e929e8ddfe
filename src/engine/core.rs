// src/engine/core.rs

//! Pure core layout service.
//!
//! [`LayoutCore`] bundles the layout settings and the status palette and turns
//! task snapshots into layouts. It is synchronous and holds no mutable state,
//! so one instance can be shared across threads and computations.
//!
//! The core is where cycle fallbacks become visible: every dependency dropped
//! to break a cycle is logged at `warn` as a data-quality signal.

use std::fmt;

use tracing::{info, warn};

use crate::config::model::ConfigFile;
use crate::dag::{GraphLayout, LayoutSettings, compute_layout};
use crate::palette::{ConfiguredPalette, StatusPalette};
use crate::task::TaskSnapshot;

pub struct LayoutCore {
    settings: LayoutSettings,
    palette: Box<dyn StatusPalette + Send + Sync>,
}

impl fmt::Debug for LayoutCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCore")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl LayoutCore {
    pub fn new(settings: LayoutSettings, palette: impl StatusPalette + Send + Sync + 'static) -> Self {
        Self {
            settings,
            palette: Box::new(palette),
        }
    }

    /// Core configured from the `[layout]` and `[colors]` sections.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.layout_settings(), ConfiguredPalette::from_section(&cfg.colors))
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn palette(&self) -> &(dyn StatusPalette + Send + Sync) {
        self.palette.as_ref()
    }

    /// Lay out one snapshot.
    pub fn compute(&self, snapshot: &TaskSnapshot) -> GraphLayout {
        let layout = compute_layout(snapshot, &self.settings, self.palette.as_ref());

        for edge in &layout.dropped_back_edges {
            warn!(
                from = %edge.from,
                to = %edge.to,
                "dependency cycle: ignoring dependency to keep the layout acyclic"
            );
        }

        info!(
            tasks = snapshot.len(),
            nodes = layout.nodes.len(),
            edges = layout.edges.len(),
            dropped_back_edges = layout.dropped_back_edges.len(),
            "layout computed"
        );

        layout
    }
}
