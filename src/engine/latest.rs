// src/engine/latest.rs

//! Last-write-wins slot for the externally observed "current layout".

use std::sync::Arc;

use tracing::debug;

use crate::dag::GraphLayout;

/// A layout tagged with the generation of the snapshot it was computed from.
#[derive(Debug, Clone)]
pub struct PublishedLayout {
    pub generation: u64,
    pub layout: Arc<GraphLayout>,
}

/// Holds the newest published layout and rejects anything older.
///
/// Generations are assigned in snapshot arrival order, so a computation that
/// finishes after a newer one has already been published is stale and is
/// dropped rather than merged.
#[derive(Debug, Default)]
pub struct LatestLayout {
    current: Option<PublishedLayout>,
}

impl LatestLayout {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Offer a freshly computed layout. Returns `true` if it became current.
    pub fn offer(&mut self, candidate: PublishedLayout) -> bool {
        if let Some(current) = &self.current {
            if candidate.generation <= current.generation {
                debug!(
                    stale = candidate.generation,
                    current = current.generation,
                    "discarding stale layout"
                );
                return false;
            }
        }
        self.current = Some(candidate);
        true
    }

    pub fn current(&self) -> Option<&PublishedLayout> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> Option<u64> {
        self.current.as_ref().map(|p| p.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published(generation: u64) -> PublishedLayout {
        PublishedLayout {
            generation,
            layout: Arc::new(GraphLayout::default()),
        }
    }

    #[test]
    fn newer_generation_replaces_current() {
        let mut slot = LatestLayout::new();
        assert!(slot.offer(published(1)));
        assert!(slot.offer(published(3)));
        assert_eq!(slot.generation(), Some(3));
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut slot = LatestLayout::new();
        assert!(slot.offer(published(5)));
        assert!(!slot.offer(published(4)));
        assert!(!slot.offer(published(5)));
        assert_eq!(slot.generation(), Some(5));
    }

    #[test]
    fn starts_empty() {
        let slot = LatestLayout::default();
        assert!(slot.current().is_none());
    }
}
