// src/engine/mod.rs

//! Layout engine service.
//!
//! The pure, synchronous layout service lives in [`core`]; the async shell
//! that sequences snapshots and publishes the latest layout is in
//! [`runtime`], with the last-write-wins rule in [`latest`].

use crate::task::TaskSnapshot;

/// Events flowing into the runtime from the task source.
#[derive(Debug, Clone)]
pub enum SnapshotEvent {
    /// The task collection changed; lay out this snapshot.
    Snapshot(TaskSnapshot),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    Shutdown,
}

pub mod core;
pub mod latest;
pub mod runtime;

pub use core::LayoutCore;
pub use latest::{LatestLayout, PublishedLayout};
pub use runtime::{LayoutReceiver, LayoutRuntime};
