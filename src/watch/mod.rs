// src/watch/mod.rs

//! Task file watching.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) on the task file.
//! - Content fingerprinting with `blake3`, so that only real edits produce a
//!   new snapshot.
//!
//! It does **not** compute layouts; it only turns file edits into
//! [`crate::engine::SnapshotEvent`]s.

pub mod fingerprint;
pub mod watcher;

pub use fingerprint::{ContentFingerprint, compute_file_hash, hash_bytes};
pub use watcher::{WatcherHandle, spawn_watcher};
