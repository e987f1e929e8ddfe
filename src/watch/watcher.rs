// src/watch/watcher.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::loader::parse_contents;
use crate::config::model::ConfigFile;
use crate::engine::SnapshotEvent;
use crate::task::TaskSnapshot;
use crate::watch::fingerprint::{ContentFingerprint, compute_file_hash, hash_bytes};

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch the task file at `path` and send a new snapshot to `snapshot_tx`
/// whenever its content changes.
///
/// The parent directory is watched rather than the file itself, because
/// editors commonly save by writing a new file and renaming it over the old
/// one. Files that fail to parse are logged and skipped; the previous layout
/// stays current.
pub fn spawn_watcher(
    path: impl Into<PathBuf>,
    snapshot_tx: mpsc::Sender<SnapshotEvent>,
) -> Result<WatcherHandle> {
    let path = path.into();
    let path = path.canonicalize().unwrap_or(path);
    let file_name: OsString = path
        .file_name()
        .context("task file path has no file name")?
        .to_os_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    // Seed with the current content so the initial load is not re-sent.
    let mut fingerprint = match compute_file_hash(&path) {
        Ok(hash) => ContentFingerprint::with_hash(hash),
        Err(err) => {
            debug!(error = %err, "could not hash task file at startup");
            ContentFingerprint::new()
        }
    };

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("taskgraph: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("taskgraph: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    info!("watching task file {:?}", path);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let touches_file = event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()));
            if !touches_file {
                continue;
            }
            debug!(?event, "task file event");

            let Some(snapshot) = reload(&path, &mut fingerprint) else {
                continue;
            };
            if snapshot_tx.send(SnapshotEvent::Snapshot(snapshot)).await.is_err() {
                debug!("layout runtime gone; stopping watcher loop");
                break;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Re-read the task file; returns a snapshot only if its content changed and
/// it parsed.
fn reload(path: &Path, fingerprint: &mut ContentFingerprint) -> Option<TaskSnapshot> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            // Usually a save in progress; the rename event follows.
            debug!(error = %err, "task file not readable yet");
            return None;
        }
    };

    if !fingerprint.update(hash_bytes(contents.as_bytes())) {
        return None;
    }

    match parse_contents(path, &contents).and_then(ConfigFile::try_from) {
        Ok(cfg) => {
            info!(tasks = cfg.task.len(), "task file changed; recomputing layout");
            Some(cfg.snapshot())
        }
        Err(err) => {
            warn!(error = %err, "task file changed but could not be loaded; keeping previous layout");
            None
        }
    }
}
