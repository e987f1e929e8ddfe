// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::task::TaskSnapshot;

use super::core::LayoutCore;
use super::latest::{LatestLayout, PublishedLayout};
use super::SnapshotEvent;

/// Receiving end of the published layout stream.
pub type LayoutReceiver = watch::Receiver<Option<PublishedLayout>>;

/// Async shell around [`LayoutCore`].
///
/// Receives task snapshots, computes their layouts off the async threads and
/// publishes the newest result on a `watch` channel:
/// - snapshots already queued behind a newer one are skipped;
/// - a computation still in flight when a newer snapshot arrives keeps
///   running, but its result is discarded by the generation check.
pub struct LayoutRuntime {
    core: Arc<LayoutCore>,
    event_rx: mpsc::Receiver<SnapshotEvent>,
    publish_tx: watch::Sender<Option<PublishedLayout>>,
    latest: LatestLayout,
    generation: u64,
}

impl fmt::Debug for LayoutRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRuntime")
            .field("core", &self.core)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl LayoutRuntime {
    pub fn new(core: LayoutCore, event_rx: mpsc::Receiver<SnapshotEvent>) -> (Self, LayoutReceiver) {
        let (publish_tx, publish_rx) = watch::channel(None);
        let runtime = Self {
            core: Arc::new(core),
            event_rx,
            publish_tx,
            latest: LatestLayout::new(),
            generation: 0,
        };
        (runtime, publish_rx)
    }

    /// Main event loop.
    ///
    /// Runs until `Shutdown` is received, or until the event channel closes
    /// and every in-flight computation has finished.
    pub async fn run(mut self) -> Result<()> {
        info!("layout runtime started");

        let mut in_flight: JoinSet<PublishedLayout> = JoinSet::new();
        let mut open = true;

        loop {
            tokio::select! {
                event = self.event_rx.recv(), if open => match event {
                    Some(SnapshotEvent::Snapshot(snapshot)) => {
                        let Some(snapshot) = self.coalesce(snapshot) else {
                            info!("shutdown requested; stopping layout runtime");
                            break;
                        };
                        self.generation += 1;
                        let generation = self.generation;
                        let core = Arc::clone(&self.core);
                        debug!(generation, tasks = snapshot.len(), "starting layout computation");
                        in_flight.spawn_blocking(move || PublishedLayout {
                            generation,
                            layout: Arc::new(core.compute(&snapshot)),
                        });
                    }
                    Some(SnapshotEvent::Shutdown) => {
                        info!("shutdown requested; stopping layout runtime");
                        break;
                    }
                    None => {
                        debug!("snapshot channel closed; draining in-flight layouts");
                        open = false;
                    }
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                    Ok(published) => self.publish(published),
                    Err(err) => warn!(error = %err, "layout computation did not complete"),
                },
                else => break,
            }
        }

        info!("layout runtime exiting");
        Ok(())
    }

    /// Skip over snapshots that are already superseded in the channel.
    ///
    /// Returns `None` if a shutdown is queued behind `snapshot`.
    fn coalesce(&mut self, mut snapshot: TaskSnapshot) -> Option<TaskSnapshot> {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                SnapshotEvent::Snapshot(newer) => {
                    // Skipped snapshots still consume a generation.
                    self.generation += 1;
                    debug!(skipped = self.generation, "superseded snapshot skipped");
                    snapshot = newer;
                }
                SnapshotEvent::Shutdown => return None,
            }
        }
        Some(snapshot)
    }

    fn publish(&mut self, published: PublishedLayout) {
        if self.latest.offer(published.clone()) {
            debug!(generation = published.generation, "publishing layout");
            self.publish_tx.send_replace(Some(published));
        }
    }
}
