// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod export;
pub mod logging;
pub mod palette;
pub mod task;
pub mod types;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::TaskGraph;
use crate::engine::{LayoutCore, LayoutRuntime, SnapshotEvent};

pub use crate::dag::{Edge, EdgeId, GraphLayout, LayoutSettings, Node, Position, compute_layout};
pub use crate::palette::{ColorToken, DefaultPalette, StatusPalette};
pub use crate::task::{Task, TaskId, TaskSnapshot};
pub use crate::types::TaskStatus;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - task file loading
/// - one-shot layout and output
/// - (optional) file watcher + layout runtime
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let tasks_path = PathBuf::from(&args.tasks);
    let cfg = load_and_validate(&tasks_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let core = LayoutCore::from_config(&cfg);

    if !args.watch {
        let layout = core.compute(&cfg.snapshot());
        print!("{}", export::render(&layout, args.format)?);
        return Ok(());
    }

    run_watch(core, cfg, tasks_path, args.format).await
}

/// `--watch` mode: lay out the initial snapshot, then every change to the
/// task file, printing each published layout until Ctrl-C.
async fn run_watch(
    core: LayoutCore,
    cfg: ConfigFile,
    tasks_path: PathBuf,
    format: OutputFormat,
) -> Result<()> {
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<SnapshotEvent>(16);
    let (runtime, mut published) = LayoutRuntime::new(core, snapshot_rx);
    let runtime_handle = tokio::spawn(runtime.run());

    snapshot_tx.send(SnapshotEvent::Snapshot(cfg.snapshot())).await?;

    let _watcher_handle = watch::spawn_watcher(tasks_path, snapshot_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = snapshot_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SnapshotEvent::Shutdown).await;
        });
    }
    drop(snapshot_tx);

    // Ends once the runtime stops and drops its sender.
    while published.changed().await.is_ok() {
        let current = published.borrow_and_update().clone();
        if let Some(p) = current {
            info!(generation = p.generation, "layout updated");
            print!("{}", export::render(&p.layout, format)?);
        }
    }

    runtime_handle.await??;
    Ok(())
}

/// Simple dry-run output: list tasks with their resolved relations.
fn print_dry_run(cfg: &ConfigFile) {
    let snapshot = cfg.snapshot();
    let graph = TaskGraph::build(snapshot.tasks());

    println!("taskgraph dry-run");
    println!(
        "  layout.layer_spacing = {}, layout.node_spacing = {}",
        cfg.layout.layer_spacing, cfg.layout.node_spacing
    );
    println!();

    println!("tasks ({} unique of {}):", graph.len(), cfg.task.len());
    for id in graph.tasks() {
        let Some(idx) = graph.index_of(id) else {
            continue;
        };
        let task = graph.task(idx);
        println!("  - {id}: {} [{}]", task.display_name(), task.status);

        let deps = graph.dependency_ids(id);
        if !deps.is_empty() {
            println!("      depends on: {:?}", deps);
        }
        let dependents = graph.dependent_ids(id);
        if !dependents.is_empty() {
            println!("      {} dependent tasks", dependents.len());
        }
    }

    let dropped = graph.dropped_references();
    if !dropped.is_empty() {
        println!();
        println!("skipped references ({}):", dropped.len());
        for d in dropped {
            println!("  - {} -> {} ({:?})", d.task, d.reference, d.reason);
        }
    }

    debug!("dry-run complete (no layout)");
}
