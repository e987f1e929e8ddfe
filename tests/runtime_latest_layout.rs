// tests/runtime_latest_layout.rs

use taskgraph_test_utils::builders::{ConfigFileBuilder, SnapshotBuilder, TaskBuilder};
use taskgraph_test_utils::{init_tracing, with_timeout};

use std::error::Error;

use tokio::sync::mpsc;

use taskgraph::engine::{LayoutCore, LayoutRuntime, SnapshotEvent};
use taskgraph::{DefaultPalette, LayoutSettings, TaskStatus};

type TestResult = Result<(), Box<dyn Error>>;

fn core() -> LayoutCore {
    LayoutCore::new(LayoutSettings::default(), DefaultPalette)
}

#[tokio::test]
async fn queued_snapshots_publish_only_the_newest() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel(16);
    let (runtime, mut published) = LayoutRuntime::new(core(), rx);

    tx.send(SnapshotEvent::Snapshot(SnapshotBuilder::new().with("first", &[]).build()))
        .await?;
    tx.send(SnapshotEvent::Snapshot(SnapshotBuilder::new().with("second", &[]).build()))
        .await?;
    tx.send(SnapshotEvent::Snapshot(
        SnapshotBuilder::new()
            .with("third", &[])
            .with("fourth", &["third"])
            .build(),
    ))
    .await?;

    let handle = tokio::spawn(runtime.run());

    let latest = with_timeout(async {
        published
            .wait_for(|p| p.as_ref().is_some_and(|p| p.generation == 3))
            .await
            .map(|p| (*p).clone())
    })
    .await?;

    let latest = latest.expect("layout published");
    assert_eq!(latest.layout.nodes.len(), 2);
    assert!(latest.layout.node("third").is_some());
    assert!(latest.layout.node("first").is_none());
    assert_eq!(latest.layout.edges[0].id.to_string(), "fourth-third");

    tx.send(SnapshotEvent::Shutdown).await?;
    with_timeout(handle).await??;

    Ok(())
}

#[tokio::test]
async fn each_spaced_snapshot_is_published_in_order() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel(16);
    let (runtime, mut published) = LayoutRuntime::new(core(), rx);
    let handle = tokio::spawn(runtime.run());

    for (round, status) in [TaskStatus::Todo, TaskStatus::Done].into_iter().enumerate() {
        let snapshot = SnapshotBuilder::new()
            .with_task(TaskBuilder::new("db").status(status).build())
            .with("api", &["db"])
            .build();
        tx.send(SnapshotEvent::Snapshot(snapshot)).await?;

        let generation = round as u64 + 1;
        with_timeout(published.wait_for(|p| {
            p.as_ref().is_some_and(|p| p.generation >= generation)
        }))
        .await?;
    }

    let current = published.borrow().clone().expect("layout published");
    assert_eq!(current.generation, 2);
    assert_eq!(current.layout.edges[0].color, "green");

    tx.send(SnapshotEvent::Shutdown).await?;
    with_timeout(handle).await??;

    Ok(())
}

#[tokio::test]
async fn closing_the_channel_drains_and_stops() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_task(TaskBuilder::new("a").build())
        .with_task(TaskBuilder::new("b").depends_on("a").build())
        .with_spacing(50.0, 20.0)
        .with_done_color("lime")
        .build();

    let (tx, rx) = mpsc::channel(4);
    let (runtime, published) = LayoutRuntime::new(LayoutCore::from_config(&cfg), rx);

    tx.send(SnapshotEvent::Snapshot(cfg.snapshot())).await?;
    drop(tx);

    with_timeout(runtime.run()).await?;

    let current = published.borrow().clone().expect("layout published before exit");
    assert_eq!(current.generation, 1);
    assert_eq!(current.layout.node("b").unwrap().position.x, 50.0);

    Ok(())
}

#[tokio::test]
async fn shutdown_before_any_snapshot_publishes_nothing() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel(4);
    let (runtime, published) = LayoutRuntime::new(core(), rx);

    tx.send(SnapshotEvent::Shutdown).await?;
    with_timeout(runtime.run()).await?;

    assert!(published.borrow().is_none());
    Ok(())
}
