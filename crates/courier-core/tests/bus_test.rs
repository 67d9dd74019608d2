//! End-to-end behavior of `CommandBus::handle`.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use courier_core::error::{DispatchError, DomainError};
use courier_core::handler::HandlerGroup;
use courier_test_support::{
    FailingEventHandler, RecordingEventHandler, TestCommand, eventually,
};
use uuid::Uuid;

use common::{SETTLE, build_bus, registry};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unrouted_command_succeeds_without_invoking_handlers() {
    // Arrange
    let sync = Arc::new(RecordingEventHandler::new("sync"));
    let async_ = Arc::new(RecordingEventHandler::new("async"));
    let bus = build_bus(
        registry()
            .with(sync.clone(), HandlerGroup::Sync)
            .with(async_.clone(), HandlerGroup::Async),
    );
    let command = TestCommand::Unrouted {
        correlation_id: Uuid::new_v4(),
    };

    // Act
    let result = bus.handle(command).await;

    // Assert
    assert!(result.is_ok());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sync.invocations().is_empty());
    assert!(async_.invocations().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_command_without_events_succeeds_without_invoking_handlers() {
    // Arrange
    let sync = Arc::new(RecordingEventHandler::new("sync"));
    let async_ = Arc::new(RecordingEventHandler::new("async"));
    let bus = build_bus(
        registry()
            .with(sync.clone(), HandlerGroup::Sync)
            .with(async_.clone(), HandlerGroup::Async),
    );

    // Act
    let result = bus.handle(TestCommand::create(&[])).await;

    // Assert
    assert!(result.is_ok());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sync.invocations().is_empty());
    assert!(async_.invocations().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rejected_command_fails_and_dispatches_nothing() {
    // Arrange
    let sync = Arc::new(RecordingEventHandler::new("sync"));
    let async_ = Arc::new(RecordingEventHandler::new("async"));
    let bus = build_bus(
        registry()
            .with(sync.clone(), HandlerGroup::Sync)
            .with(async_.clone(), HandlerGroup::Async),
    );

    // Act
    let result = bus.handle(TestCommand::create(&["a", "reject"])).await;

    // Assert
    match result {
        Err(DispatchError::CommandRejected {
            command_type,
            source,
        }) => {
            assert_eq!(command_type, "test.create");
            assert_eq!(source, DomainError::Validation("rejected by script".into()));
        }
        other => panic!("expected CommandRejected, got {other:?}"),
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sync.invocations().is_empty());
    assert!(async_.invocations().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_event_reaches_both_groups() {
    // Arrange
    let sync = Arc::new(RecordingEventHandler::new("sync"));
    let async_ = Arc::new(RecordingEventHandler::new("async"));
    let bus = build_bus(
        registry()
            .with(sync.clone(), HandlerGroup::Sync)
            .with(async_.clone(), HandlerGroup::Async),
    );

    // Act
    let result = bus.handle(TestCommand::create(&["a", "b", "c"])).await;

    // Assert
    assert!(result.is_ok());
    assert_eq!(sync.handled_keys(), vec!["a", "b", "c"]);
    assert!(eventually(SETTLE, || async_.handled_keys().len() == 3).await);
    assert_eq!(async_.handled_keys(), vec!["a", "b", "c"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_handle_resolves_after_projection_before_slow_indexer() {
    // Arrange
    let projection = Arc::new(RecordingEventHandler::new("projection"));
    let indexer = Arc::new(
        RecordingEventHandler::new("indexer").with_delay(Duration::from_millis(300)),
    );
    let bus = build_bus(
        registry()
            .with(projection.clone(), HandlerGroup::Sync)
            .with(indexer.clone(), HandlerGroup::Async),
    );

    // Act
    let result = bus.handle(TestCommand::create(&["x"])).await;

    // Assert
    assert!(result.is_ok());
    assert_eq!(projection.handled_keys(), vec!["x"]);
    assert!(indexer.handled_keys().is_empty());
    assert!(eventually(SETTLE, || indexer.handled_keys() == vec!["x"]).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_handle_latency_is_independent_of_async_latency() {
    // Arrange
    let sync = Arc::new(RecordingEventHandler::new("sync"));
    let slow = Arc::new(RecordingEventHandler::new("slow").with_delay(Duration::from_secs(1)));
    let bus = build_bus(
        registry()
            .with(sync.clone(), HandlerGroup::Sync)
            .with(slow.clone(), HandlerGroup::Async),
    );

    // Act
    let started = Instant::now();
    let result = bus.handle(TestCommand::create(&["a", "b"])).await;
    let elapsed = started.elapsed();

    // Assert
    assert!(result.is_ok());
    assert!(
        elapsed < Duration::from_millis(500),
        "handle waited on async group: {elapsed:?}"
    );
    assert!(slow.invocations().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_async_failure_does_not_fail_handle() {
    // Arrange
    let broken = Arc::new(FailingEventHandler::new("broken"));
    let sibling = Arc::new(RecordingEventHandler::new("sibling"));
    let sync = Arc::new(RecordingEventHandler::new("sync"));
    let bus = build_bus(
        registry()
            .with(sync.clone(), HandlerGroup::Sync)
            .with(broken.clone(), HandlerGroup::Async)
            .with(sibling.clone(), HandlerGroup::Async),
    );

    // Act
    let result = bus.handle(TestCommand::create(&["a", "b"])).await;

    // Assert
    assert!(result.is_ok());
    assert_eq!(sync.handled_keys(), vec!["a", "b"]);
    assert!(eventually(SETTLE, || sibling.handled_keys().len() == 2).await);
    assert_eq!(sibling.handled_keys(), vec!["a", "b"]);
    assert!(eventually(SETTLE, || broken.calls() == 2).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sync_failure_is_the_handle_outcome() {
    // Arrange
    let broken = Arc::new(FailingEventHandler::new("broken").only(&["b"]));
    let bus = build_bus(registry().with(broken.clone(), HandlerGroup::Sync));

    // Act
    let result = bus.handle(TestCommand::create(&["a", "b"])).await;

    // Assert
    match result {
        Err(DispatchError::HandlerFailed {
            handler,
            event_type,
            source,
            ..
        }) => {
            assert_eq!(handler, "broken");
            assert_eq!(event_type, "test.created");
            assert_eq!(
                source,
                DomainError::Infrastructure("broken refused b".into())
            );
        }
        other => panic!("expected HandlerFailed, got {other:?}"),
    }
    assert_eq!(broken.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_handles_are_independent() {
    // Arrange
    let sync = Arc::new(RecordingEventHandler::new("sync").with_delay(Duration::from_millis(20)));
    let bus = Arc::new(build_bus(registry().with(sync.clone(), HandlerGroup::Sync)));

    // Act
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let bus = Arc::clone(&bus);
        let key = format!("k{i}");
        tasks.spawn(async move { bus.handle(TestCommand::create(&[key.as_str()])).await });
    }
    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.unwrap());
    }

    // Assert
    assert_eq!(outcomes.len(), 8);
    assert!(outcomes.iter().all(Result::is_ok));
    let mut keys = sync.handled_keys();
    keys.sort();
    let mut expected: Vec<String> = (0..8).map(|i| format!("k{i}")).collect();
    expected.sort();
    assert_eq!(keys, expected);
}
