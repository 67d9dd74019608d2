//! Shared helpers for dispatch integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use courier_core::bus::CommandBus;
use courier_core::registry::HandlerRegistry;
use courier_core::router::CommandRouter;
use courier_test_support::{ScriptedCommandHandler, TestCommand, TestEvent};

/// Upper bound for waiting on detached async handlers.
pub const SETTLE: Duration = Duration::from_secs(2);

/// Build a bus routing `TestCommand`s through `ScriptedCommandHandler`.
pub fn build_bus(registry: HandlerRegistry<TestEvent>) -> CommandBus<TestCommand, TestEvent> {
    let router = CommandRouter::new().with(Arc::new(ScriptedCommandHandler));
    CommandBus::new(router, registry)
}

/// An empty registry for `TestEvent`s.
pub fn registry() -> HandlerRegistry<TestEvent> {
    HandlerRegistry::new()
}
