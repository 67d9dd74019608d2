//! Event fan-out engine.
//!
//! `dispatch` drives two passes over the same ordered event sequence:
//!
//! - the **sync pass** runs in the caller's task. For each event every
//!   supporting sync handler is spawned onto the runtime and the pass waits
//!   for all of them before moving to the next event. The first failure
//!   stops the pass and becomes the dispatch outcome.
//! - the **async pass** is a detached task with the same per-event barrier.
//!   Failures and panics are logged and the pass carries on. Nobody waits
//!   for it.
//!
//! Both passes must run inside a tokio runtime.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::{self, JoinSet};
use tracing::{Instrument, debug, debug_span, trace, warn};

use crate::error::{DispatchError, DomainError};
use crate::event::DomainEvent;
use crate::handler::{EventHandler, HandlerGroup};
use crate::registry::HandlerRegistry;

/// A handler invocation that did not succeed.
#[derive(Debug)]
struct HandlerFailure {
    handler: &'static str,
    error: Option<DomainError>,
}

impl HandlerFailure {
    fn log<E: DomainEvent>(&self, group: HandlerGroup, event: &E) {
        match &self.error {
            Some(error) => warn!(
                %group,
                handler = self.handler,
                event_type = event.event_type(),
                event_id = %event.event_id(),
                %error,
                "event handler failed"
            ),
            None => warn!(
                %group,
                handler = self.handler,
                event_type = event.event_type(),
                event_id = %event.event_id(),
                "event handler panicked"
            ),
        }
    }

    fn into_dispatch_error<E: DomainEvent>(self, event: &E) -> DispatchError {
        match self.error {
            Some(source) => DispatchError::HandlerFailed {
                handler: self.handler,
                event_type: event.event_type(),
                event_id: event.event_id(),
                source,
            },
            None => DispatchError::HandlerPanicked {
                handler: self.handler,
                event_type: event.event_type(),
                event_id: event.event_id(),
            },
        }
    }
}

/// Fans events out to the sync and async handler groups of a frozen registry.
#[derive(Debug)]
pub struct EventFanout<E: DomainEvent> {
    registry: Arc<HandlerRegistry<E>>,
}

impl<E: DomainEvent> EventFanout<E> {
    /// Takes ownership of a fully registered registry. No handler can be
    /// added afterwards.
    #[must_use]
    pub fn new(registry: HandlerRegistry<E>) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Read-only view of the registry.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry<E> {
        &self.registry
    }

    /// Dispatches `events` to both handler groups and resolves once the sync
    /// group has handled every event.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the sync group. Events after the failing
    /// one are not offered to sync handlers. The async group is unaffected.
    pub async fn dispatch(&self, events: Vec<E>) -> Result<(), DispatchError> {
        let events: Arc<[E]> = events.into();
        self.spawn_async_pass(Arc::clone(&events));
        self.run_sync_pass(&events).await
    }

    async fn run_sync_pass(&self, events: &Arc<[E]>) -> Result<(), DispatchError> {
        let handlers = self.registry.handlers_for(HandlerGroup::Sync);
        for (index, event) in events.iter().enumerate() {
            let failures = fan_out(handlers, events, index).await;
            for failure in &failures {
                failure.log(HandlerGroup::Sync, event);
            }
            if let Some(first) = failures.into_iter().next() {
                debug!(
                    skipped = events.len() - index - 1,
                    "sync pass stopped; remaining events skipped"
                );
                return Err(first.into_dispatch_error(event));
            }
        }
        Ok(())
    }

    fn spawn_async_pass(&self, events: Arc<[E]>) {
        if self.registry.handlers_for(HandlerGroup::Async).is_empty() {
            return;
        }
        let registry = Arc::clone(&self.registry);
        let span = debug_span!("async_pass", event_count = events.len());
        tokio::spawn(
            async move {
                let handlers = registry.handlers_for(HandlerGroup::Async);
                let mut failed = 0_usize;
                for (index, event) in events.iter().enumerate() {
                    for failure in fan_out(handlers, &events, index).await {
                        failed += 1;
                        failure.log(HandlerGroup::Async, event);
                    }
                }
                debug!(failed, "async pass finished");
            }
            .instrument(span),
        );
    }
}

/// Runs every handler that supports `events[index]` concurrently and waits
/// for all of them. Failures are returned in completion order.
async fn fan_out<E: DomainEvent>(
    handlers: &[Arc<dyn EventHandler<E>>],
    events: &Arc<[E]>,
    index: usize,
) -> Vec<HandlerFailure> {
    let event = &events[index];
    let mut tasks = JoinSet::new();
    let mut names: HashMap<task::Id, &'static str> = HashMap::new();

    for handler in handlers.iter().filter(|h| h.supports(event)) {
        let handler = Arc::clone(handler);
        let events = Arc::clone(events);
        let name = handler.name();
        let abort = tasks.spawn(async move { handler.handle(&events[index]).await });
        names.insert(abort.id(), name);
    }

    if tasks.is_empty() {
        trace!(
            event_type = event.event_type(),
            event_id = %event.event_id(),
            "no handler supports event"
        );
        return Vec::new();
    }
    trace!(
        event_type = event.event_type(),
        event_id = %event.event_id(),
        payload = %event.to_payload(),
        handlers = tasks.len(),
        "event offered to handlers"
    );

    let name_of = |id: task::Id| names.get(&id).copied().unwrap_or("<unknown>");
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_, Ok(()))) => {}
            Ok((id, Err(error))) => failures.push(HandlerFailure {
                handler: name_of(id),
                error: Some(error),
            }),
            Err(join_error) => failures.push(HandlerFailure {
                handler: name_of(join_error.id()),
                error: None,
            }),
        }
    }
    failures
}
