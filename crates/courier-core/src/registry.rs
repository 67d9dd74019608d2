//! Handler registry.
//!
//! Two ordered lists of event handlers, one per `HandlerGroup`. The registry
//! is filled during start-up while it is still owned by the wiring code; once
//! handed to `EventFanout::new` it is frozen behind an `Arc` and only read.

use std::fmt;
use std::sync::Arc;

use crate::event::DomainEvent;
use crate::handler::{EventHandler, HandlerGroup};

/// Ordered sync and async event handler lists.
pub struct HandlerRegistry<E: DomainEvent> {
    sync: Vec<Arc<dyn EventHandler<E>>>,
    async_: Vec<Arc<dyn EventHandler<E>>>,
}

impl<E: DomainEvent> HandlerRegistry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sync: Vec::new(),
            async_: Vec::new(),
        }
    }

    /// Appends a handler to the given group. Registration order is the
    /// invocation order within the group.
    pub fn register(&mut self, handler: Arc<dyn EventHandler<E>>, group: HandlerGroup) {
        match group {
            HandlerGroup::Sync => self.sync.push(handler),
            HandlerGroup::Async => self.async_.push(handler),
        }
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, handler: Arc<dyn EventHandler<E>>, group: HandlerGroup) -> Self {
        self.register(handler, group);
        self
    }

    /// Returns the handlers registered into `group`, in registration order.
    #[must_use]
    pub fn handlers_for(&self, group: HandlerGroup) -> &[Arc<dyn EventHandler<E>>] {
        match group {
            HandlerGroup::Sync => &self.sync,
            HandlerGroup::Async => &self.async_,
        }
    }

    /// Total number of registered handlers across both groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sync.len() + self.async_.len()
    }

    /// Returns `true` if no handler is registered in either group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: DomainEvent> Default for HandlerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> fmt::Debug for HandlerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |handlers: &[Arc<dyn EventHandler<E>>]| {
            handlers.iter().map(|h| h.name()).collect::<Vec<_>>()
        };
        f.debug_struct("HandlerRegistry")
            .field("sync", &names(&self.sync))
            .field("async", &names(&self.async_))
            .finish()
    }
}
