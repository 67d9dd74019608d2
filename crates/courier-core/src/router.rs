//! Command dispatch router.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::command::Command;
use crate::error::DomainError;
use crate::event::DomainEvent;
use crate::handler::CommandHandler;

/// Routes a command to the first registered handler that supports it.
pub struct CommandRouter<C: Command, E: DomainEvent> {
    handlers: Vec<Arc<dyn CommandHandler<C, E>>>,
}

impl<C: Command, E: DomainEvent> CommandRouter<C, E> {
    /// Creates a router with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a command handler. Earlier registrations win.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler<C, E>>) {
        self.handlers.push(handler);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, handler: Arc<dyn CommandHandler<C, E>>) -> Self {
        self.register(handler);
        self
    }

    /// Routes `command` and returns the events produced by the matched
    /// handler. An unsupported command yields no events.
    ///
    /// # Errors
    ///
    /// Returns the matched handler's `DomainError` if it rejects the command.
    pub fn route(&self, command: &C) -> Result<Vec<E>, DomainError> {
        let Some(handler) = self.handlers.iter().find(|h| h.supports(command)) else {
            debug!(
                command_type = command.command_type(),
                correlation_id = %command.correlation_id(),
                "no handler supports command; ignoring"
            );
            return Ok(Vec::new());
        };

        let events = handler.handle(command)?;
        trace!(
            command_type = command.command_type(),
            handler = handler.name(),
            event_count = events.len(),
            "command handled"
        );
        Ok(events)
    }
}

impl<C: Command, E: DomainEvent> Default for CommandRouter<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command, E: DomainEvent> fmt::Debug for CommandRouter<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|h| h.name()))
            .finish()
    }
}
