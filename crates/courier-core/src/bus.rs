//! Command bus facade.

use tracing::{debug, instrument};

use crate::command::Command;
use crate::error::DispatchError;
use crate::event::DomainEvent;
use crate::fanout::EventFanout;
use crate::registry::HandlerRegistry;
use crate::router::CommandRouter;

/// Routes a command to its handler and fans the produced events out.
///
/// Both the router and the registry are frozen on construction. The bus is
/// cheap to share behind an `Arc` and may handle any number of commands
/// concurrently; calls do not coordinate with each other.
#[derive(Debug)]
pub struct CommandBus<C: Command, E: DomainEvent> {
    router: CommandRouter<C, E>,
    fanout: EventFanout<E>,
}

impl<C: Command, E: DomainEvent> CommandBus<C, E> {
    /// Creates a bus from a configured router and handler registry.
    #[must_use]
    pub fn new(router: CommandRouter<C, E>, registry: HandlerRegistry<E>) -> Self {
        Self {
            router,
            fanout: EventFanout::new(registry),
        }
    }

    /// Handles one command end to end.
    ///
    /// Resolves once every sync handler has processed every produced event.
    /// Async handlers may still be running when this returns.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::CommandRejected` if the command handler fails,
    /// or the first sync handler failure from the fan-out.
    #[instrument(
        skip_all,
        fields(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id(),
        )
    )]
    pub async fn handle(&self, command: C) -> Result<(), DispatchError> {
        let events = self
            .router
            .route(&command)
            .map_err(|source| DispatchError::CommandRejected {
                command_type: command.command_type(),
                source,
            })?;

        if events.is_empty() {
            debug!("command produced no events");
            return Ok(());
        }

        // Events are not persisted before dispatch. A durable variant appends
        // them to an event log here for at-least-once delivery across restarts.
        debug!(event_count = events.len(), "dispatching events");
        self.fanout.dispatch(events).await
    }
}
