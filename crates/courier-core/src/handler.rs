//! Handler contracts.
//!
//! Handlers opt in to the commands and events they care about through
//! `supports`. Matching is a variant test on the concrete command or event
//! enum, never a comparison of type-name strings.

use std::fmt;

use async_trait::async_trait;

use crate::command::Command;
use crate::error::DomainError;
use crate::event::DomainEvent;

/// Turns a command into the domain events it produces.
///
/// Command handlers hold no mutable state across calls and never dispatch
/// events themselves; they only return them.
pub trait CommandHandler<C: Command, E: DomainEvent>: Send + Sync {
    /// Name used in diagnostics. Defaults to the Rust type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns `true` if this handler accepts the command.
    fn supports(&self, command: &C) -> bool;

    /// Handles the command, returning the produced events in order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the command is rejected.
    fn handle(&self, command: &C) -> Result<Vec<E>, DomainError>;
}

/// Reacts to a domain event.
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Name used in diagnostics. Defaults to the Rust type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns `true` if this handler wants to see the event.
    fn supports(&self, event: &E) -> bool;

    /// Handles the event. This is the only point where dispatch may suspend.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the side effect could not be applied.
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// Concurrency class an event handler is registered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerGroup {
    /// Completion gates the outcome returned to the caller.
    Sync,
    /// Runs detached; failures are logged only.
    Async,
}

impl fmt::Display for HandlerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => f.write_str("sync"),
            Self::Async => f.write_str("async"),
        }
    }
}
