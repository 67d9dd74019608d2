//! Domain and dispatch error types.

use thiserror::Error;
use uuid::Uuid;

/// Error returned by command and event handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// Something the handler needed does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An infrastructure/side-effect error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

/// Failure outcome of handling a command on the bus.
///
/// Only the synchronous handler group can produce one of these. Failures in
/// the asynchronous group are logged and never reach the caller.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command handler rejected the command; no events were dispatched.
    #[error("command {command_type} rejected: {source}")]
    CommandRejected {
        /// Type name of the rejected command.
        command_type: &'static str,
        /// The handler's error.
        #[source]
        source: DomainError,
    },

    /// A synchronous event handler returned an error.
    #[error("handler {handler} failed on {event_type} event {event_id}: {source}")]
    HandlerFailed {
        /// Name of the failing handler.
        handler: &'static str,
        /// Type name of the event being handled.
        event_type: &'static str,
        /// Identifier of the event being handled.
        event_id: Uuid,
        /// The handler's error.
        #[source]
        source: DomainError,
    },

    /// A synchronous event handler panicked.
    #[error("handler {handler} panicked on {event_type} event {event_id}")]
    HandlerPanicked {
        /// Name of the panicking handler.
        handler: &'static str,
        /// Type name of the event being handled.
        event_type: &'static str,
        /// Identifier of the event being handled.
        event_id: Uuid,
    },
}
