//! Command abstractions.

use uuid::Uuid;

/// An instruction routed by `CommandRouter` to exactly one `CommandHandler`.
///
/// Concrete commands are enums: the variant is the command's identity, and
/// handlers claim support by matching on it. Nothing here is used for
/// routing; both methods only feed diagnostics.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable tag recorded on the `CommandBus::handle` span and carried by
    /// `DispatchError::CommandRejected`.
    fn command_type(&self) -> &'static str;

    /// Recorded on the `CommandBus::handle` span so every handler log line
    /// of one command can be grouped.
    fn correlation_id(&self) -> Uuid;
}
