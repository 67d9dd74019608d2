//! Domain event abstractions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name of the event variant.
    pub event_type: String,
    /// Aggregate this event is about.
    pub aggregate_id: Uuid,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Causation ID linking this event to the command that caused it.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
///
/// Events are immutable facts. They are produced by command handlers only
/// and shared read-only between every event handler that supports them.
pub trait DomainEvent: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON. Emitted at `trace` level when
    /// the event is offered to its handlers.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;

    /// Returns the unique event identifier.
    fn event_id(&self) -> Uuid {
        self.metadata().event_id
    }
}
