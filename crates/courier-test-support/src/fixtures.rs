//! Test command and event types plus a scripted command handler.

use courier_core::command::Command;
use courier_core::error::DomainError;
use courier_core::event::{DomainEvent, EventMetadata};
use courier_core::handler::CommandHandler;
use uuid::Uuid;

use crate::clock::FixedClock;

/// Commands understood by the test fixtures.
#[derive(Debug, Clone)]
pub enum TestCommand {
    /// Produces one `TestEvent` per key.
    Create {
        /// Correlation ID.
        correlation_id: Uuid,
        /// Keys of the events to produce.
        keys: Vec<String>,
    },
    /// No handler supports this variant.
    Unrouted {
        /// Correlation ID.
        correlation_id: Uuid,
    },
}

impl TestCommand {
    /// Shorthand for a `Create` command with a fresh correlation ID.
    #[must_use]
    pub fn create(keys: &[&str]) -> Self {
        Self::Create {
            correlation_id: Uuid::new_v4(),
            keys: keys.iter().map(|k| (*k).to_owned()).collect(),
        }
    }
}

impl Command for TestCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::Create { .. } => "test.create",
            Self::Unrouted { .. } => "test.unrouted",
        }
    }

    fn correlation_id(&self) -> Uuid {
        match self {
            Self::Create { correlation_id, .. } | Self::Unrouted { correlation_id } => {
                *correlation_id
            }
        }
    }
}

/// Event produced by the test fixtures. Carries a human-readable key so
/// assertions do not need to juggle UUIDs.
#[derive(Debug, Clone)]
pub struct TestEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    key: String,
}

impl TestEvent {
    fn new(key: &str, correlation_id: Uuid) -> Self {
        Self {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: "test.created".to_owned(),
                aggregate_id: Uuid::nil(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: FixedClock::epoch(),
            },
            key: key.to_owned(),
        }
    }

    /// Returns the test key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl DomainEvent for TestEvent {
    fn event_type(&self) -> &'static str {
        "test.created"
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({ "key": self.key })
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

/// Builds a `TestEvent` with the given key and a fixed timestamp.
#[must_use]
pub fn test_event(key: &str) -> TestEvent {
    TestEvent::new(key, Uuid::nil())
}

/// Command handler for `TestCommand::Create`.
///
/// `Create` with no keys yields no events; a key of `"reject"` makes the
/// handler reject the command.
#[derive(Debug, Default)]
pub struct ScriptedCommandHandler;

impl CommandHandler<TestCommand, TestEvent> for ScriptedCommandHandler {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn supports(&self, command: &TestCommand) -> bool {
        matches!(command, TestCommand::Create { .. })
    }

    fn handle(&self, command: &TestCommand) -> Result<Vec<TestEvent>, DomainError> {
        let TestCommand::Create {
            correlation_id,
            keys,
        } = command
        else {
            return Ok(Vec::new());
        };
        if keys.iter().any(|k| k == "reject") {
            return Err(DomainError::Validation("rejected by script".into()));
        }
        Ok(keys
            .iter()
            .map(|k| TestEvent::new(k, *correlation_id))
            .collect())
    }
}
