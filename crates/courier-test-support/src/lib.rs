//! Shared test doubles for the Courier dispatch core.

mod clock;
mod fixtures;
mod handlers;
mod wait;

pub use clock::FixedClock;
pub use fixtures::{ScriptedCommandHandler, TestCommand, TestEvent, test_event};
pub use handlers::{FailingEventHandler, Invocation, PanickingEventHandler, RecordingEventHandler};
pub use wait::eventually;
