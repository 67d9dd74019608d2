//! Test event handlers — mock `EventHandler` implementations for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use courier_core::error::DomainError;
use courier_core::event::DomainEvent;
use courier_core::handler::EventHandler;
use uuid::Uuid;

use crate::fixtures::TestEvent;

fn key_matches(only: Option<&[String]>, event: &TestEvent) -> bool {
    only.is_none_or(|keys| keys.iter().any(|k| k == event.key()))
}

fn to_keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| (*k).to_owned()).collect()
}

/// One recorded `handle` call.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Key of the handled event.
    pub key: String,
    /// ID of the handled event.
    pub event_id: Uuid,
    /// When `handle` was entered.
    pub started: Instant,
    /// When `handle` returned.
    pub finished: Instant,
}

/// An event handler that records every call, optionally sleeping first.
///
/// Supports every event unless narrowed with [`only`](Self::only).
#[derive(Debug)]
pub struct RecordingEventHandler {
    name: &'static str,
    only: Option<Vec<String>>,
    delay: Duration,
    invocations: Mutex<Vec<Invocation>>,
}

impl RecordingEventHandler {
    /// Create a recording handler with the given diagnostic name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            only: None,
            delay: Duration::ZERO,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Restrict `supports` to events with one of the given keys.
    #[must_use]
    pub fn only(mut self, keys: &[&str]) -> Self {
        self.only = Some(to_keys(keys));
        self
    }

    /// Sleep for `delay` inside every `handle` call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns a snapshot of all recorded calls, in completion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Returns the keys of all handled events, in completion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn handled_keys(&self) -> Vec<String> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.key.clone())
            .collect()
    }
}

#[async_trait]
impl EventHandler<TestEvent> for RecordingEventHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, event: &TestEvent) -> bool {
        key_matches(self.only.as_deref(), event)
    }

    async fn handle(&self, event: &TestEvent) -> Result<(), DomainError> {
        let started = Instant::now();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.invocations.lock().unwrap().push(Invocation {
            key: event.key().to_owned(),
            event_id: event.event_id(),
            started,
            finished: Instant::now(),
        });
        Ok(())
    }
}

/// An event handler that always returns an infrastructure error, optionally
/// after a delay. Counts how often it was called.
#[derive(Debug)]
pub struct FailingEventHandler {
    name: &'static str,
    only: Option<Vec<String>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FailingEventHandler {
    /// Create a failing handler with the given diagnostic name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            only: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Restrict `supports` to events with one of the given keys.
    #[must_use]
    pub fn only(mut self, keys: &[&str]) -> Self {
        self.only = Some(to_keys(keys));
        self
    }

    /// Sleep for `delay` before failing.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `handle` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventHandler<TestEvent> for FailingEventHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, event: &TestEvent) -> bool {
        key_matches(self.only.as_deref(), event)
    }

    async fn handle(&self, event: &TestEvent) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Err(DomainError::Infrastructure(format!(
            "{} refused {}",
            self.name,
            event.key()
        )))
    }
}

/// An event handler that panics on every call.
#[derive(Debug)]
pub struct PanickingEventHandler {
    name: &'static str,
}

impl PanickingEventHandler {
    /// Create a panicking handler with the given diagnostic name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl EventHandler<TestEvent> for PanickingEventHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, _event: &TestEvent) -> bool {
        true
    }

    async fn handle(&self, event: &TestEvent) -> Result<(), DomainError> {
        panic!("{} panicked on {}", self.name, event.key());
    }
}
