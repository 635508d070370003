//! Testing utilities for Koowa.
//!
//! This module provides listeners that make it easy to observe dispatch
//! order, propagation and attribute mutation in tests.
//!
//! # Features
//!
//! - [`OrderLog`]: A shared log of listener labels in call order
//! - [`RecordingListener`]: A listener that records every event it receives
//! - [`CountingListener`]: A listener that counts invocations
//! - [`StopPropagationListener`]: Stops propagation
//! - [`FailingListener`]: Returns an error
//! - [`MutatingListener`]: Sets an attribute on the event

use koowa_core::{Event, Listener, ListenerResult};
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Order Log
// ============================================================================

/// A shared, cloneable log of labels.
///
/// # Example
///
/// ```rust,ignore
/// let log = OrderLog::new();
/// publisher.add_listener("onTest", RecordingListener::new("a", &log), Priority(20));
/// publisher.add_listener("onTest", RecordingListener::new("b", &log), Priority(10));
///
/// publisher.publish_event("onTest", Attributes::new(), None)?;
/// assert_eq!(log.entries(), ["b", "a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl OrderLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn push(&self, label: impl Into<String>) {
        self.entries.lock().unwrap().push(label.into());
    }

    /// Get a copy of the labels in order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all events it receives.
///
/// Each call also appends the listener's label to its [`OrderLog`].
#[derive(Clone)]
pub struct RecordingListener {
    label: String,
    log: OrderLog,
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingListener {
    /// Create a recording listener writing to `log`.
    pub fn new(label: impl Into<String>, log: &OrderLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Names of the recorded events, in order.
    pub fn event_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl Listener for RecordingListener {
    fn on_event(&self, event: &mut Event) -> ListenerResult {
        self.log.push(self.label.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts invocations.
#[derive(Clone, Default)]
pub struct CountingListener {
    count: Arc<AtomicUsize>,
}

impl CountingListener {
    /// Create a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Listener for CountingListener {
    fn on_event(&self, _event: &mut Event) -> ListenerResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Control Listeners
// ============================================================================

/// A listener that stops propagation of every event it receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopPropagationListener;

impl Listener for StopPropagationListener {
    fn on_event(&self, event: &mut Event) -> ListenerResult {
        event.stop_propagation();
        Ok(())
    }
}

/// A listener that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingListener {
    message: String,
}

impl FailingListener {
    /// Create a failing listener.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Listener for FailingListener {
    fn on_event(&self, _event: &mut Event) -> ListenerResult {
        Err(self.message.clone().into())
    }
}

/// A listener that sets one attribute on every event it receives.
#[derive(Debug, Clone)]
pub struct MutatingListener {
    key: String,
    value: Value,
}

impl MutatingListener {
    /// Create a listener setting `key` to `value`.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Listener for MutatingListener {
    fn on_event(&self, event: &mut Event) -> ListenerResult {
        event.set(self.key.clone(), self.value.clone());
        Ok(())
    }
}
