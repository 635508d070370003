//! The publishable event object.

use crate::command::{Attributes, Command, Subject};
use serde_json::Value;
use std::fmt;

/// An event dispatched to listeners.
///
/// Listeners receive `&mut Event` and may change its attributes or call
/// [`Event::stop_propagation`] to prevent the remaining listeners from
/// running.
#[derive(Clone)]
pub struct Event {
    name: String,
    subject: Option<Subject>,
    attributes: Attributes,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event ready for dispatch.
    pub fn new(name: impl Into<String>, attributes: Attributes, subject: Option<Subject>) -> Self {
        Self {
            name: name.into(),
            subject,
            attributes,
            propagation_stopped: false,
        }
    }

    /// The event name, e.g. `onBeforeTableSelect`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the event, e.g. before re-publishing it under another name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The subject of the command that raised the event.
    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    /// The attributes, in insertion order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to the attributes.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Consume the event, returning its attributes.
    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Get an attribute value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Set an attribute value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Whether dispatch may continue to further listeners.
    pub fn can_propagate(&self) -> bool {
        !self.propagation_stopped
    }

    /// Stop further dispatch of this event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        let (name, subject, attributes) = command.into_parts();
        Event::new(name, attributes, subject)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field(
                "subject",
                &self.subject.as_ref().map(|s| s.identifier().to_string()),
            )
            .field("attributes", &self.attributes)
            .field("propagation_stopped", &self.propagation_stopped)
            .finish()
    }
}
