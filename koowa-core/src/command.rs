//! The command envelope.

use crate::identifier::Identifiable;
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// Ordered attribute map carried by commands and events.
pub type Attributes = Map<String, Value>;

/// Shared handle to the object that triggered a command.
pub type Subject = Arc<dyn Identifiable>;

/// A named request for side effects.
///
/// The name is dotted: the first segment is the phase (`before`/`after`),
/// the rest is the action, e.g. `before.select` or `after.dispatch`.
///
/// Cloning a command copies its attributes; the subject handle is shared.
#[derive(Clone, Default)]
pub struct Command {
    name: String,
    subject: Option<Subject>,
    attributes: Attributes,
}

impl Command {
    /// Create a command without subject or attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: None,
            attributes: Attributes::new(),
        }
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace all attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The command name, e.g. `before.select`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the command.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The object the command acts on, if any.
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

    /// Split the command into name, subject and attributes.
    pub fn into_parts(self) -> (String, Option<Subject>, Attributes) {
        (self.name, self.subject, self.attributes)
    }

    /// Get an attribute value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Set an attribute value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(key.into(), value.into())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field(
                "subject",
                &self.subject.as_ref().map(|s| s.identifier().to_string()),
            )
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Identifier;
    use serde_json::json;

    #[test]
    fn test_clone_copies_attributes() {
        let original = Command::new("before.save").with_attribute("data", json!({"title": "a"}));
        let mut copy = original.clone();

        copy.attributes_mut()
            .get_mut("data")
            .and_then(Value::as_object_mut)
            .unwrap()
            .insert("title".into(), json!("b"));
        copy.set("extra", 1);

        assert_eq!(original.get("data"), Some(&json!({"title": "a"})));
        assert!(original.get("extra").is_none());
    }

    #[test]
    fn test_clone_shares_subject() {
        let subject: Subject = Arc::new("com:foo.table.users".parse::<Identifier>().unwrap());
        let original = Command::new("after.insert").with_subject(subject);
        let copy = original.clone();

        assert!(Arc::ptr_eq(
            original.subject().unwrap(),
            copy.subject().unwrap()
        ));
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let command = Command::new("before.select")
            .with_attribute("zeta", 1)
            .with_attribute("alpha", 2)
            .with_attribute("mid", 3);

        let keys: Vec<_> = command.attributes().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }
}
