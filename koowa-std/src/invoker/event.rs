//! Event command invoker.
//!
//! Translates a command name into `onCommandName` style event names and
//! lets the event publisher dispatch them to registered listeners.
//!
//! Two names are derived from every command. The specific name includes the
//! subject's package, name and type; the generic name only the type:
//!
//! | command         | subject               | specific                          | generic                  |
//! |-----------------|-----------------------|-----------------------------------|--------------------------|
//! | `before.select` | `com:foo.table.users` | `onBeforeFooUsersTableSelect`     | `onBeforeTableSelect`    |
//! | `after.dispatch`| `com:foo.dispatcher`  | `onAfterFooDispatcherDispatch`    | `onAfterDispatcherDispatch` |
//! | `before.render` | none                  | `onBeforeRender`                  | `onBeforeRender`         |
//!
//! The specific event is published first. Unless a listener stopped its
//! propagation, the same event object is renamed and published again under
//! the generic name.

use crate::config::EventInvokerConfig;
use koowa_core::{
    Command, CommandInvoker, ConfigError, Event, EventPublisher, Priority, PublishError,
    inflector::{implode, ucfirst},
};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// The two event names derived from a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventNames {
    /// Subject-qualified name, e.g. `onBeforeFooUsersTableSelect`.
    pub specific: String,
    /// Type-only name, e.g. `onBeforeTableSelect`.
    pub generic: String,
}

impl EventNames {
    /// Derive the event names for a command.
    ///
    /// The first dotted segment of the command name is the phase; it is not
    /// validated, so `load.item` produces `onLoad...` names.
    pub fn from_command(command: &Command) -> Self {
        let (package, subject, kind) = match command.subject() {
            Some(subject) => {
                let identifier = subject.identifier();
                match identifier.path().first() {
                    Some(kind) => (identifier.package(), identifier.name(), kind.as_str()),
                    None => (identifier.package(), "", identifier.name()),
                }
            }
            None => ("", "", ""),
        };

        let mut parts = command.name().split('.');
        let when = parts.next().unwrap_or_default();
        let action = implode(&parts.collect::<Vec<_>>());

        let when = ucfirst(when);
        let kind = ucfirst(kind);

        Self {
            specific: format!(
                "on{}{}{}{}{}",
                when,
                ucfirst(package),
                ucfirst(subject),
                kind,
                action
            ),
            generic: format!("on{}{}{}", when, kind, action),
        }
    }

    /// Whether the generic event differs from the specific one.
    pub fn is_distinct(&self) -> bool {
        self.specific != self.generic
    }
}

/// Invoker that publishes commands as events.
///
/// With `immutable` set (the default) listeners work on a copy of the
/// command's attributes. Otherwise the attributes of the event are written
/// back to the command after dispatch, including when a listener failed.
///
/// The invoker never breaks a command chain: [`execute_command`] always
/// returns `None`. Listener failures are logged and end the invocation.
///
/// [`execute_command`]: CommandInvoker::execute_command
pub struct EventInvoker {
    publisher: Arc<dyn EventPublisher>,
    priority: Priority,
    immutable: bool,
}

impl EventInvoker {
    /// Create an invoker. Fails if no event publisher is configured.
    pub fn new(config: EventInvokerConfig) -> Result<Self, ConfigError> {
        let publisher = config
            .event_publisher
            .ok_or(ConfigError::MissingPublisher)?;

        Ok(Self {
            publisher,
            priority: config.options.priority,
            immutable: config.options.immutable,
        })
    }

    /// The event publisher.
    pub fn publisher(&self) -> &Arc<dyn EventPublisher> {
        &self.publisher
    }

    /// Replace the event publisher.
    pub fn set_publisher(&mut self, publisher: Arc<dyn EventPublisher>) {
        self.publisher = publisher;
    }

    /// Whether listeners receive a copy of the command's attributes.
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    fn dispatch(&self, event: &mut Event, names: &EventNames) -> Result<(), PublishError> {
        self.publisher.dispatch(event)?;

        if event.can_propagate() && names.is_distinct() {
            event.set_name(names.generic.clone());
            self.publisher.dispatch(event)?;
        }

        Ok(())
    }
}

impl CommandInvoker for EventInvoker {
    fn execute_command(&self, command: &mut Command, _condition: Option<&Value>) -> Option<Value> {
        let names = EventNames::from_command(command);
        tracing::debug!(
            command = %command.name(),
            specific = %names.specific,
            generic = %names.generic,
            immutable = self.immutable,
            "Invoking command"
        );

        let mut event = Event::new(
            names.specific.clone(),
            command.attributes().clone(),
            command.subject().cloned(),
        );
        let result = self.dispatch(&mut event, &names);

        // Listeners that ran before a failure still count in mutable mode.
        if !self.immutable {
            *command.attributes_mut() = event.into_attributes();
        }

        if let Err(err) = result {
            tracing::warn!(command = %command.name(), error = %err, "Listener failed");
        }

        None
    }

    fn priority(&self) -> Priority {
        self.priority
    }
}

impl fmt::Debug for EventInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventInvoker")
            .field("priority", &self.priority)
            .field("immutable", &self.immutable)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        publisher::Publisher,
        testing::{FailingListener, MutatingListener, OrderLog, RecordingListener, StopPropagationListener},
    };
    use koowa_core::{Identifier, Subject};

    fn subject(id: &str) -> Subject {
        Arc::new(id.parse::<Identifier>().unwrap())
    }

    fn invoker(publisher: &Arc<Publisher>, immutable: bool) -> EventInvoker {
        EventInvoker::new(
            EventInvokerConfig::new()
                .publisher(publisher.clone())
                .immutable(immutable),
        )
        .unwrap()
    }

    #[test]
    fn test_names_with_path() {
        let command = Command::new("before.selectRow").with_subject(subject("com:foo.table.users"));
        let names = EventNames::from_command(&command);

        assert_eq!(names.specific, "onBeforeFooUsersTableSelectRow");
        assert_eq!(names.generic, "onBeforeTableSelectRow");
    }

    #[test]
    fn test_names_without_path() {
        let command = Command::new("after.dispatch").with_subject(subject("com:foo.dispatcher"));
        let names = EventNames::from_command(&command);

        assert_eq!(names.specific, "onAfterFooDispatcherDispatch");
        assert_eq!(names.generic, "onAfterDispatcherDispatch");
    }

    #[test]
    fn test_names_without_subject() {
        let names = EventNames::from_command(&Command::new("before.render"));

        assert_eq!(names.specific, "onBeforeRender");
        assert_eq!(names.generic, "onBeforeRender");
        assert!(!names.is_distinct());
    }

    #[test]
    fn test_names_multi_segment_action() {
        let command = Command::new("after.select.row").with_subject(subject("com:foo.table.users"));
        let names = EventNames::from_command(&command);

        assert_eq!(names.generic, "onAfterTableSelectRow");
    }

    #[test]
    fn test_names_do_not_validate_phase() {
        let command = Command::new("during.save").with_subject(subject("com:foo.model.articles"));
        let names = EventNames::from_command(&command);

        assert_eq!(names.specific, "onDuringFooArticlesModelSave");
        assert_eq!(names.generic, "onDuringModelSave");
    }

    #[test]
    fn test_missing_publisher() {
        let err = EventInvoker::new(EventInvokerConfig::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPublisher));
    }

    #[test]
    fn test_defaults() {
        let publisher = Arc::new(Publisher::new());
        let invoker = EventInvoker::new(EventInvokerConfig::new().publisher(publisher)).unwrap();

        assert_eq!(invoker.priority(), Priority::LOWEST);
        assert!(invoker.is_immutable());
    }

    #[test]
    fn test_publishes_specific_then_generic() {
        let log = OrderLog::new();
        let publisher = Arc::new(Publisher::new());
        let specific = RecordingListener::new("specific", &log);
        let generic = RecordingListener::new("generic", &log);
        publisher.add_listener("onBeforeFooUsersTableSelect", specific, Priority::NORMAL);
        publisher.add_listener("onBeforeTableSelect", generic.clone(), Priority::NORMAL);

        let mut command = Command::new("before.select").with_subject(subject("com:foo.table.users"));
        assert_eq!(invoker(&publisher, true).execute_command(&mut command, None), None);

        assert_eq!(log.entries(), ["specific", "generic"]);
        assert_eq!(generic.event_names(), ["onBeforeTableSelect"]);
    }

    #[test]
    fn test_single_publish_without_subject() {
        let log = OrderLog::new();
        let publisher = Arc::new(Publisher::new());
        publisher.add_listener("onBeforeRender", RecordingListener::new("render", &log), Priority::NORMAL);

        let mut command = Command::new("before.render");
        invoker(&publisher, true).execute_command(&mut command, None);

        assert_eq!(log.entries(), ["render"]);
    }

    #[test]
    fn test_stop_propagation_suppresses_generic() {
        let log = OrderLog::new();
        let publisher = Arc::new(Publisher::new());
        publisher.add_listener("onBeforeFooUsersTableSelect", StopPropagationListener, Priority::NORMAL);
        publisher.add_listener("onBeforeTableSelect", RecordingListener::new("generic", &log), Priority::NORMAL);

        let mut command = Command::new("before.select").with_subject(subject("com:foo.table.users"));
        invoker(&publisher, true).execute_command(&mut command, None);

        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_immutable_keeps_command_attributes() {
        let publisher = Arc::new(Publisher::new());
        publisher.add_listener("onBeforeTableSave", MutatingListener::new("title", "changed"), Priority::NORMAL);

        let mut command = Command::new("before.save")
            .with_subject(subject("com:foo.table.articles"))
            .with_attribute("title", "original");
        invoker(&publisher, true).execute_command(&mut command, None);

        assert_eq!(command.get("title"), Some(&Value::from("original")));
    }

    #[test]
    fn test_mutable_writes_attributes_back() {
        let publisher = Arc::new(Publisher::new());
        publisher.add_listener("onBeforeTableSave", MutatingListener::new("title", "changed"), Priority::NORMAL);

        let mut command = Command::new("before.save")
            .with_subject(subject("com:foo.table.articles"))
            .with_attribute("title", "original");
        invoker(&publisher, false).execute_command(&mut command, None);

        assert_eq!(command.get("title"), Some(&Value::from("changed")));
    }

    #[test]
    fn test_listener_error_is_swallowed() {
        let log = OrderLog::new();
        let publisher = Arc::new(Publisher::new());
        publisher.add_listener("onBeforeFooUsersTableSelect", FailingListener::new("db down"), Priority::NORMAL);
        publisher.add_listener("onBeforeTableSelect", RecordingListener::new("generic", &log), Priority::NORMAL);

        let mut command = Command::new("before.select")
            .with_subject(subject("com:foo.table.users"))
            .with_attribute("limit", 10);
        let result = invoker(&publisher, false).execute_command(&mut command, None);

        assert_eq!(result, None);
        assert!(log.entries().is_empty());
        assert_eq!(command.get("limit"), Some(&Value::from(10)));
    }

    #[test]
    fn test_generic_listener_sees_specific_changes() {
        let log = OrderLog::new();
        let publisher = Arc::new(Publisher::new());
        let generic = RecordingListener::new("generic", &log);
        publisher.add_listener("onAfterFooUsersTableInsert", MutatingListener::new("audited", true), Priority::NORMAL);
        publisher.add_listener("onAfterTableInsert", generic.clone(), Priority::NORMAL);

        let mut command = Command::new("after.insert").with_subject(subject("com:foo.table.users"));
        invoker(&publisher, true).execute_command(&mut command, None);

        assert_eq!(generic.events()[0].get("audited"), Some(&Value::Bool(true)));
        assert!(command.get("audited").is_none());
    }
}
