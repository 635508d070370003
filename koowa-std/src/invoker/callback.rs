//! Callback command invoker.
//!
//! Calls closures registered per command name directly, without going
//! through an event publisher.

use koowa_core::{Command, CommandInvoker, Priority};
use serde_json::Value;
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// A command callback. Returning a value lets the invoker compare it with
/// the chain's break condition.
pub type Callback = Arc<dyn Fn(&mut Command) -> Option<Value> + Send + Sync>;

/// Invoker that calls callbacks registered for a command name.
///
/// # Example
/// ```
/// use koowa_core::{Command, CommandInvoker};
/// use koowa_std::invoker::CallbackInvoker;
/// use serde_json::Value;
///
/// let invoker = CallbackInvoker::new();
/// invoker.add_callback("before.save", |command: &mut Command| {
///     Some(Value::Bool(command.get("title").is_some()))
/// });
///
/// let mut command = Command::new("before.save");
/// let result = invoker.execute_command(&mut command, Some(&Value::Bool(false)));
/// assert_eq!(result, Some(Value::Bool(false)));
/// ```
pub struct CallbackInvoker {
    callbacks: RwLock<HashMap<String, Vec<Callback>>>,
    priority: Priority,
}

impl CallbackInvoker {
    /// Create an invoker with normal priority.
    pub fn new() -> Self {
        Self::with_priority(Priority::NORMAL)
    }

    /// Create an invoker with the given priority.
    pub fn with_priority(priority: Priority) -> Self {
        Self {
            callbacks: RwLock::new(HashMap::new()),
            priority,
        }
    }

    /// Register a callback for a command name. Callbacks run in registration order.
    pub fn add_callback<F>(&self, command: impl Into<String>, callback: F)
    where
        F: Fn(&mut Command) -> Option<Value> + Send + Sync + 'static,
    {
        self.callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(command.into())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Number of callbacks registered for a command name.
    pub fn callback_count(&self, command: &str) -> usize {
        self.callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(command)
            .map_or(0, Vec::len)
    }
}

impl Default for CallbackInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInvoker for CallbackInvoker {
    fn execute_command(&self, command: &mut Command, condition: Option<&Value>) -> Option<Value> {
        let callbacks = self
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(command.name())
            .cloned()
            .unwrap_or_default();

        let mut result = None;
        for callback in callbacks {
            result = callback(command);
            if condition.is_some() && result.as_ref() == condition {
                tracing::debug!(command = %command.name(), "Callback met break condition");
                break;
            }
        }
        result
    }

    fn priority(&self) -> Priority {
        self.priority
    }
}

impl fmt::Debug for CallbackInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commands: Vec<String> = self
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        f.debug_struct("CallbackInvoker")
            .field("commands", &commands)
            .field("priority", &self.priority)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::OrderLog;

    #[test]
    fn test_calls_callbacks_for_command_name() {
        let log = OrderLog::new();
        let invoker = CallbackInvoker::new();
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        invoker.add_callback("before.save", move |_: &mut Command| {
            a.push("first");
            None
        });
        invoker.add_callback("before.save", move |_: &mut Command| {
            b.push("second");
            None
        });
        invoker.add_callback("after.save", move |_: &mut Command| {
            c.push("other");
            None
        });

        invoker.execute_command(&mut Command::new("before.save"), None);

        assert_eq!(log.entries(), ["first", "second"]);
        assert_eq!(invoker.callback_count("before.save"), 2);
    }

    #[test]
    fn test_condition_stops_callbacks() {
        let log = OrderLog::new();
        let invoker = CallbackInvoker::new();
        let after = log.clone();
        invoker.add_callback("before.delete", |_: &mut Command| Some(Value::Bool(false)));
        invoker.add_callback("before.delete", move |_: &mut Command| {
            after.push("unreachable");
            Some(Value::Bool(true))
        });

        let result =
            invoker.execute_command(&mut Command::new("before.delete"), Some(&Value::Bool(false)));

        assert_eq!(result, Some(Value::Bool(false)));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_without_condition_returns_last_result() {
        let invoker = CallbackInvoker::new();
        invoker.add_callback("before.delete", |_: &mut Command| Some(Value::Bool(false)));
        invoker.add_callback("before.delete", |_: &mut Command| Some(Value::from(2)));

        let result = invoker.execute_command(&mut Command::new("before.delete"), None);

        assert_eq!(result, Some(Value::from(2)));
    }

    #[test]
    fn test_callbacks_mutate_command() {
        let invoker = CallbackInvoker::new();
        invoker.add_callback("before.save", |command: &mut Command| {
            command.set("slug", "hello-world");
            None
        });

        let mut command = Command::new("before.save");
        invoker.execute_command(&mut command, None);

        assert_eq!(command.get("slug"), Some(&Value::from("hello-world")));
    }
}
