//! Command chain: runs a command through a priority-ordered set of invokers.

use crate::config::CommandChainConfig;
use koowa_core::{Command, CommandInvoker};
use serde_json::Value;
use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicBool, Ordering},
};

/// Runs commands through queued invokers, lowest priority first.
///
/// If an invoker returns a value equal to the break condition the chain
/// stops and returns it. A `before.*` callback returning `false` is the
/// usual way to cancel the action that follows.
///
/// # Example
/// ```ignore
/// let chain = CommandChain::new();
/// chain.enqueue(Arc::new(callbacks));
/// chain.enqueue(Arc::new(EventInvoker::new(config)?));
///
/// if chain.execute(&mut Command::new("before.delete")).is_some() {
///     return; // vetoed
/// }
/// ```
pub struct CommandChain {
    invokers: RwLock<Vec<Arc<dyn CommandInvoker>>>,
    break_condition: Value,
    enabled: AtomicBool,
}

impl CommandChain {
    /// Create an empty chain with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CommandChainConfig::default())
    }

    /// Create an empty chain.
    pub fn with_config(config: CommandChainConfig) -> Self {
        Self {
            invokers: RwLock::new(Vec::new()),
            break_condition: config.break_condition,
            enabled: AtomicBool::new(config.enabled),
        }
    }

    /// Add an invoker. Invokers with equal priority keep their enqueue order.
    pub fn enqueue(&self, invoker: Arc<dyn CommandInvoker>) {
        let mut invokers = self.invokers.write().unwrap_or_else(PoisonError::into_inner);
        let priority = invoker.priority();
        let index = invokers.partition_point(|i| i.priority() <= priority);
        invokers.insert(index, invoker);
    }

    /// Run the command through every invoker.
    ///
    /// Returns the break condition if an invoker met it, `None` otherwise.
    pub fn execute(&self, command: &mut Command) -> Option<Value> {
        if !self.is_enabled() {
            tracing::trace!(command = %command.name(), "Chain disabled, skipping");
            return None;
        }

        let invokers = self
            .invokers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for invoker in invokers {
            let result = invoker.execute_command(command, Some(&self.break_condition));
            if result.as_ref() == Some(&self.break_condition) {
                tracing::debug!(
                    command = %command.name(),
                    priority = invoker.priority().value(),
                    "Command chain broken"
                );
                return result;
            }
        }
        None
    }

    /// The value that stops the chain.
    pub fn break_condition(&self) -> &Value {
        &self.break_condition
    }

    /// Number of enqueued invokers.
    pub fn len(&self) -> usize {
        self.invokers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no invoker is enqueued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enable or disable the chain. A disabled chain runs no invokers.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Whether the chain runs its invokers.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Default for CommandChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandChain")
            .field("invokers", &self.len())
            .field("break_condition", &self.break_condition)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{invoker::CallbackInvoker, testing::OrderLog};
    use koowa_core::Priority;

    fn logging_invoker(log: &OrderLog, label: &'static str, priority: i32) -> Arc<dyn CommandInvoker> {
        let invoker = CallbackInvoker::with_priority(Priority(priority));
        let log = log.clone();
        invoker.add_callback("before.save", move |_: &mut Command| {
            log.push(label);
            None
        });
        Arc::new(invoker)
    }

    #[test]
    fn test_runs_invokers_by_priority() {
        let log = OrderLog::new();
        let chain = CommandChain::new();
        chain.enqueue(logging_invoker(&log, "low", 4));
        chain.enqueue(logging_invoker(&log, "high", 2));
        chain.enqueue(logging_invoker(&log, "high-2", 2));

        assert_eq!(chain.execute(&mut Command::new("before.save")), None);
        assert_eq!(log.entries(), ["high", "high-2", "low"]);
    }

    #[test]
    fn test_break_condition_stops_chain() {
        let log = OrderLog::new();
        let chain = CommandChain::new();
        let veto = CallbackInvoker::with_priority(Priority::HIGH);
        veto.add_callback("before.save", |_: &mut Command| Some(Value::Bool(false)));
        chain.enqueue(Arc::new(veto));
        chain.enqueue(logging_invoker(&log, "after-veto", 5));

        assert_eq!(
            chain.execute(&mut Command::new("before.save")),
            Some(Value::Bool(false))
        );
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_other_results_do_not_break() {
        let log = OrderLog::new();
        let chain = CommandChain::new();
        let invoker = CallbackInvoker::with_priority(Priority::HIGH);
        invoker.add_callback("before.save", |_: &mut Command| Some(Value::Bool(true)));
        chain.enqueue(Arc::new(invoker));
        chain.enqueue(logging_invoker(&log, "next", 5));

        assert_eq!(chain.execute(&mut Command::new("before.save")), None);
        assert_eq!(log.entries(), ["next"]);
    }

    #[test]
    fn test_custom_break_condition() {
        let chain = CommandChain::with_config(CommandChainConfig {
            break_condition: Value::from("stop"),
            ..Default::default()
        });
        let invoker = CallbackInvoker::new();
        invoker.add_callback("after.load", |_: &mut Command| Some(Value::Bool(false)));
        invoker.add_callback("after.load", |_: &mut Command| Some(Value::from("stop")));
        chain.enqueue(Arc::new(invoker));

        assert_eq!(
            chain.execute(&mut Command::new("after.load")),
            Some(Value::from("stop"))
        );
    }

    #[test]
    fn test_disabled_chain() {
        let log = OrderLog::new();
        let chain = CommandChain::with_config(CommandChainConfig {
            enabled: false,
            ..Default::default()
        });
        chain.enqueue(logging_invoker(&log, "a", 3));

        chain.execute(&mut Command::new("before.save"));
        assert!(log.entries().is_empty());

        chain.set_enabled(true);
        chain.execute(&mut Command::new("before.save"));
        assert_eq!(log.entries(), ["a"]);
    }
}
