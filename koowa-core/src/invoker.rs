//! Command invoker trait.
//!
//! An invoker turns a command into side effects. Which mechanism it uses
//! (publishing events, calling registered callbacks, ...) is up to the
//! implementation. Invokers are queued in a command chain by priority.

use crate::{command::Command, priority::Priority};
use serde_json::Value;

/// Executes commands.
pub trait CommandInvoker: Send + Sync {
    /// Execute the command.
    ///
    /// If `condition` is given and the invoker produces a value equal to it,
    /// the invoker returns that value so the calling chain can stop.
    fn execute_command(&self, command: &mut Command, condition: Option<&Value>) -> Option<Value>;

    /// Position of this invoker in a command chain. Lower runs first.
    fn priority(&self) -> Priority;
}
