//! Listener and invoker priorities.

use serde::{Deserialize, Serialize};

/// Execution priority. Lower values run first.
///
/// The named constants cover the usual cases, but any integer is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i32);

impl Priority {
    /// Runs before everything else.
    pub const HIGHEST: Priority = Priority(1);
    /// Runs before normal priority.
    pub const HIGH: Priority = Priority(2);
    /// The default priority for subscribers and callbacks.
    pub const NORMAL: Priority = Priority(3);
    /// Runs after normal priority.
    pub const LOW: Priority = Priority(4);
    /// Runs last. The default for the event invoker.
    pub const LOWEST: Priority = Priority(5);

    /// The raw value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::NORMAL
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}
