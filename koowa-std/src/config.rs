//! Configuration for invokers and command chains.
//!
//! Plain options are `serde`-deserializable so they can come from a config
//! file; collaborators such as the event publisher are attached in code.

use koowa_core::{ConfigError, EventPublisher, Priority};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Options shared by the event invoker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvokerOptions {
    /// Position of the invoker in a command chain.
    pub priority: Priority,
    /// Publish a copy of the command's attributes instead of the originals.
    pub immutable: bool,
}

impl Default for InvokerOptions {
    fn default() -> Self {
        Self {
            priority: Priority::LOWEST,
            immutable: true,
        }
    }
}

impl InvokerOptions {
    /// Parse options from JSON, filling in defaults for missing keys.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration for an [`EventInvoker`](crate::invoker::EventInvoker).
///
/// # Example
/// ```ignore
/// let invoker = EventInvoker::new(
///     EventInvokerConfig::new()
///         .publisher(publisher.clone())
///         .immutable(false),
/// )?;
/// ```
#[derive(Clone, Default)]
pub struct EventInvokerConfig {
    /// Deserializable options.
    pub options: InvokerOptions,
    /// The publisher events are sent to. Required.
    pub event_publisher: Option<Arc<dyn EventPublisher>>,
}

impl EventInvokerConfig {
    /// Create a configuration with default options and no publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given options.
    pub fn from_options(options: InvokerOptions) -> Self {
        Self {
            options,
            event_publisher: None,
        }
    }

    /// Set the event publisher.
    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.event_publisher = Some(publisher);
        self
    }

    /// Set the invoker priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.options.priority = priority;
        self
    }

    /// Set whether listeners receive a copy of the attributes.
    pub fn immutable(mut self, immutable: bool) -> Self {
        self.options.immutable = immutable;
        self
    }
}

impl fmt::Debug for EventInvokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventInvokerConfig")
            .field("options", &self.options)
            .field("event_publisher", &self.event_publisher.is_some())
            .finish()
    }
}

/// Configuration for a [`CommandChain`](crate::chain::CommandChain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandChainConfig {
    /// An invoker result equal to this value stops the chain.
    pub break_condition: Value,
    /// A disabled chain executes nothing.
    pub enabled: bool,
}

impl Default for CommandChainConfig {
    fn default() -> Self {
        Self {
            break_condition: Value::Bool(false),
            enabled: true,
        }
    }
}

impl CommandChainConfig {
    /// Parse a chain configuration from JSON, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoker_defaults() {
        let options = InvokerOptions::default();
        assert_eq!(options.priority, Priority::LOWEST);
        assert!(options.immutable);
    }

    #[test]
    fn test_invoker_options_from_json() {
        let options = InvokerOptions::from_json(r#"{"immutable": false}"#).unwrap();
        assert_eq!(options.priority, Priority::LOWEST);
        assert!(!options.immutable);

        let options = InvokerOptions::from_json(r#"{"priority": 2}"#).unwrap();
        assert_eq!(options.priority, Priority::HIGH);
        assert!(options.immutable);
    }

    #[test]
    fn test_invalid_options() {
        let err = InvokerOptions::from_json(r#"{"immutable": "yes"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions(_)));
    }

    #[test]
    fn test_chain_config_from_json() {
        let config = CommandChainConfig::from_json(r#"{"enabled": false}"#).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.break_condition, Value::Bool(false));
    }
}
