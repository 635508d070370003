//! Error types for Koowa.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`KoowaError`] - Top-level error type for all Koowa operations
//! - [`ConfigError`] - Errors while wiring invokers and chains
//! - [`PublishError`] - Errors raised while dispatching an event
//! - [`IdentifierError`] - Errors parsing an object identifier

use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Listeners report failures with this type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Koowa operations.
#[derive(Error, Debug)]
pub enum KoowaError {
    /// A component was configured incorrectly.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error occurred while publishing an event.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// An identifier could not be parsed.
    #[error("identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised when constructing a component from its configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The event invoker was built without an event publisher.
    #[error("event_publisher option is required")]
    MissingPublisher,

    /// Options could not be deserialized.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Errors that can occur while an event is dispatched to its listeners.
#[derive(Error, Debug)]
pub enum PublishError {
    /// A listener failed; the remaining listeners were not called.
    #[error("listener for `{event}` failed")]
    Listener {
        /// Name of the event being dispatched.
        event: String,
        /// The error returned by the listener.
        #[source]
        source: BoxError,
    },
}

/// Errors that can occur while parsing an identifier string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The `type:` prefix is missing or empty.
    #[error("identifier `{0}` has no type")]
    MissingType(String),

    /// No package segment follows the type.
    #[error("identifier `{0}` has no package")]
    MissingPackage(String),

    /// The identifier contains an empty segment or an unterminated domain.
    #[error("malformed identifier `{0}`")]
    Malformed(String),
}

impl From<BoxError> for KoowaError {
    fn from(err: BoxError) -> Self {
        KoowaError::Custom(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::InvalidOptions(err.to_string())
    }
}
