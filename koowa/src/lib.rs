//! # koowa - Command/Event Pipeline
//!
//! `koowa` maps abstract commands such as `before.select` onto named events,
//! publishes them through a priority-ordered listener registry and keeps the
//! caller's command isolated from listener mutations unless asked not to.
//!
//! ## Quick Start
//!
//! ```rust
//! use koowa::prelude::*;
//! use std::sync::Arc;
//!
//! let publisher = Arc::new(Publisher::new());
//! publisher.add_listener(
//!     "onBeforeTableSelect",
//!     |event: &mut Event| -> ListenerResult {
//!         event.set("limit", 20);
//!         Ok(())
//!     },
//!     Priority::NORMAL,
//! );
//!
//! let invoker = EventInvoker::new(
//!     EventInvokerConfig::new()
//!         .publisher(publisher.clone())
//!         .immutable(false),
//! )
//! .unwrap();
//!
//! let users: Subject = Arc::new("com:foo.table.users".parse::<Identifier>().unwrap());
//! let mut command = Command::new("before.select").with_subject(users);
//! invoker.execute_command(&mut command, None);
//!
//! assert_eq!(command.get("limit"), Some(&Value::from(20)));
//! ```
//!
//! The command above is published as `onBeforeFooUsersTableSelect` first
//! and, unless a listener stops propagation, as `onBeforeTableSelect` next.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use koowa_core::{
    // Commands and events
    Attributes,
    // Error types
    BoxError,
    Command,
    // Invokers
    CommandInvoker,
    ConfigError,
    Event,
    // Publisher
    EventPublisher,
    // Subscribers
    EventSubscriber,
    // Identifiers
    Identifiable,
    Identifier,
    IdentifierError,
    KoowaError,
    LISTENER_PREFIX,
    // Listeners
    Listener,
    ListenerFn,
    ListenerMethod,
    ListenerRegistration,
    ListenerResult,
    Priority,
    PublishError,
    Subject,
    SubscribedListener,
    Subscribe,
    Subscriber,
    inflector,
};

// Standard implementations
pub use koowa_std::{
    chain::CommandChain,
    config::{CommandChainConfig, EventInvokerConfig, InvokerOptions},
    invoker::{CallbackInvoker, EventInvoker, EventNames},
    publisher::{Publisher, PublisherBuilder},
    queue::ListenerQueue,
};

/// Attribute values carried by commands and events.
pub use serde_json::Value;

#[cfg(feature = "inventory")]
pub use koowa_std::collected::{CollectedSubscriber, collect_subscribers};

/// Standard listener implementations.
pub mod listeners {
    pub use koowa_std::listeners::{FilterListener, LoggingListener};
}

/// Testing utilities.
pub mod testing {
    pub use koowa_std::testing::{
        CountingListener, FailingListener, MutatingListener, OrderLog, RecordingListener,
        StopPropagationListener,
    };
}

/// Prelude module - common imports for Koowa.
///
/// # Usage
///
/// ```rust,ignore
/// use koowa::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Commands and events
        Attributes,
        BoxError,
        Command,
        CommandChain,
        CommandInvoker,
        Event,
        EventInvoker,
        EventInvokerConfig,
        EventPublisher,
        EventSubscriber,
        Identifiable,
        Identifier,
        Listener,
        ListenerResult,
        Priority,
        Publisher,
        Subject,
        Subscribe,
        Subscriber,
        Value,
    };
}

#[cfg(feature = "macros")]
pub use koowa_macros::subscriber;

#[cfg(feature = "inventory")]
pub use inventory;
