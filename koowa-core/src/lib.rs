//! # koowa-core
//!
//! Core types and traits for the Koowa command/event pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! components that only need to issue commands or write listeners, without
//! pulling in the standard publisher and invokers from `koowa-std`.
//!
//! # Pipeline
//!
//! A calling layer (dispatcher, controller, table, template engine) issues a
//! [`Command`] such as `before.select` with itself as the subject. A
//! [`CommandInvoker`] turns the command into side effects; the event invoker
//! derives event names from the subject's [`Identifier`] and publishes them
//! through an [`EventPublisher`], which runs the registered [`Listener`]s in
//! [`Priority`] order.
//!
//! ## Listeners and subscribers
//!
//! - [`Listener`] - a single handler, closures included
//! - [`Subscribe`] / [`Subscriber`] - a bundle of `on*` methods sharing one priority
//!
//! ## Event names
//!
//! Names are built with the helpers in [`inflector`]: `before.selectRow` on
//! `com:foo.table.users` becomes `onBeforeFooUsersTableSelectRow` (specific)
//! and `onBeforeTableSelectRow` (generic).
//!
//! # Error Types
//!
//! - [`KoowaError`] - Top-level error type
//! - [`ConfigError`] - Wiring errors
//! - [`PublishError`] - Listener failures during dispatch
//! - [`IdentifierError`] - Identifier parse errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod command;
mod error;
mod event;
mod identifier;
pub mod inflector;
mod invoker;
mod listener;
mod priority;
mod publisher;
mod subscriber;

// Re-exports
pub use command::{Attributes, Command, Subject};
pub use error::{BoxError, ConfigError, IdentifierError, KoowaError, PublishError};
pub use event::Event;
pub use identifier::{Identifiable, Identifier};
pub use invoker::CommandInvoker;
pub use listener::{Listener, ListenerRegistration, ListenerResult};
pub use priority::Priority;
pub use publisher::EventPublisher;
pub use subscriber::{
    EventSubscriber, LISTENER_PREFIX, ListenerFn, ListenerMethod, SubscribedListener, Subscribe,
    Subscriber,
};
