//! # Event subscribers
//!
//! A subscriber bundles several listener methods that share one priority.
//! Every public method whose event name starts with [`LISTENER_PREFIX`] is a
//! listener for the event of the same name.
//!
//! The method table is static: it is produced by the `#[subscriber]`
//! attribute macro (or written by hand) through the [`Subscribe`] trait.
//! [`Subscriber`] turns that table into listener registrations on first use
//! and caches them for its lifetime.
//!
//! ```rust,ignore
//! struct AuditLog;
//!
//! #[koowa::subscriber(priority = 2)]
//! impl AuditLog {
//!     pub fn on_after_table_insert(&self, event: &mut Event) -> ListenerResult {
//!         // ...
//!         Ok(())
//!     }
//! }
//!
//! publisher.add_subscriber(&Subscriber::new(AuditLog));
//! ```

use crate::{
    event::Event,
    listener::{Listener, ListenerRegistration, ListenerResult},
    priority::Priority,
};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};

/// Event names handled by subscribers must start with this prefix.
pub const LISTENER_PREFIX: &str = "on";

/// Signature of a subscriber listener method.
pub type ListenerFn<S> = fn(&S, &mut Event) -> ListenerResult;

/// One entry of a subscriber's method table.
pub struct ListenerMethod<S> {
    event: &'static str,
    method: ListenerFn<S>,
}

impl<S> ListenerMethod<S> {
    /// Bind an event name to a method.
    pub const fn new(event: &'static str, method: ListenerFn<S>) -> Self {
        Self { event, method }
    }

    /// The event name this method listens to.
    pub fn event(&self) -> &'static str {
        self.event
    }
}

impl<S> Clone for ListenerMethod<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ListenerMethod<S> {}

/// Static description of a subscriber's listener methods.
///
/// Usually generated by `#[subscriber]`.
pub trait Subscribe: Send + Sync + Sized + 'static {
    /// Priority used when no explicit one is configured.
    const PRIORITY: Priority = Priority::NORMAL;

    /// Listener methods in declaration order.
    fn listener_methods() -> Vec<ListenerMethod<Self>>;
}

/// A listener discovered on a subscriber, with the event it handles.
#[derive(Debug, Clone)]
pub struct SubscribedListener {
    event: &'static str,
    registration: ListenerRegistration,
}

impl SubscribedListener {
    /// The event this listener handles.
    pub fn event(&self) -> &'static str {
        self.event
    }

    /// The registration added to the publisher.
    pub fn registration(&self) -> &ListenerRegistration {
        &self.registration
    }
}

/// Object-safe view of a subscriber, consumed by publishers.
pub trait EventSubscriber: Send + Sync {
    /// The priority shared by all listeners of this subscriber.
    fn priority(&self) -> Priority;

    /// All listeners of this subscriber.
    ///
    /// Repeated calls return the same registrations in the same order.
    fn listeners(&self) -> &[SubscribedListener];
}

/// Binds a method of a shared subscriber instance as a listener.
struct MethodListener<S> {
    subscriber: Arc<S>,
    method: ListenerFn<S>,
}

impl<S: Send + Sync + 'static> Listener for MethodListener<S> {
    fn on_event(&self, event: &mut Event) -> ListenerResult {
        (self.method)(&self.subscriber, event)
    }
}

/// A subscriber instance with a fixed priority and a lazily built listener list.
///
/// To change the priority, construct a new `Subscriber`.
pub struct Subscriber<S> {
    inner: Arc<S>,
    priority: Priority,
    listeners: OnceLock<Vec<SubscribedListener>>,
}

impl<S: Subscribe> Subscriber<S> {
    /// Wrap a subscriber using its default priority.
    pub fn new(inner: S) -> Self {
        Self::with_priority(inner, S::PRIORITY)
    }

    /// Wrap a subscriber with an explicit priority.
    pub fn with_priority(inner: S, priority: Priority) -> Self {
        Self::from_arc(Arc::new(inner), priority)
    }

    /// Wrap an already shared subscriber.
    pub fn from_arc(inner: Arc<S>, priority: Priority) -> Self {
        Self {
            inner,
            priority,
            listeners: OnceLock::new(),
        }
    }

    /// The wrapped subscriber.
    pub fn inner(&self) -> &Arc<S> {
        &self.inner
    }

    fn discover(&self) -> Vec<SubscribedListener> {
        S::listener_methods()
            .into_iter()
            .filter(|m| m.event.starts_with(LISTENER_PREFIX))
            .map(|m| {
                let listener = MethodListener {
                    subscriber: Arc::clone(&self.inner),
                    method: m.method,
                };
                SubscribedListener {
                    event: m.event,
                    registration: ListenerRegistration::new(listener, self.priority),
                }
            })
            .collect()
    }
}

impl<S: Subscribe> EventSubscriber for Subscriber<S> {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn listeners(&self) -> &[SubscribedListener] {
        self.listeners.get_or_init(|| self.discover())
    }
}

impl<S> fmt::Debug for Subscriber<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("type", &std::any::type_name::<S>())
            .field("priority", &self.priority)
            .field("listeners", &self.listeners.get().map(Vec::len))
            .finish()
    }
}
