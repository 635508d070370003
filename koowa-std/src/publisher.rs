//! Event publisher with a priority-ordered listener registry.

use crate::queue::ListenerQueue;
use koowa_core::{
    Event, EventPublisher, EventSubscriber, Listener, ListenerRegistration, Priority, PublishError,
};
use std::{
    collections::HashMap,
    sync::{
        PoisonError, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

/// Maps event names to listener queues and dispatches events in order.
///
/// Registration is append-only. Dispatch copies the queue for the event
/// name before calling listeners, so a listener may register further
/// listeners while it runs; they apply to the next publish.
///
/// # Example
/// ```
/// use koowa_core::{Attributes, Event, EventPublisher, ListenerResult, Priority};
/// use koowa_std::publisher::Publisher;
///
/// let publisher = Publisher::new();
/// publisher.add_listener(
///     "onAfterTableInsert",
///     |event: &mut Event| -> ListenerResult {
///         event.set("audited", true);
///         Ok(())
///     },
///     Priority::NORMAL,
/// );
///
/// let event = publisher
///     .publish_event("onAfterTableInsert", Attributes::new(), None)
///     .unwrap();
/// assert_eq!(event.get("audited"), Some(&serde_json::Value::Bool(true)));
/// ```
pub struct Publisher {
    listeners: RwLock<HashMap<String, ListenerQueue>>,
    enabled: AtomicBool,
}

impl Publisher {
    /// Create an empty, enabled publisher.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            enabled: AtomicBool::new(true),
        }
    }

    /// Start building a publisher.
    pub fn builder() -> PublisherBuilder {
        PublisherBuilder::new()
    }

    /// Register a listener for an event, returning its registration.
    pub fn add_listener<L: Listener>(
        &self,
        event: impl Into<String>,
        listener: L,
        priority: Priority,
    ) -> ListenerRegistration {
        let registration = ListenerRegistration::new(listener, priority);
        self.add_registration(event, registration.clone());
        registration
    }

    /// Register an existing listener handle for an event.
    pub fn add_registration(&self, event: impl Into<String>, registration: ListenerRegistration) {
        let event = event.into();
        tracing::trace!(event = %event, priority = registration.priority().value(), "Adding listener");
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event)
            .or_default()
            .insert(registration);
    }

    /// Register every listener of a subscriber under its event name.
    pub fn add_subscriber(&self, subscriber: &dyn EventSubscriber) {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for subscribed in subscriber.listeners() {
            listeners
                .entry(subscribed.event().to_string())
                .or_default()
                .insert(subscribed.registration().clone());
        }
        tracing::debug!(
            count = subscriber.listeners().len(),
            priority = subscriber.priority().value(),
            "Added subscriber"
        );
    }

    /// Listeners registered for an event, in dispatch order.
    pub fn listeners(&self, event: &str) -> Vec<ListenerRegistration> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .map(ListenerQueue::to_vec)
            .unwrap_or_default()
    }

    /// Whether any listener is registered for an event.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .is_some_and(|queue| !queue.is_empty())
    }

    /// Whether the given listener handle is registered for an event.
    pub fn has_listener(&self, event: &str, registration: &ListenerRegistration) -> bool {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .is_some_and(|queue| queue.contains(registration))
    }

    /// Names of all events with registered listeners, sorted.
    pub fn events(&self) -> Vec<String> {
        let mut events: Vec<String> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        events.sort();
        events
    }

    /// Enable or disable dispatch. A disabled publisher returns events untouched.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Whether events are dispatched.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("events", &self.events())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl EventPublisher for Publisher {
    fn dispatch(&self, event: &mut Event) -> Result<(), PublishError> {
        if !self.is_enabled() {
            tracing::trace!(event = %event.name(), "Publisher disabled, skipping");
            return Ok(());
        }

        let listeners = self.listeners(event.name());
        tracing::debug!(event = %event.name(), listeners = listeners.len(), "Publishing event");

        for (index, registration) in listeners.iter().enumerate() {
            tracing::trace!(event = %event.name(), index, "Calling listener");
            if let Err(source) = registration.call(event) {
                return Err(PublishError::Listener {
                    event: event.name().to_string(),
                    source,
                });
            }
            if !event.can_propagate() {
                tracing::debug!(
                    event = %event.name(),
                    skipped = listeners.len() - index - 1,
                    "Propagation stopped"
                );
                break;
            }
        }

        Ok(())
    }
}

// ============================================================================
// PublisherBuilder
// ============================================================================

/// Builder for constructing a [`Publisher`].
///
/// # Example
/// ```ignore
/// let publisher = Publisher::builder()
///     .listener("onBeforeDispatch", check_access, Priority::HIGH)
///     .subscriber(&Subscriber::new(AuditLog))
///     .build();
/// ```
pub struct PublisherBuilder {
    publisher: Publisher,
}

impl PublisherBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            publisher: Publisher::new(),
        }
    }

    /// Register a listener.
    pub fn listener<L: Listener>(
        self,
        event: impl Into<String>,
        listener: L,
        priority: Priority,
    ) -> Self {
        self.publisher.add_listener(event, listener, priority);
        self
    }

    /// Register a subscriber.
    pub fn subscriber(self, subscriber: &dyn EventSubscriber) -> Self {
        self.publisher.add_subscriber(subscriber);
        self
    }

    /// Register every subscriber submitted with `inventory::submit!`.
    #[cfg(feature = "inventory")]
    pub fn collected_subscribers(self) -> Self {
        for subscriber in crate::collected::collect_subscribers() {
            self.publisher.add_subscriber(subscriber.as_ref());
        }
        self
    }

    /// Set the initial enabled state.
    pub fn enabled(self, enabled: bool) -> Self {
        self.publisher.set_enabled(enabled);
        self
    }

    /// Build the publisher.
    pub fn build(self) -> Publisher {
        self.publisher
    }
}

impl Default for PublisherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
