//! # Listener
//!
//! A listener is the unit of work attached to an event name. It receives the
//! event by mutable reference, so it can read and change attributes and can
//! stop propagation to the listeners queued after it.
//!
//! Closures of the shape `Fn(&mut Event) -> Result<(), BoxError>` are
//! listeners too.

use crate::{error::BoxError, event::Event, priority::Priority};
use std::{fmt, sync::Arc};

/// Result returned by a listener.
pub type ListenerResult = Result<(), BoxError>;

/// Something that reacts to a published event.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener`",
    label = "missing `Listener` implementation",
    note = "Listeners must implement `on_event(&self, &mut Event)`, or be a closure `Fn(&mut Event) -> ListenerResult`."
)]
pub trait Listener: Send + Sync + 'static {
    /// Called when an event this listener is registered for is published.
    fn on_event(&self, event: &mut Event) -> ListenerResult;
}

// Blanket impl for closures
impl<F> Listener for F
where
    F: Fn(&mut Event) -> ListenerResult + Send + Sync + 'static,
{
    fn on_event(&self, event: &mut Event) -> ListenerResult {
        (self)(event)
    }
}

/// A listener handle paired with the priority it was registered at.
#[derive(Clone)]
pub struct ListenerRegistration {
    listener: Arc<dyn Listener>,
    priority: Priority,
}

impl ListenerRegistration {
    /// Register a listener at the given priority.
    pub fn new<L: Listener>(listener: L, priority: Priority) -> Self {
        Self::from_arc(Arc::new(listener), priority)
    }

    /// Register an already shared listener handle.
    pub fn from_arc(listener: Arc<dyn Listener>, priority: Priority) -> Self {
        Self { listener, priority }
    }

    /// The shared listener handle.
    pub fn listener(&self) -> &Arc<dyn Listener> {
        &self.listener
    }

    /// Priority the listener was registered with.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether both registrations point at the same listener handle.
    pub fn same_listener(&self, other: &ListenerRegistration) -> bool {
        Arc::ptr_eq(&self.listener, &other.listener)
    }

    /// Invoke the listener.
    pub fn call(&self, event: &mut Event) -> ListenerResult {
        self.listener.on_event(event)
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("listener", &Arc::as_ptr(&self.listener))
            .field("priority", &self.priority)
            .finish()
    }
}
