//! Filter listener for conditional event processing.

use koowa_core::{Event, Listener, ListenerResult};

/// A listener that forwards events to an inner listener only when a
/// predicate holds.
///
/// # Example
///
/// ```rust,ignore
/// // Only audit inserts into the users table.
/// let audit = FilterListener::new(
///     |event: &Event| event.get("table") == Some(&"users".into()),
///     AuditListener::default(),
/// );
/// publisher.add_listener("onAfterTableInsert", audit, Priority::LOW);
/// ```
pub struct FilterListener<F, L> {
    predicate: F,
    inner: L,
}

impl<F, L> FilterListener<F, L> {
    /// Create a new filter listener.
    pub fn new(predicate: F, inner: L) -> Self {
        Self { predicate, inner }
    }
}

impl<F, L> Listener for FilterListener<F, L>
where
    F: Fn(&Event) -> bool + Send + Sync + 'static,
    L: Listener,
{
    fn on_event(&self, event: &mut Event) -> ListenerResult {
        if (self.predicate)(&*event) {
            self.inner.on_event(event)
        } else {
            Ok(())
        }
    }
}
