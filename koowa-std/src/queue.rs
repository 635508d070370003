//! Priority queue of listeners for a single event name.

use koowa_core::{ListenerRegistration, Priority};

/// Listeners ordered by ascending priority, ties in insertion order.
///
/// The queue is append-only: inserting never reorders existing entries.
#[derive(Debug, Clone, Default)]
pub struct ListenerQueue {
    entries: Vec<ListenerRegistration>,
}

impl ListenerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a registration after every entry with the same or a lower priority.
    pub fn insert(&mut self, registration: ListenerRegistration) {
        let priority = registration.priority();
        let index = self.entries.partition_point(|e| e.priority() <= priority);
        self.entries.insert(index, registration);
    }

    /// Iterate over registrations in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &ListenerRegistration> {
        self.entries.iter()
    }

    /// Whether the given listener handle is queued.
    pub fn contains(&self, registration: &ListenerRegistration) -> bool {
        self.entries.iter().any(|e| e.same_listener(registration))
    }

    /// The priorities in dispatch order.
    pub fn priorities(&self) -> Vec<Priority> {
        self.entries.iter().map(ListenerRegistration::priority).collect()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy the registrations out, e.g. to dispatch without holding a lock.
    pub fn to_vec(&self) -> Vec<ListenerRegistration> {
        self.entries.clone()
    }
}

impl Extend<ListenerRegistration> for ListenerQueue {
    fn extend<T: IntoIterator<Item = ListenerRegistration>>(&mut self, iter: T) {
        for registration in iter {
            self.insert(registration);
        }
    }
}

impl FromIterator<ListenerRegistration> for ListenerQueue {
    fn from_iter<T: IntoIterator<Item = ListenerRegistration>>(iter: T) -> Self {
        let mut queue = ListenerQueue::new();
        queue.extend(iter);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koowa_core::{Event, ListenerResult};

    fn noop(priority: i32) -> ListenerRegistration {
        ListenerRegistration::new(|_: &mut Event| -> ListenerResult { Ok(()) }, Priority(priority))
    }

    #[test]
    fn test_orders_by_priority() {
        let queue: ListenerQueue = [30, 10, 20].into_iter().map(noop).collect();

        assert_eq!(queue.priorities(), [Priority(10), Priority(20), Priority(30)]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let first = noop(10);
        let second = noop(10);
        let mut queue = ListenerQueue::new();
        queue.insert(noop(20));
        queue.insert(first.clone());
        queue.insert(second.clone());
        queue.insert(noop(5));

        let entries: Vec<_> = queue.iter().collect();
        assert_eq!(entries[0].priority(), Priority(5));
        assert!(entries[1].same_listener(&first));
        assert!(entries[2].same_listener(&second));
        assert_eq!(entries[3].priority(), Priority(20));
    }

    #[test]
    fn test_contains() {
        let registration = noop(3);
        let mut queue = ListenerQueue::new();
        assert!(!queue.contains(&registration));

        queue.insert(registration.clone());
        assert!(queue.contains(&registration));
        assert_eq!(queue.len(), 1);
    }
}
