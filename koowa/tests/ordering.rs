//! Property tests for listener ordering.

use koowa::{Event, EventPublisher, ListenerQueue, ListenerRegistration, Priority, Publisher, testing::{OrderLog, RecordingListener}};
use proptest::prelude::*;

proptest! {
    #[test]
    fn dispatch_order_is_stable_sort_by_priority(priorities in prop::collection::vec(-5i32..10, 0..24)) {
        let log = OrderLog::new();
        let publisher = Publisher::new();
        for (index, priority) in priorities.iter().enumerate() {
            publisher.add_listener(
                "onTest",
                RecordingListener::new(index.to_string(), &log),
                Priority(*priority),
            );
        }

        publisher.publish(Event::new("onTest", Default::default(), None)).unwrap();

        let mut expected: Vec<(i32, usize)> = priorities.iter().copied().zip(0..).collect();
        expected.sort_by_key(|(priority, _)| *priority);
        let expected: Vec<String> = expected.into_iter().map(|(_, index)| index.to_string()).collect();

        prop_assert_eq!(log.entries(), expected);
    }

    #[test]
    fn queue_priorities_never_decrease(priorities in prop::collection::vec(any::<i32>(), 0..32)) {
        let queue: ListenerQueue = priorities
            .iter()
            .map(|p| ListenerRegistration::new(|_: &mut Event| -> koowa::ListenerResult { Ok(()) }, Priority(*p)))
            .collect();

        let ordered = queue.priorities();
        prop_assert_eq!(ordered.len(), priorities.len());
        prop_assert!(ordered.windows(2).all(|w| w[0] <= w[1]));
    }
}
