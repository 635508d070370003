//! Logging listener - Observability for event dispatch.

use koowa_core::{Event, Listener, ListenerResult};

/// A listener that logs every event it receives and leaves it untouched.
///
/// Register it at [`Priority::HIGHEST`](koowa_core::Priority::HIGHEST) to
/// see events before other listeners change them, or at `LOWEST` to see the
/// final state.
///
/// # Example
///
/// ```rust,ignore
/// publisher.add_listener("onBeforeDispatch", LoggingListener::named("dispatch"), Priority::HIGHEST);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingListener {
    name: &'static str,
}

impl LoggingListener {
    /// Create a new `LoggingListener` with a default name.
    pub fn new() -> Self {
        Self { name: "event" }
    }

    /// Create a new `LoggingListener` with a custom name.
    ///
    /// The name is used in log messages to identify the pipeline stage.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for LoggingListener {
    fn on_event(&self, event: &mut Event) -> ListenerResult {
        tracing::debug!(
            name = %self.name,
            event = %event.name(),
            subject = ?event.subject().map(|s| s.identifier().to_string()),
            attributes = ?event.attributes(),
            "Received event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koowa_core::Attributes;

    #[test]
    fn test_logging_listener_leaves_event_untouched() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();

        let mut event = Event::new("onBeforeDispatch", Attributes::new(), None);
        event.set("id", 1);
        let before = event.attributes().clone();

        LoggingListener::named("dispatch").on_event(&mut event).unwrap();

        assert_eq!(event.attributes(), &before);
        assert!(event.can_propagate());
    }
}
