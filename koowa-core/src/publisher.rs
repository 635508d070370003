//! Publisher trait consumed by invokers.

use crate::{
    command::{Attributes, Subject},
    error::PublishError,
    event::Event,
};

/// Dispatches events to the listeners registered for their name.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `EventPublisher`",
    label = "missing `EventPublisher` implementation",
    note = "Implement `dispatch(&self, &mut Event)` to dispatch events."
)]
pub trait EventPublisher: Send + Sync {
    /// Run the listeners for the event's name against it in place.
    ///
    /// If a listener fails, changes made by the listeners before it stay on
    /// the event.
    fn dispatch(&self, event: &mut Event) -> Result<(), PublishError>;

    /// Dispatch a pre-built event and return it after all listeners ran.
    ///
    /// An event nobody listens to is returned unchanged.
    fn publish(&self, mut event: Event) -> Result<Event, PublishError> {
        self.dispatch(&mut event)?;
        Ok(event)
    }

    /// Build an event from its parts and dispatch it.
    fn publish_event(
        &self,
        name: &str,
        attributes: Attributes,
        subject: Option<Subject>,
    ) -> Result<Event, PublishError> {
        self.publish(Event::new(name, attributes, subject))
    }
}
