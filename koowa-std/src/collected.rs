//! Subscribers collected at link time via `inventory`.
//!
//! Components can submit subscriber factories from anywhere in the program;
//! [`PublisherBuilder::collected_subscribers`] registers them all.
//!
//! ```rust,ignore
//! fn audit_log() -> Box<dyn EventSubscriber> {
//!     Box::new(Subscriber::new(AuditLog))
//! }
//!
//! inventory::submit! { CollectedSubscriber::new("audit_log", audit_log) }
//! ```
//!
//! [`PublisherBuilder::collected_subscribers`]: crate::publisher::PublisherBuilder::collected_subscribers

use koowa_core::EventSubscriber;

/// A subscriber factory submitted with `inventory::submit!`.
pub struct CollectedSubscriber {
    /// Name for debugging.
    pub name: &'static str,
    /// Builds the subscriber instance.
    pub factory: fn() -> Box<dyn EventSubscriber>,
}

impl CollectedSubscriber {
    /// Create a new collected subscriber entry.
    pub const fn new(name: &'static str, factory: fn() -> Box<dyn EventSubscriber>) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(CollectedSubscriber);

/// Instantiates every submitted subscriber.
///
/// The order follows the linker's collection order; listener order inside
/// the publisher is still decided by priority.
pub fn collect_subscribers() -> Vec<Box<dyn EventSubscriber>> {
    inventory::iter::<CollectedSubscriber>
        .into_iter()
        .map(|entry| {
            tracing::trace!(name = entry.name, "Instantiating collected subscriber");
            (entry.factory)()
        })
        .collect()
}
