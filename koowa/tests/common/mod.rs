#![allow(dead_code)]

use koowa::{EventInvoker, EventInvokerConfig, Identifiable, Identifier, Publisher, Subject};
use std::sync::Arc;

// ============================================================================
// Test Subjects
// ============================================================================

/// A stand-in for a database table object.
pub struct Table {
    identifier: Identifier,
}

impl Table {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.parse().unwrap(),
        }
    }

    pub fn subject(identifier: &str) -> Subject {
        Arc::new(Self::new(identifier))
    }
}

impl Identifiable for Table {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub fn invoker(publisher: &Arc<Publisher>, immutable: bool) -> EventInvoker {
    EventInvoker::new(
        EventInvokerConfig::new()
            .publisher(publisher.clone())
            .immutable(immutable),
    )
    .unwrap()
}
