//! Standard command invokers.
//!
//! - [`EventInvoker`] publishes commands as events
//! - [`CallbackInvoker`] calls closures registered per command name

pub mod callback;
pub mod event;

pub use callback::{Callback, CallbackInvoker};
pub use event::{EventInvoker, EventNames};
