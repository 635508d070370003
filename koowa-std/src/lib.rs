//! # koowa-std
//!
//! Standard implementations for the Koowa command/event pipeline.
//!
//! This crate provides:
//! - **Publishing**: [`Publisher`](publisher::Publisher), [`ListenerQueue`](queue::ListenerQueue)
//! - **Invokers**: [`EventInvoker`](invoker::EventInvoker), [`CallbackInvoker`](invoker::CallbackInvoker)
//! - **Chains**: [`CommandChain`](chain::CommandChain)
//! - **Configuration**: [`config`]
//! - **Standard listeners**: Logging, Filter
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use koowa_core;

// Modules
pub mod chain;
#[cfg(feature = "inventory")]
pub mod collected;
pub mod config;
pub mod invoker;
pub mod listeners;
pub mod publisher;
pub mod queue;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;
