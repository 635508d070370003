//! Procedural macros for Koowa.
//!
//! - [`macro@subscriber`] - compile-time listener discovery for subscribers

use proc_macro::TokenStream;

mod subscribe;

/// Turns the public `on*` methods of an inherent impl block into listeners.
///
/// Generates a `koowa::Subscribe` implementation listing every `pub fn`
/// whose name starts with `on`, in declaration order. Snake case names map
/// to camel case event names (`on_before_table_select` listens to
/// `onBeforeTableSelect`); `#[event = "..."]` overrides the derived name
/// and must itself start with `on`.
///
/// # Example
///
/// ```rust,ignore
/// struct AuditLog;
///
/// #[koowa::subscriber(priority = 2)]
/// impl AuditLog {
///     pub fn on_after_table_insert(&self, event: &mut Event) -> ListenerResult {
///         Ok(())
///     }
///
///     #[event = "onAfterFooUSERSTableDelete"]
///     pub fn on_user_deleted(&self, event: &mut Event) -> ListenerResult {
///         Ok(())
///     }
///
///     // Not a listener: not public.
///     fn on_internal(&self, event: &mut Event) -> ListenerResult {
///         Ok(())
///     }
/// }
/// ```
///
/// `priority` accepts an integer literal or a `Priority` constant.
#[proc_macro_attribute]
pub fn subscriber(attr: TokenStream, item: TokenStream) -> TokenStream {
    subscribe::subscriber_impl(attr, item)
}
