//! Subscriber macro.
//!
//! This module contains:
//! - `#[subscriber]` - Attribute macro turning an inherent impl block into a
//!   `Subscribe` implementation

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Expr, ExprLit, ExprUnary, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, Lit,
    LitStr, Meta, Token, UnOp, Visibility, parse::Parse, parse_macro_input,
};

/// Prefix every listener method name must start with.
const LISTENER_PREFIX: &str = "on";

/// Helper attribute overriding the derived event name.
const EVENT_ATTR: &str = "event";

/// Arguments for the `#[subscriber]` macro.
pub(crate) struct SubscriberArgs {
    /// Default priority of the subscriber.
    pub priority: Option<Expr>,
}

impl Parse for SubscriberArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut priority = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "priority" => {
                    priority = Some(input.parse()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(SubscriberArgs { priority })
    }
}

/// Convert a method name into its event name.
///
/// `on_before_table_select` becomes `onBeforeTableSelect`; names without
/// underscores are kept as they are.
pub(crate) fn event_name(method: &str) -> String {
    let mut segments = method.split('_').filter(|s| !s.is_empty());
    let mut name = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

/// Whether the expression is an integer literal, optionally negated.
fn is_int_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(_), ..
        }) => true,
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => is_int_literal(expr),
        _ => false,
    }
}

/// Extract and remove the `#[event = "..."]` helper attribute.
fn take_event_override(attrs: &mut Vec<Attribute>) -> syn::Result<Option<LitStr>> {
    let mut name = None;
    let mut error = None;

    attrs.retain(|attr| {
        if !attr.path().is_ident(EVENT_ATTR) {
            return true;
        }
        match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) if lit.value().starts_with(LISTENER_PREFIX) => name = Some(lit.clone()),
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => {
                    error = Some(syn::Error::new_spanned(
                        lit,
                        format!("event names must start with `{LISTENER_PREFIX}`"),
                    ));
                }
                other => {
                    error = Some(syn::Error::new_spanned(other, "expected a string literal"));
                }
            },
            other => {
                error = Some(syn::Error::new_spanned(
                    other,
                    "expected `#[event = \"onEventName\"]`",
                ));
            }
        }
        false
    });

    match error {
        Some(err) => Err(err),
        None => Ok(name),
    }
}

/// Check that a listener method has the `(&self, &mut Event)` shape.
fn check_signature(method: &ImplItemFn) -> syn::Result<()> {
    let inputs = &method.sig.inputs;
    let receiver_ok = matches!(
        inputs.first(),
        Some(FnArg::Receiver(r)) if r.reference.is_some() && r.mutability.is_none()
    );

    if !receiver_ok || inputs.len() != 2 {
        return Err(syn::Error::new_spanned(
            &method.sig,
            "listener methods must have the signature `fn(&self, event: &mut Event) -> ListenerResult`",
        ));
    }
    Ok(())
}

/// Implementation of the `#[subscriber]` macro.
pub fn subscriber_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as SubscriberArgs);
    let mut input = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &input.trait_ {
        return syn::Error::new_spanned(
            path,
            "`#[subscriber]` must be placed on an inherent impl block",
        )
        .to_compile_error()
        .into();
    }

    let mut entries = Vec::new();
    for item in input.items.iter_mut() {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        let event_override = match take_event_override(&mut method.attrs) {
            Ok(name) => name,
            Err(err) => return err.to_compile_error().into(),
        };

        let ident = &method.sig.ident;
        let method_name = ident.to_string();
        let is_public = matches!(method.vis, Visibility::Public(_));

        if !is_public || !method_name.starts_with(LISTENER_PREFIX) {
            if let Some(name) = event_override {
                return syn::Error::new_spanned(
                    name,
                    "`#[event]` can only be used on public `on*` methods",
                )
                .to_compile_error()
                .into();
            }
            continue;
        }

        if let Err(err) = check_signature(method) {
            return err.to_compile_error().into();
        }

        let event = event_override
            .map(|lit| lit.value())
            .unwrap_or_else(|| event_name(&method_name));

        entries.push(quote! {
            ::koowa::ListenerMethod::new(#event, Self::#ident)
        });
    }

    let priority_const = args.priority.map(|p| {
        if is_int_literal(&p) {
            quote! { const PRIORITY: ::koowa::Priority = ::koowa::Priority(#p); }
        } else {
            quote! { const PRIORITY: ::koowa::Priority = #p; }
        }
    });

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::koowa::Subscribe for #self_ty #where_clause {
            #priority_const

            fn listener_methods() -> ::std::vec::Vec<::koowa::ListenerMethod<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    };

    TokenStream::from(expanded)
}
