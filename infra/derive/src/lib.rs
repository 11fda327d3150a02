#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the workspace.
//!
//! * [`macro@stagehand_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@stagehand_slice`] turns a struct into a cheaply cloneable feature slice handle.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros;
//! see `tests/ui` for compiled usages.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, Self>` and to `Result<T, Source>` for every variant with a source.
/// * **Standard Conversions**: Implements `From<Source>` for variants containing a
///   `source` field (or a field marked `#[source]`/`#[from]`), enabling `?`.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
/// * **Formatting helper**: Emits a module-level `format_context` function used by the
///   `#[error(...)]` strings. One annotated enum per module.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use stagehand_derive::stagehand_error;
/// use std::borrow::Cow;
///
/// #[stagehand_error]
/// pub enum StoreError {
///     #[error("Storage unavailable{}: {source}", format_context(.context))]
///     Unavailable {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Vec<u8>, StoreError> {
///     std::fs::read("options.bin").context("Reading option snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn stagehand_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as an
/// `Arc` wrapper that derefs to the inner state and implements
/// `stagehand_kernel::domain::registry::FeatureSlice`.
///
/// # Example
/// ```rust,ignore
/// #[stagehand_derive::stagehand_slice]
/// pub struct Catalog {
///     pub service: CatalogService,
/// }
///
/// let slice = Catalog::new(CatalogInner { service });
/// ```
#[proc_macro_attribute]
pub fn stagehand_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
