#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Entitle crates.
//!
//! * [`entitle_error`] turns an enum into a `thiserror` error with `.context(...)` support.
//! * [`api_model`] applies the wire-type policy used by every DTO in `entitle-domain`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! entitle-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! The examples below are `ignore`d because proc-macro crates cannot use their own macros
//! in doctests; see `tests/ui` for compiled cases.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for wire DTOs exchanged between the license server and its clients.
///
/// # Injected Behaviors
///
/// * **Derives**: adds `Debug`, `Clone`, `Default`, `PartialEq`, `Serialize` and `Deserialize`
///   unless already derived.
/// * **Serde Policy**: `rename_all = "camelCase"` unless overridden, and a container-level
///   `#[serde(default)]` so omitted fields decode to their zero value. Unknown fields are
///   accepted by default so older clients keep working against newer servers; pass
///   `deny_unknown_fields = true` for strictly versioned inputs.
///
/// # Example
///
/// ```rust,ignore
/// use entitle_derive::api_model;
///
/// #[api_model]
/// pub struct DomainToken {
///     pub url: String,
/// }
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = true)]
/// pub struct Strict {
///     pub display_name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro for defining crate-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: generates a companion `<Name>Ext` trait adding `.context(...)` to any
///   `Result` whose error converts into this enum.
/// * **Conversions**: `From<T>` for every variant holding a `source` field, so `?` works on
///   upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant
///   with a `message` field exists.
/// * **`format_context`**: a module-level helper used in `#[error(...)]` strings to render the
///   optional context as ` (context)`.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. Variants with a source (a field named `source` or marked `#[source]`/`#[from]`) must also
///    carry `context: Option<Cow<'static, str>>`.
/// 4. One annotated enum per module, since `format_context` is emitted at module level.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[entitle_derive::entitle_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal config error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings, ConfigError> {
///     builder.build().context("Failed to build config")?.try_deserialize().map_err(Into::into)
/// }
/// ```
#[proc_macro_attribute]
pub fn entitle_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
