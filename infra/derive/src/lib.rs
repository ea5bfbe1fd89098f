#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Castellan crates: error enums, feature slices,
//! API models/handlers, and the runtime entry point.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! castellan-derive.workspace = true
//! ```
//!
//! Examples below are `ignore`d to avoid compiling in this crate; the consuming crates
//! exercise every macro in their own tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, Item, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the specialized Tokio runtime.
///
/// Transforms an `async fn main` into a standard `fn main` that initializes
/// a pre-configured Tokio runtime based on the specified performance profile.
///
/// # Arguments
///
/// * `high_performance` - Optimized for high-throughput server environments.
/// * `memory_efficient` - Optimized for low-footprint CLI or edge environments.
/// * `default` - Worker threads auto-detected based on available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[castellan_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro to define a standard API data model.
///
/// Keeps every DTO consistent by injecting common behaviors and constraints.
///
/// # Injected Behaviors
///
/// * **Derives**: adds `Debug`, `Serialize`, and `Deserialize` if missing.
/// * **`OpenAPI`**: conditionally adds `utoipa::ToSchema` when the `server` feature is enabled.
/// * **Serde Policy**:
///     * `rename_all = "camelCase"` by default (can be overridden).
///     * `deny_unknown_fields` by default on structs (can be disabled; never applied to enums).
///
/// Works on structs and on enums (unit-only enums usually want `rename_all = "kebab-case"`).
///
/// # Example
///
/// ```rust,ignore
/// use castellan_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct CatalogQuery {
///     pub categories: Option<String>,
///     pub q: Option<String>,
/// }
///
/// #[api_model(rename_all = "kebab-case")]
/// pub enum RouteVariant {
///     Primary,
///     LearnMore,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as Item);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments such as `get`, `post`, `path = "..."`,
/// `params(...)`, `responses(...)`, and `tag = "..."`. The `utoipa::path` attribute is only
/// emitted when the consuming crate enables its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// use castellan_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> impl IntoResponse {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: `From<&str>` and `From<String>` when an `Internal` variant is present.
/// * **Stable Codes**: a `code()` method returning the snake-cased variant name,
///   used by the HTTP layer as the machine-readable error code.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[castellan_derive::castellan_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings, ConfigError> {
///     builder.build().context("Failed to build config")?.try_deserialize().map_err(Into::into)
/// }
/// ```
#[proc_macro_attribute]
pub fn castellan_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a vertical slice handle.
///
/// 1. Generates a thread-safe `Arc` wrapper around `<Name>Inner`.
/// 2. Implements `Deref` for transparent access to the inner state.
/// 3. Implements `FeatureSlice` for registration in the kernel state.
///
/// # Example
/// ```rust,ignore
/// #[castellan_derive::castellan_slice]
/// pub struct Catalog {
///     pub store: CatalogStore,
/// }
///
/// let slice = Catalog::new(CatalogInner { store: CatalogStore::castle() });
/// ```
#[proc_macro_attribute]
pub fn castellan_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
