//! # Feature Registry
//!
//! The canonical set of known features and the logic that resolves their live entitlement
//! status.
//!
//! ## Lifecycle
//!
//! 1.  **Population:** a [`FeatureRegistryBuilder`] collects registrations on a single thread,
//!     usually by [`catalog::register_defaults`] followed by a few
//!     [`FeatureRegistryBuilder::with_resolver`] calls.
//! 2.  **Steady state:** [`FeatureRegistryBuilder::build`] freezes the table into a
//!     [`FeatureRegistry`]. It is immutable, cheap to clone and safe to share between threads,
//!     so no locking is needed on the read path.
//!
//! ## Resolution
//!
//! [`FeatureRegistry::resolve`] is a two-branch dispatch. A feature with a
//! [`FeatureResolver`] gets its status from that resolver, which may consult the static table
//! through the [`DefaultLookup`] it receives. A feature without one resolves to
//! `Feature::default()`, meaning "status unknown" rather than "disabled".
//!
//! ```rust
//! use entitle_registry::{FeatureRegistry, resolver_fn};
//! use entitle_registry::domain::features::{FeatureSpec, FeatureStatus, Module};
//!
//! let mut builder = FeatureRegistry::builder();
//! let sso = builder.register("sso-authentication", FeatureSpec::new("Single Sign-On (SSO)", Module::PlatformAuth));
//! let sso = builder.with_resolver(sso, resolver_fn(|name, fallback| {
//!     let status = FeatureStatus { entitled: true, enabled: true, ..FeatureStatus::default() };
//!     Ok(fallback.get(name).with_status(status))
//! }));
//! let registry = builder.build();
//!
//! assert!(registry.resolve(&sso).unwrap().status.enabled);
//! assert!(registry.lookup("nonexistent").is_none());
//! ```

pub mod catalog;
mod error;
mod registry;
mod resolver;

pub use crate::error::{FeatureError, FeatureErrorExt};
pub use crate::registry::{
    FeatureEntry, FeatureHandle, FeatureRegistry, FeatureRegistryBuilder, Resolution,
};
pub use crate::resolver::{
    DefaultLookup, EntitlementResolver, FeatureResolver, FnResolver, resolver_fn,
};
pub use entitle_domain as domain;
