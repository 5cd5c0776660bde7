//! Facade crate for Entitle.
//! Re-exports the domain, kernel and registry crates and wires configuration into the registry.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`EntitleConfig`] with [`kernel::config::load_config`].
//! - Call [`init`] once at startup and share the returned registry.

pub use entitle_domain as domain;
pub use entitle_kernel as kernel;
pub use entitle_registry as registry;

use entitle_domain::config::{EntitleConfig, RegistryConfig};
use entitle_domain::license::License;
use entitle_registry::catalog::register_defaults;
use entitle_registry::{
    EntitlementResolver, FeatureError, FeatureHandle, FeatureRegistry, FeatureRegistryBuilder,
};
use tracing::{info, warn};

/// Builds the registry: the default catalog plus one [`EntitlementResolver`] per configured
/// entitlement.
///
/// Entitlements naming features outside the catalog are logged and skipped. Links missing
/// from an entitlement are taken from `registry.links`. A key with underscores also matches
/// the hyphenated catalog name (`sso_authentication` for `sso-authentication`), since shells
/// cannot export variable names containing `-`.
#[must_use]
pub fn init(config: &EntitleConfig) -> FeatureRegistry {
    let mut builder = FeatureRegistry::builder();
    register_defaults(&mut builder);
    apply_entitlements(&mut builder, &config.registry);
    builder.build()
}

/// Attaches the configured entitlements to already registered features.
///
/// Returns the handles that received a resolver.
pub fn apply_entitlements(
    builder: &mut FeatureRegistryBuilder,
    config: &RegistryConfig,
) -> Vec<FeatureHandle> {
    let mut applied = Vec::with_capacity(config.entitlements.len());
    for (key, entitlement) in &config.entitlements {
        let Some(name) = catalog_name(builder, key) else {
            warn!(feature = %key, "Ignoring entitlement for unknown feature");
            continue;
        };
        let status = entitlement.status(&config.links);
        let handle = FeatureHandle::new(name);
        applied.push(builder.with_resolver(handle, EntitlementResolver::new(status)));
    }
    info!(entitlements = applied.len(), "Configured entitlements applied");
    applied
}

fn catalog_name(builder: &FeatureRegistryBuilder, key: &str) -> Option<String> {
    if builder.contains(key) {
        return Some(key.to_owned());
    }
    let hyphenated = key.replace('_', "-");
    builder.contains(&hyphenated).then_some(hyphenated)
}

/// Assembles the license payload for the current registry state.
///
/// # Errors
/// The first resolver error, unchanged.
pub fn license(registry: &FeatureRegistry) -> Result<License, FeatureError> {
    Ok(License { features: registry.license_features()?, ..License::default() })
}
