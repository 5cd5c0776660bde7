use crate::error::FeatureError;
use crate::registry::{FeatureEntry, Table};
use entitle_domain::features::{Feature, FeatureStatus};
use std::fmt;

/// Computes a feature's live status in place of the static default.
///
/// Implementations may block (e.g., call a license service); the registry applies no timeout
/// and no retries. `fallback` gives access to the static table, so a resolver can start from
/// the registered descriptor and overlay what it learned.
pub trait FeatureResolver: fmt::Debug + Send + Sync {
    /// # Errors
    /// Any failure; the registry returns it to the caller unchanged.
    fn resolve(&self, name: &str, fallback: &DefaultLookup<'_>) -> Result<Feature, FeatureError>;
}

/// Read-only view of the static table handed to resolvers.
#[derive(Clone, Copy)]
pub struct DefaultLookup<'a> {
    table: &'a Table,
}

impl<'a> DefaultLookup<'a> {
    pub(crate) const fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// The statically registered descriptor, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'a Feature> {
        self.table.get(name).map(FeatureEntry::feature)
    }

    /// The statically registered descriptor, or the zero value for unknown names.
    #[must_use]
    pub fn get(&self, name: &str) -> Feature {
        self.lookup(name).cloned().unwrap_or_default()
    }
}

impl fmt::Debug for DefaultLookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultLookup").field("features", &self.table.len()).finish()
    }
}

/// Adapter turning a closure into a [`FeatureResolver`]; built with [`resolver_fn`].
pub struct FnResolver<F>(F);

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

impl<F> FeatureResolver for FnResolver<F>
where
    F: Fn(&str, &DefaultLookup<'_>) -> Result<Feature, FeatureError> + Send + Sync,
{
    fn resolve(&self, name: &str, fallback: &DefaultLookup<'_>) -> Result<Feature, FeatureError> {
        (self.0)(name, fallback)
    }
}

/// Wraps a closure as a resolver.
///
/// ```rust
/// use entitle_registry::{FeatureError, resolver_fn};
///
/// let offline = resolver_fn(|name, _| Err(FeatureError::Resolution {
///     message: format!("license server unreachable while resolving {name}").into(),
///     context: None,
/// }));
/// # let _ = offline;
/// ```
pub const fn resolver_fn<F>(resolve: F) -> FnResolver<F>
where
    F: Fn(&str, &DefaultLookup<'_>) -> Result<Feature, FeatureError> + Send + Sync,
{
    FnResolver(resolve)
}

/// Overlays a fixed status on the statically registered descriptor.
///
/// Used for entitlements that come from configuration rather than a live license check.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitlementResolver {
    status: FeatureStatus,
}

impl EntitlementResolver {
    #[must_use]
    pub const fn new(status: FeatureStatus) -> Self {
        Self { status }
    }

    #[must_use]
    pub const fn status(&self) -> &FeatureStatus {
        &self.status
    }
}

impl FeatureResolver for EntitlementResolver {
    fn resolve(&self, name: &str, fallback: &DefaultLookup<'_>) -> Result<Feature, FeatureError> {
        Ok(fallback.get(name).with_status(self.status.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureRegistry;
    use entitle_domain::features::{FeatureSpec, Module};

    #[test]
    fn default_lookup_reads_static_table() {
        let mut builder = FeatureRegistry::builder();
        builder.register("apps", FeatureSpec::new("Apps", Module::PlatformTemplating));
        let registry = builder.build();
        let lookup = registry.default_lookup();

        assert_eq!(lookup.lookup("apps").map(|f| f.spec.display_name.as_str()), Some("Apps"));
        assert!(lookup.lookup("Apps").is_none());
        assert_eq!(lookup.get("missing"), Feature::default());
    }

    #[test]
    fn entitlement_resolver_keeps_spec_and_replaces_status() {
        let mut builder = FeatureRegistry::builder();
        let handle = builder.register("ha-mode", FeatureSpec::new("HA", Module::PlatformDeployment));
        let status = FeatureStatus {
            entitled: true,
            enabled: false,
            buy_link: "https://example.com/buy".into(),
            ..FeatureStatus::default()
        };
        let handle = builder.with_resolver(handle, EntitlementResolver::new(status.clone()));
        let registry = builder.build();

        let resolved = registry.resolve(&handle).expect("static entitlement never fails");
        assert_eq!(resolved.name(), "ha-mode");
        assert_eq!(resolved.spec.display_name, "HA");
        assert_eq!(resolved.status, status);
    }

    #[test]
    fn fn_resolver_debug_hides_closure() {
        let resolver = resolver_fn(|_, _| Ok(Feature::default()));
        assert_eq!(format!("{resolver:?}"), "FnResolver { .. }");
    }
}
