//! Command handlers. Each returns the JSON document to print.

use anyhow::{Result, bail};
use entitle::domain::features::{Feature, Module};
use entitle::domain::license::LegacyLicense;
use entitle::registry::FeatureRegistry;
use serde::Serialize;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Catalog in registration order. Hidden features are skipped unless `all` is set.
pub(crate) fn list(registry: &FeatureRegistry, module: Option<&str>, all: bool) -> Result<String> {
    let module = module.map(Module::from);
    let features: Vec<&Feature> = registry
        .iter()
        .filter(|f| all || !f.spec.hidden)
        .filter(|f| module.is_none() || f.spec.module == module)
        .collect();
    to_json(&features)
}

/// The static descriptor, or the resolved one when the feature has an entitlement attached.
pub(crate) fn show(registry: &FeatureRegistry, name: &str) -> Result<String> {
    let Some(handle) = registry.handle(name) else {
        bail!("Unknown feature '{name}'");
    };

    if registry.has_resolver(&handle) {
        to_json(&registry.resolve(&handle)?)
    } else {
        to_json(&registry.lookup(name))
    }
}

pub(crate) fn modules(registry: &FeatureRegistry) -> Result<String> {
    let labels: Vec<&str> = registry.modules().into_iter().map(Module::as_str).collect();
    to_json(&labels)
}

pub(crate) fn license(registry: &FeatureRegistry, legacy: bool) -> Result<String> {
    let license = entitle::license(registry)?;
    if legacy { to_json(&LegacyLicense::from(license)) } else { to_json(&license) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entitle::registry::catalog::{default_registry, names};

    #[test]
    fn list_skips_hidden_by_default() {
        let registry = default_registry();
        let visible: Vec<Feature> = serde_json::from_str(&list(&registry, None, false).unwrap()).unwrap();
        let every: Vec<Feature> = serde_json::from_str(&list(&registry, None, true).unwrap()).unwrap();

        assert!(visible.iter().all(|f| !f.spec.hidden));
        assert_eq!(every.len(), names::ALL.len());
        assert!(visible.len() < every.len());
    }

    #[test]
    fn list_filters_by_module_label() {
        let registry = default_registry();
        let auth: Vec<Feature> =
            serde_json::from_str(&list(&registry, Some("Platform: Authentication"), false).unwrap())
                .unwrap();

        assert_eq!(auth.len(), 5);
        assert!(auth.iter().all(|f| f.spec.module == Some(Module::PlatformAuth)));
    }

    #[test]
    fn show_rejects_unknown_names() {
        let err = show(&default_registry(), "nonexistent").unwrap_err();
        assert_eq!(err.to_string(), "Unknown feature 'nonexistent'");
    }
}
