use crate::features::FeatureStatus;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the registry and its binaries.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EntitleConfigInner {
    pub logging: LoggingConfig,
    pub registry: RegistryConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct EntitleConfig {
    #[serde(flatten, default)]
    inner: Arc<EntitleConfigInner>,
}

impl Deref for EntitleConfig {
    type Target = EntitleConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for EntitleConfig {
    fn deref_mut(&mut self) -> &mut EntitleConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub level: String,
    /// Extra env-filter directives, e.g. `entitle_registry=debug`.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    /// Write file output as JSON lines.
    pub json: bool,
}

/// Entitlements and links applied on top of the static feature catalog.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Fallback links for features that do not configure their own.
    pub links: LinkConfig,
    /// Feature name to entitlement.
    pub entitlements: BTreeMap<String, EntitlementConfig>,
}

/// Upgrade, trial and documentation links of a feature.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub buy: Option<String>,
    #[serde(rename = "try")]
    pub try_link: Option<String>,
    pub learn_more: Option<String>,
}

impl LinkConfig {
    /// Fills every unset link from `fallback`.
    #[must_use]
    pub fn or(self, fallback: &Self) -> Self {
        Self {
            buy: self.buy.or_else(|| fallback.buy.clone()),
            try_link: self.try_link.or_else(|| fallback.try_link.clone()),
            learn_more: self.learn_more.or_else(|| fallback.learn_more.clone()),
        }
    }
}

/// Configured entitlement of a single feature.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntitlementConfig {
    pub entitled: bool,
    pub enabled: bool,
    #[serde(flatten)]
    pub links: LinkConfig,
}

impl EntitlementConfig {
    /// Builds the wire status, taking missing links from `defaults`.
    #[must_use]
    pub fn status(&self, defaults: &LinkConfig) -> FeatureStatus {
        let links = self.links.clone().or(defaults);
        FeatureStatus {
            entitled: self.entitled,
            enabled: self.enabled,
            buy_link: links.buy.unwrap_or_default(),
            try_link: links.try_link.unwrap_or_default(),
            learn_more_link: links.learn_more.unwrap_or_default(),
        }
    }
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false }
    }
}
