//! Feature resources as they appear on the wire.
//!
//! A [`Feature`] mirrors a cluster-scoped Kubernetes resource: type metadata, object metadata
//! carrying the unique name, a static [`FeatureSpec`] and a live [`FeatureStatus`].

use entitle_derive::api_model;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Display-only grouping of features in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Module {
    DevPod,
    VirtualClusters,
    Kubernetes,
    PlatformAuth,
    PlatformTemplating,
    PlatformDeployment,
    PlatformCustomization,
    PlatformIntegrations,
    /// A label this build does not know about, kept verbatim.
    Other(String),
}

impl Module {
    /// All labels known to this build, in catalog order.
    pub const KNOWN: [Self; 8] = [
        Self::DevPod,
        Self::VirtualClusters,
        Self::Kubernetes,
        Self::PlatformAuth,
        Self::PlatformTemplating,
        Self::PlatformDeployment,
        Self::PlatformCustomization,
        Self::PlatformIntegrations,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DevPod => "DevPod",
            Self::VirtualClusters => "Virtual Clusters",
            Self::Kubernetes => "Kubernetes Management",
            Self::PlatformAuth => "Platform: Authentication",
            Self::PlatformTemplating => "Platform: Templating & Secrets",
            Self::PlatformDeployment => "Platform: Deployment",
            Self::PlatformCustomization => "Platform: Customization",
            Self::PlatformIntegrations => "Platform: Integrations",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for Module {
    fn from(label: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == label)
            .unwrap_or_else(|| Self::Other(label.to_owned()))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Module {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Module {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Cow::<'de, str>::deserialize(deserializer)?;
        Ok(Self::from(label.as_ref()))
    }
}

/// Serialized `kind`/`apiVersion`, both omitted when empty.
#[api_model]
pub struct TypeMeta {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_version: String,
}

/// Object metadata. Features are cluster-scoped, so only the name is carried.
#[api_model]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Static, display-oriented part of a feature.
#[api_model]
pub struct FeatureSpec {
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(
        default,
        deserialize_with = "crate::features::optional_module",
        skip_serializing_if = "crate::features::no_module"
    )]
    pub module: Option<Module>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
}

impl FeatureSpec {
    /// A visible feature shown under `module`.
    pub fn new(display_name: impl Into<String>, module: Module) -> Self {
        Self { hidden: false, module: Some(module), display_name: display_name.into() }
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Live entitlement state of a feature.
///
/// `entitled` says whether the license grants the feature, `enabled` whether it is switched on.
#[api_model]
pub struct FeatureStatus {
    pub entitled: bool,
    pub enabled: bool,
    #[serde(rename = "buy", skip_serializing_if = "String::is_empty")]
    pub buy_link: String,
    #[serde(rename = "try", skip_serializing_if = "String::is_empty")]
    pub try_link: String,
    #[serde(rename = "learnMore", skip_serializing_if = "String::is_empty")]
    pub learn_more_link: String,
}

/// A feature descriptor: identity, display attributes and entitlement status.
///
/// The zero value (`Feature::default()`) means "status unknown", not "disabled".
#[api_model]
pub struct Feature {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: FeatureSpec,
    pub status: FeatureStatus,
}

impl Feature {
    pub fn new(name: impl Into<String>, spec: FeatureSpec) -> Self {
        Self {
            metadata: ObjectMeta { name: name.into() },
            spec,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    #[must_use]
    pub fn with_status(mut self, status: FeatureStatus) -> Self {
        self.status = status;
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_false(value: &bool) -> bool {
    !*value
}

/// An empty label means "no module", as it does for senders that omit the key.
pub(crate) fn optional_module<'de, D>(deserializer: D) -> Result<Option<Module>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<Cow<'de, str>>::deserialize(deserializer)?;
    Ok(label.filter(|label| !label.is_empty()).map(|label| Module::from(label.as_ref())))
}

#[allow(clippy::ref_option)]
pub(crate) fn no_module(module: &Option<Module>) -> bool {
    module.as_ref().is_none_or(|module| module.as_str().is_empty())
}
