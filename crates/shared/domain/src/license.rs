//! License payloads returned to instances when they check in with the license server.

use crate::features::{FeatureSpec, FeatureStatus, Module};
use entitle_derive::api_model;
use std::collections::BTreeMap;

/// Announcement key holding the title in [`LegacyLicense::announcements`].
pub const LEGACY_ANNOUNCEMENT_NAME: &str = "name";
/// Announcement key holding the body in [`LegacyLicense::announcements`].
pub const LEGACY_ANNOUNCEMENT_CONTENT: &str = "content";

/// A UI button linking to an external licensing flow.
#[api_model]
pub struct Button {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_text: String,
    #[serde(skip_serializing_if = "crate::features::is_false")]
    pub direct: bool,
}

pub type Buttons = Vec<Button>;

/// License data for an instance.
#[api_model]
pub struct License {
    /// License server endpoints the instance may need to call.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Buttons,
    #[serde(skip_serializing_if = "crate::features::is_false")]
    pub is_offline: bool,
    #[serde(rename = "announcement", skip_serializing_if = "Vec::is_empty")]
    pub announcements: Vec<AnnouncementStatus>,
    /// Requests the instance must block because of license overrun.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_requests: Option<Vec<Request>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub limits: Vec<ResourceQuantity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<LicenseFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
    /// JWT carrying the public URL of the instance.
    pub domain_token: String,
}

/// One feature entry of a [`License`]: the name with spec and status flattened beside it.
#[api_model]
pub struct LicenseFeature {
    pub name: String,
    #[serde(flatten)]
    pub spec: FeatureSpec,
    #[serde(flatten)]
    pub status: FeatureStatus,
}

/// Pre-feature-list license layout still understood by older instances.
#[api_model]
pub struct LegacyLicense {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Buttons,
    #[serde(skip_serializing_if = "crate::features::is_false")]
    pub is_offline: bool,
    #[serde(rename = "announcement", skip_serializing_if = "BTreeMap::is_empty")]
    pub announcements: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_requests: Option<Vec<Request>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub limits: Vec<ResourceQuantity>,
    /// Feature name to enabled flag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
    pub domain_token: String,
}

impl From<License> for LegacyLicense {
    /// Only the first announcement survives; the legacy map holds a single `name`/`content` pair.
    fn from(license: License) -> Self {
        let announcements = license
            .announcements
            .into_iter()
            .next()
            .map(|a| {
                BTreeMap::from([
                    (LEGACY_ANNOUNCEMENT_NAME.to_owned(), a.title),
                    (LEGACY_ANNOUNCEMENT_CONTENT.to_owned(), a.body),
                ])
            })
            .unwrap_or_default();

        Self {
            buttons: license.buttons,
            is_offline: license.is_offline,
            announcements,
            block_requests: license.block_requests,
            limits: license.limits,
            features: license.features.into_iter().map(|f| (f.name, f.status.enabled)).collect(),
            analytics: license.analytics,
            domain_token: license.domain_token,
        }
    }
}

/// Announcement shown inside the instance UI. Title and body are HTML.
#[api_model]
pub struct AnnouncementStatus {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// Public URL of an instance, as carried inside [`License::domain_token`].
#[api_model]
pub struct DomainToken {
    pub url: String,
}

/// Analytics endpoint and the requests an instance should report to it.
#[api_model]
pub struct Analytics {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<Request>,
}

/// An API group/resource together with the verbs of interest.
#[api_model]
pub struct Request {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verbs: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource: String,
}

/// A resource kind and a counter for it, used for limits and allocations.
#[api_model]
pub struct ResourceQuantity {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "crate::features::optional_module",
        skip_serializing_if = "crate::features::no_module"
    )]
    pub module: Option<Module>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "adjustURL", skip_serializing_if = "String::is_empty")]
    pub adjust_link: String,
    pub quantity: i64,
}
