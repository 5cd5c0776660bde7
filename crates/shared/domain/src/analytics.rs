//! Analytics payloads sent from an instance to the analytics backend.
//!
//! User names travel hashed; nothing here should carry identifiable data in clear text.

use crate::instance::InstanceTokenAuth;
use entitle_derive::api_model;
use std::collections::BTreeMap;

#[api_model]
pub struct AnalyticsInput {
    #[serde(flatten)]
    pub auth: InstanceTokenAuth,
    pub version: String,
    pub kube_version: String,
    #[serde(rename = "kubeSystemNamespace")]
    pub kube_system_namespace_uid: String,
    /// Gateway requests the analytics server asked for.
    pub requests: Vec<AnalyticsRequest>,
    /// Activity since the previous report.
    pub user_activity: Vec<UserActivity>,
}

/// A request observed by the instance API gateway.
#[api_model]
pub struct AnalyticsRequest {
    /// Unix timestamp of the request.
    pub timestamp: i64,
    pub hostname: String,
    pub proxy_hostname: String,
    /// Target cluster, if any.
    pub cluster: String,
    pub group: String,
    pub version: String,
    pub verb: String,
    pub resource: String,
    pub namespace: String,
    pub name: String,
    /// JSON-encoded object returned by the server.
    pub object: String,
    #[serde(rename = "user")]
    pub user_uid: String,
    /// Hashed user name.
    pub username: String,
}

impl AnalyticsRequest {
    /// Names of the required fields that are empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("group", self.group.is_empty()),
            ("version", self.version.is_empty()),
            ("verb", self.verb.is_empty()),
            ("resource", self.resource.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

/// Per-user activity keyed by `cluster/namespace`, counting requests against each target.
#[api_model]
pub struct UserActivity {
    #[serde(rename = "user")]
    pub user_uid: String,
    pub username: String,
    pub activity: BTreeMap<String, u64>,
}

impl UserActivity {
    /// Total number of requests across all targets.
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.activity.values().sum()
    }
}
