//! Requests an instance sends to the license server and the matching responses.

use crate::license::{License, ResourceQuantity};
use entitle_derive::api_model;
use std::collections::BTreeMap;

/// Credentials every instance request carries inline.
#[api_model]
pub struct InstanceTokenAuth {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub certificate: String,
}

/// Registered JWT claims, as used by instance tokens.
#[api_model]
pub struct RegisteredClaims {
    #[serde(rename = "iss", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(rename = "sub", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// A single audience is written as a plain string, as JWT libraries commonly do.
    #[serde(rename = "aud", with = "audience", skip_serializing_if = "Vec::is_empty")]
    pub audience: Vec<String>,
    #[serde(rename = "exp", skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    #[serde(rename = "nbf", skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,
    #[serde(rename = "iat", skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    #[serde(rename = "jti", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// `aud` may be one string or a list of strings.
mod audience {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub(super) fn serialize<S>(audience: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match audience {
            [single] => single.serialize(serializer),
            many => many.serialize(serializer),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(OneOrMany::One(single)) => vec![single],
            Some(OneOrMany::Many(many)) => many,
        })
    }
}

/// Claims of an instance token: the registered claims plus the instance hash.
#[api_model]
pub struct InstanceTokenAuthClaims {
    #[serde(flatten)]
    pub claims: RegisteredClaims,
    pub hash: String,
}

/// Input of the "instance create" check-in: registers the instance and asks for its license.
#[api_model]
pub struct InstanceCreateInput {
    #[serde(flatten)]
    pub auth: InstanceTokenAuth,
    /// Product edition reporting in; empty for the default edition.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Version of the instance software.
    pub version: String,
    pub kube_version: String,
    #[serde(rename = "kubeSystemNamespace")]
    pub kube_system_namespace_uid: String,
    /// Tracked resources currently allocated on the instance.
    #[serde(rename = "quantities", skip_serializing_if = "Option::is_none")]
    pub allocated_resources: Option<BTreeMap<String, ResourceQuantity>>,
    /// Current instance configuration, serialized.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub config: String,
}

impl InstanceCreateInput {
    /// Names of the required fields that are empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("version", self.version.is_empty()),
            ("kubeVersion", self.kube_version.is_empty()),
            ("kubeSystemNamespace", self.kube_system_namespace_uid.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

#[api_model]
pub struct InstanceCreateOutput {
    pub current_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// Input for generating a chat-widget user hash.
#[api_model]
pub struct IntercomHashCreateInput {
    #[serde(flatten)]
    pub auth: InstanceTokenAuth,
    pub name: String,
    pub email: String,
    pub username: String,
}

#[api_model]
pub struct IntercomHashCreateOutput {
    pub current_time: i64,
    pub hash: String,
}

#[api_model]
pub struct ChatAuthCreateInput {
    #[serde(flatten)]
    pub auth: InstanceTokenAuth,
    pub name: String,
    pub email: String,
    pub username: String,
}

#[api_model]
pub struct ChatAuthCreateOutput {}
