use entitle_domain::analytics::{AnalyticsInput, UserActivity};
use entitle_domain::features::{Feature, FeatureSpec, FeatureStatus, Module};
use entitle_domain::instance::{InstanceCreateInput, InstanceTokenAuth, InstanceTokenAuthClaims};
use entitle_domain::license::{
    AnnouncementStatus, LegacyLicense, License, LicenseFeature, ResourceQuantity,
};
use serde_json::json;

fn sso() -> LicenseFeature {
    LicenseFeature {
        name: "sso-authentication".to_owned(),
        spec: FeatureSpec::new("Single Sign-On (SSO)", Module::PlatformAuth),
        status: FeatureStatus {
            entitled: true,
            enabled: false,
            buy_link: "https://shop.example/buy".to_owned(),
            try_link: "https://shop.example/try".to_owned(),
            learn_more_link: "https://docs.example/sso".to_owned(),
        },
    }
}

#[test]
fn license_feature_uses_fixed_field_names() {
    let value = serde_json::to_value(sso()).expect("serialize");
    assert_eq!(
        value,
        json!({
            "name": "sso-authentication",
            "module": "Platform: Authentication",
            "displayName": "Single Sign-On (SSO)",
            "entitled": true,
            "enabled": false,
            "buy": "https://shop.example/buy",
            "try": "https://shop.example/try",
            "learnMore": "https://docs.example/sso"
        })
    );
}

#[test]
fn empty_attributes_are_omitted_but_flags_are_not() {
    let feature = LicenseFeature { name: "runners".to_owned(), ..LicenseFeature::default() };
    let value = serde_json::to_value(feature).expect("serialize");
    assert_eq!(value, json!({ "name": "runners", "entitled": false, "enabled": false }));
}

#[test]
fn hidden_flag_is_emitted_when_set() {
    let feature = LicenseFeature {
        name: "cluster-access".to_owned(),
        spec: FeatureSpec { hidden: true, ..FeatureSpec::default() },
        ..LicenseFeature::default()
    };
    let value = serde_json::to_value(feature).expect("serialize");
    assert_eq!(value["hidden"], json!(true));
}

#[test]
fn feature_resource_nests_metadata_spec_and_status() {
    let feature = Feature::new("vcluster", FeatureSpec::new("Virtual Cluster CRD & Controller", Module::VirtualClusters));
    let value = serde_json::to_value(&feature).expect("serialize");

    assert_eq!(value["metadata"], json!({ "name": "vcluster" }));
    assert_eq!(value["spec"]["module"], json!("Virtual Clusters"));
    assert_eq!(value["status"], json!({ "entitled": false, "enabled": false }));
    assert!(value.get("kind").is_none());

    let back: Feature = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, feature);
}

#[test]
fn unknown_module_survives_round_trip() {
    let raw = json!({ "name": "x", "module": "Platform: Observability", "entitled": false, "enabled": true });
    let feature: LicenseFeature = serde_json::from_value(raw.clone()).expect("deserialize");

    assert_eq!(feature.spec.module, Some(Module::Other("Platform: Observability".to_owned())));
    assert_eq!(serde_json::to_value(feature).expect("serialize"), raw);
}

#[test]
fn license_omits_empty_collections() {
    let license = License { features: vec![sso()], ..License::default() };
    let value = serde_json::to_value(license).expect("serialize");

    let object = value.as_object().expect("object");
    assert!(object.contains_key("features"));
    assert!(object.contains_key("domainToken"));
    assert!(!object.contains_key("buttons"));
    assert!(!object.contains_key("announcement"));
    assert!(!object.contains_key("isOffline"));
}

#[test]
fn legacy_license_flattens_features_and_first_announcement() {
    let mut disabled = sso();
    disabled.name = "audit-logging".to_owned();
    let mut enabled = sso();
    enabled.status.enabled = true;

    let license = License {
        announcements: vec![
            AnnouncementStatus { title: "Maintenance".to_owned(), body: "<p>Sunday</p>".to_owned() },
            AnnouncementStatus { title: "Ignored".to_owned(), body: String::new() },
        ],
        features: vec![enabled, disabled],
        domain_token: "token".to_owned(),
        ..License::default()
    };

    let legacy = LegacyLicense::from(license);
    assert_eq!(legacy.features.get("sso-authentication"), Some(&true));
    assert_eq!(legacy.features.get("audit-logging"), Some(&false));
    assert_eq!(legacy.announcements.get("name").map(String::as_str), Some("Maintenance"));
    assert_eq!(legacy.announcements.get("content").map(String::as_str), Some("<p>Sunday</p>"));
    assert_eq!(legacy.domain_token, "token");
}

#[test]
fn resource_quantity_keeps_legacy_field_names() {
    let quantity = ResourceQuantity {
        kind: "VirtualClusterInstance".to_owned(),
        adjust_link: "https://shop.example/adjust".to_owned(),
        quantity: 0,
        ..ResourceQuantity::default()
    };
    assert_eq!(
        serde_json::to_value(quantity).expect("serialize"),
        json!({ "kind": "VirtualClusterInstance", "adjustURL": "https://shop.example/adjust", "quantity": 0 })
    );
}

#[test]
fn instance_create_input_reads_inline_auth() {
    let raw = json!({
        "token": "t0k3n",
        "version": "4.2.0",
        "kubeVersion": "v1.31.0",
        "kubeSystemNamespace": "5d3c",
        "quantities": { "vcluster": { "kind": "VirtualClusterInstance", "quantity": 3 } }
    });

    let input: InstanceCreateInput = serde_json::from_value(raw).expect("deserialize");
    assert_eq!(input.auth.token, "t0k3n");
    assert_eq!(input.version, "4.2.0");
    assert_eq!(input.kube_system_namespace_uid, "5d3c");
    assert_eq!(input.allocated_resources.as_ref().map(|q| q["vcluster"].quantity), Some(3));
    assert!(input.missing_fields().is_empty());
}

#[test]
fn instance_create_input_reports_missing_required_fields() {
    let input = InstanceCreateInput { version: "4.2.0".to_owned(), ..InstanceCreateInput::default() };
    assert_eq!(input.missing_fields(), vec!["kubeVersion", "kubeSystemNamespace"]);
}

#[test]
fn input_without_auth_writes_no_token() {
    let input = InstanceCreateInput {
        version: "1".to_owned(),
        kube_version: "v1.31.0".to_owned(),
        kube_system_namespace_uid: "5d3c".to_owned(),
        ..InstanceCreateInput::default()
    };
    let value = serde_json::to_value(&input).expect("serialize");
    assert!(value.get("token").is_none());
    assert!(value.get("certificate").is_none());

    let back: InstanceCreateInput = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back.auth, InstanceTokenAuth::default());

    let analytics = serde_json::to_value(AnalyticsInput::default()).expect("serialize");
    assert!(analytics.get("token").is_none());
}

#[test]
fn token_claims_accept_single_audience() {
    let claims: InstanceTokenAuthClaims =
        serde_json::from_value(json!({ "aud": "loft", "hash": "h" })).expect("deserialize");
    assert_eq!(claims.claims.audience, vec!["loft"]);
    assert_eq!(claims.hash, "h");
    assert_eq!(serde_json::to_value(&claims).expect("serialize"), json!({ "aud": "loft", "hash": "h" }));
}

#[test]
fn token_claims_accept_audience_list() {
    let claims: InstanceTokenAuthClaims =
        serde_json::from_value(json!({ "aud": ["loft", "vcluster"], "hash": "h" }))
            .expect("deserialize");
    assert_eq!(claims.claims.audience, vec!["loft", "vcluster"]);
    assert_eq!(
        serde_json::to_value(&claims).expect("serialize"),
        json!({ "aud": ["loft", "vcluster"], "hash": "h" })
    );

    let none: InstanceTokenAuthClaims =
        serde_json::from_value(json!({ "aud": null, "hash": "h" })).expect("deserialize");
    assert!(none.claims.audience.is_empty());
}

#[test]
fn empty_module_label_means_no_module() {
    let spec: FeatureSpec = serde_json::from_str(r#"{"module":"","displayName":"Apps"}"#)
        .expect("deserialize");
    assert_eq!(spec.module, None);
    assert_eq!(serde_json::to_value(&spec).expect("serialize"), json!({ "displayName": "Apps" }));

    let feature: LicenseFeature =
        serde_json::from_value(json!({ "name": "apps", "module": "", "entitled": true }))
            .expect("deserialize");
    assert_eq!(feature.spec.module, None);
    assert!(serde_json::to_value(&feature).expect("serialize").get("module").is_none());

    let quantity: ResourceQuantity =
        serde_json::from_value(json!({ "kind": "Space", "module": "", "quantity": 2 }))
            .expect("deserialize");
    assert_eq!(quantity.module, None);
    assert_eq!(
        serde_json::to_value(&quantity).expect("serialize"),
        json!({ "kind": "Space", "quantity": 2 })
    );

    let blank = FeatureSpec { module: Some(Module::Other(String::new())), ..FeatureSpec::default() };
    assert_eq!(serde_json::to_value(&blank).expect("serialize"), json!({}));
}

#[test]
fn token_claims_flatten_registered_claims() {
    let raw = json!({ "iss": "license-server", "exp": 1_700_000_000, "hash": "abc" });
    let claims: InstanceTokenAuthClaims = serde_json::from_value(raw).expect("deserialize");
    assert_eq!(claims.claims.issuer.as_deref(), Some("license-server"));
    assert_eq!(claims.claims.expiry, Some(1_700_000_000));
    assert_eq!(claims.hash, "abc");
}

#[test]
fn analytics_input_uses_wire_names() {
    let raw = json!({
        "version": "4.2.0",
        "kubeVersion": "v1.31.0",
        "kubeSystemNamespace": "5d3c",
        "requests": [{ "timestamp": 1, "group": "apps", "version": "v1", "verb": "create", "resource": "deployments", "user": "u-1" }],
        "userActivity": [{ "user": "u-1", "username": "h4sh", "activity": { "prod/default": 4, "dev/team-a": 2 } }]
    });

    let input: AnalyticsInput = serde_json::from_value(raw).expect("deserialize");
    assert_eq!(input.requests[0].user_uid, "u-1");
    assert!(input.requests[0].missing_fields().is_empty());

    let activity: &UserActivity = &input.user_activity[0];
    assert_eq!(activity.total_requests(), 6);
}
