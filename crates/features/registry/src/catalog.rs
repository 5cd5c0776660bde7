//! The default feature catalog.
//!
//! Order matters: it is the order features appear in license payloads and in the UI.
//! Display names are left empty where the UI derives them elsewhere.

use crate::registry::{FeatureHandle, FeatureRegistry, FeatureRegistryBuilder};
use entitle_domain::features::{FeatureSpec, Module};

macro_rules! catalog {
    ($( $(#[$attr:meta])* $konst:ident = $name:literal => $spec:expr; )*) => {
        /// Names of the features in the default catalog.
        pub mod names {
            $( $(#[$attr])* pub const $konst: &str = $name; )*

            /// Every catalog name, in catalog order.
            pub const ALL: &[&str] = &[$( $konst ),*];
        }

        /// Registers the whole catalog and returns the handles in catalog order.
        pub fn register_defaults(builder: &mut FeatureRegistryBuilder) -> Vec<FeatureHandle> {
            vec![$( builder.register(names::$konst, $spec) ),*]
        }
    };
}

fn shown(display_name: &str, module: Module) -> FeatureSpec {
    FeatureSpec::new(display_name, module)
}

fn unassigned(display_name: &str) -> FeatureSpec {
    FeatureSpec { display_name: display_name.to_owned(), ..FeatureSpec::default() }
}

fn grouped(module: Module) -> FeatureSpec {
    FeatureSpec { module: Some(module), ..FeatureSpec::default() }
}

fn hidden(module: Option<Module>) -> FeatureSpec {
    FeatureSpec { hidden: true, module, ..FeatureSpec::default() }
}

catalog! {
    // DevPod
    DEVPOD_WORKSPACES = "devpod-workspaces" => hidden(Some(Module::DevPod));
    RUNNERS = "runners" => hidden(Some(Module::DevPod));

    // Virtual clusters
    VIRTUAL_CLUSTERS = "vcluster" => shown("Virtual Cluster CRD & Controller", Module::VirtualClusters);
    VIRTUAL_CLUSTER_SLEEP_MODE = "vcluster-sleep-mode" => shown("Sleep Mode", Module::VirtualClusters);
    VIRTUAL_CLUSTER_BUILT_IN_COREDNS = "vcluster-built-in-coredns" => unassigned("Built-in CoreDNS");
    VIRTUAL_CLUSTER_SYNC_PATCHES = "vcluster-sync-patches" => unassigned("Sync Patches");
    VIRTUAL_CLUSTER_ADMISSION_CONTROL = "vcluster-admission-control" => unassigned("Virtual Admission Control");
    VIRTUAL_CLUSTER_ISOLATED_CONTROL_PLANE = "vcluster-isolated-control-plane" => unassigned("Isolated Control Plane");
    VIRTUAL_CLUSTER_HOST_PATH_MAPPER = "vcluster-host-path-mapper" => unassigned("Central HostPath Mapper");

    // Spaces and clusters
    SPACES = "spaces" => shown("Self-Service Namespaces", Module::Kubernetes);
    SPACE_SLEEP_MODE = "spaces-sleep-mode" => shown("Sleep Mode For Namespaces", Module::Kubernetes);
    CONNECTED_CLUSTERS = "clusters" => shown("Connected Clusters", Module::Kubernetes);
    CLUSTER_ACCESS = "cluster-access" => hidden(None);
    CLUSTER_ROLES = "cluster-roles" => hidden(None);

    // Authentication
    AUDIT_LOGGING = "audit-logging" => shown("Audit Logging", Module::PlatformAuth);
    SSO_AUTH = "sso-authentication" => shown("Single Sign-On (SSO)", Module::PlatformAuth);
    MULTIPLE_SSO_PROVIDERS = "multiple-sso-providers" => shown("Multiple SSO Providers", Module::PlatformAuth);
    AUTOMATIC_INGRESS_AUTH = "auto-ingress-authentication" => shown("Automatic Ingress Authentication", Module::PlatformAuth);
    OIDC_PROVIDER = "oidc-provider" => shown("OIDC Provider", Module::PlatformAuth);

    // Templating
    TEMPLATE_VERSIONING = "template-versioning" => shown("Template Versioning", Module::PlatformTemplating);
    APPS = "apps" => shown("Apps", Module::PlatformTemplating);

    // Secrets
    SECRETS = "secrets" => grouped(Module::PlatformTemplating);
    /// Misspelled on the wire; deployed licenses depend on it.
    SECRET_ENCRYPTION = "secret-encyrption" => grouped(Module::PlatformTemplating);

    // Integrations
    VAULT_INTEGRATION = "vault-integration" => grouped(Module::PlatformIntegrations);
    ARGO_INTEGRATION = "argo-integration" => grouped(Module::PlatformIntegrations);

    // Deployment
    HIGH_AVAILABILITY_MODE = "ha-mode" => shown("High-Availability Mode", Module::PlatformDeployment);
    MULTI_REGION_MODE = "multi-region-mode" => shown("Multi-Region Mode", Module::PlatformDeployment);
    /// Display only.
    AIR_GAPPED_MODE = "air-gapped-mode" => shown("Air-Gapped Mode", Module::PlatformDeployment);

    // UI customization
    CUSTOM_BRANDING = "custom-branding" => shown("Custom Branding", Module::PlatformCustomization);
    ADVANCED_UI_CUSTOMIZATIONS = "advanced-ui-customizations" => shown("Advanced UI Customizations", Module::PlatformCustomization);
}

/// A registry holding the default catalog with no resolvers attached.
#[must_use]
pub fn default_registry() -> FeatureRegistry {
    let mut builder = FeatureRegistry::builder();
    register_defaults(&mut builder);
    builder.build()
}
