use entitle_kernel::config::{ConfigError, load_config, load_config_with_env};
use entitle_kernel::domain::config::EntitleConfig;
use std::fs;

fn env(vars: &[(&str, &str)]) -> config::Map<String, String> {
    vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}
use tempfile::tempdir;

const SAMPLE: &str = r#"
[logging]
level = "debug"
filter = "entitle_registry=trace"

[registry.links]
buy = "https://shop.example/buy"

[registry.entitlements.sso-authentication]
entitled = true
enabled = true
learn_more = "https://docs.example/sso"

[registry.entitlements.ha-mode]
entitled = true
"#;

#[test]
fn loads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("entitle.toml");
    fs::write(&path, SAMPLE)?;

    let cfg: EntitleConfig = load_config(Some(&path))?;

    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.filter.as_deref(), Some("entitle_registry=trace"));
    assert_eq!(cfg.registry.links.buy.as_deref(), Some("https://shop.example/buy"));

    let sso = &cfg.registry.entitlements["sso-authentication"];
    assert!(sso.entitled && sso.enabled);
    assert_eq!(sso.links.learn_more.as_deref(), Some("https://docs.example/sso"));

    let ha = &cfg.registry.entitlements["ha-mode"];
    assert!(ha.entitled && !ha.enabled);
    Ok(())
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");

    let err = load_config::<EntitleConfig>(Some(&missing)).expect_err("file is required");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}

#[test]
fn malformed_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[logging\nlevel = ")?;

    assert!(load_config::<EntitleConfig>(Some(&path)).is_err());
    Ok(())
}

#[test]
fn missing_default_file_yields_defaults() {
    let cfg: EntitleConfig = load_config(None::<&str>).expect("default file is optional");
    assert_eq!(cfg.logging.level, "info");
    assert!(cfg.registry.entitlements.is_empty());
}

#[test]
fn boolean_env_overrides_reach_typed_fields() -> Result<(), Box<dyn std::error::Error>> {
    let cfg: EntitleConfig = load_config_with_env(
        None::<&str>,
        env(&[
            ("ENTITLE__LOGGING__JSON", "true"),
            ("ENTITLE__REGISTRY__ENTITLEMENTS__APPS__ENABLED", "true"),
            ("ENTITLE__LOGGING__LEVEL", "debug"),
        ]),
    )?;

    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.level, "debug");
    let apps = &cfg.registry.entitlements["apps"];
    assert!(apps.enabled && !apps.entitled);
    Ok(())
}

#[test]
fn env_overrides_keep_hyphenated_feature_names() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("entitle.toml");
    fs::write(&path, SAMPLE)?;

    let cfg: EntitleConfig = load_config_with_env(
        Some(&path),
        env(&[
            (
                "ENTITLE__REGISTRY__ENTITLEMENTS__SSO-AUTHENTICATION__BUY",
                "https://shop.example/sso",
            ),
            ("ENTITLE__REGISTRY__ENTITLEMENTS__HA-MODE__ENABLED", "TRUE"),
        ]),
    )?;

    assert!(!cfg.registry.entitlements.contains_key("sso_authentication"));
    let sso = &cfg.registry.entitlements["sso-authentication"];
    assert!(sso.entitled && sso.enabled);
    assert_eq!(sso.links.buy.as_deref(), Some("https://shop.example/sso"));
    assert!(cfg.registry.entitlements["ha-mode"].enabled);
    Ok(())
}
