use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "entitle";

/// Prefix of environment variable overrides (`ENTITLE__REGISTRY__LINKS__BUY`).
pub const ENV_PREFIX: &str = "ENTITLE";

/// Custom error type for config loading.
#[entitle_derive::entitle_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration by layering a file and environment overrides.
///
/// 1. **Base File**: with `Some(path)` the file must exist and its format is taken from the
///    extension. With `None`, [`DEFAULT_CONFIG_NAME`] is tried with every supported extension
///    in the working directory and silently skipped if absent.
/// 2. **Environment Overrides**: variables prefixed with `ENTITLE__`, nested with `__`
///    (`ENTITLE__LOGGING__LEVEL` maps to `logging.level`). Keys are lowercased and otherwise
///    kept as written, so `ENTITLE__REGISTRY__ENTITLEMENTS__HA-MODE__ENABLED` addresses
///    `ha-mode`. Values are parsed, so `true` and `42` reach typed fields as such.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a file cannot be parsed,
/// or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use entitle_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path, Environment::with_prefix(ENV_PREFIX))
}

/// Same as [`load_config`], with environment overrides read from `vars` instead of the
/// process environment.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: Map<String, String>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path, Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
}

fn layered<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(path) => {
            info!("Loading config from {}", path.as_ref().display());
            File::from(path.as_ref()).required(true)
        },
        None => {
            debug!("Looking for optional '{DEFAULT_CONFIG_NAME}' config file");
            File::with_name(DEFAULT_CONFIG_NAME).required(false)
        },
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(env.separator("__").try_parsing(true))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
