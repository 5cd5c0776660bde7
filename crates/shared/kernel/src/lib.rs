//! Kernel utilities shared by Entitle binaries and services.
//! Keep this crate lightweight; today it owns layered configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use entitle_kernel::config::load_config;
//! use entitle_kernel::domain::config::EntitleConfig;
//!
//! // `entitle.{toml,yaml,json}` if present, then `ENTITLE__*` overrides.
//! let cfg: EntitleConfig = load_config(None::<&str>).unwrap();
//! ```
pub mod config;

pub use entitle_domain as domain;
