//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "entitle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect the feature catalog and render license payloads")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON); defaults to an optional `entitle.*` in the
    /// working directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the feature catalog as JSON
    List {
        /// Only features grouped under this module label (e.g. 'Platform: Authentication')
        #[arg(short, long)]
        module: Option<String>,
        /// Include hidden features
        #[arg(short, long)]
        all: bool,
    },
    /// Print one feature, with its resolved status when an entitlement is configured
    Show {
        /// Feature name (e.g. 'sso-authentication')
        name: String,
    },
    /// Print the module labels in catalog order
    Modules,
    /// Print the license payload for the configured entitlements
    License {
        /// Use the pre-feature-list layout understood by older instances
        #[arg(long)]
        legacy: bool,
    },
}
