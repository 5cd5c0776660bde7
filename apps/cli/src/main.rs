#![allow(clippy::print_stdout)]

mod args;
mod handlers;

use crate::args::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use entitle::domain::config::{EntitleConfig, LoggingConfig};
use entitle::kernel::config::load_config;
use entitle_logger::{Logger, parse_level};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The logger is configured from the loaded file, so events raised while loading are dropped.
    let config: EntitleConfig = load_config(cli.config.as_deref())?;
    let _logger = init_logger(&config.logging)?;
    match &cli.config {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Configuration loaded from defaults and environment"),
    }

    let registry = entitle::init(&config);

    let output = match cli.command {
        Commands::List { module, all } => handlers::list(&registry, module.as_deref(), all)?,
        Commands::Show { name } => handlers::show(&registry, &name)?,
        Commands::Modules => handlers::modules(&registry)?,
        Commands::License { legacy } => handlers::license(&registry, legacy)?,
    };
    println!("{output}");

    Ok(())
}

fn init_logger(config: &LoggingConfig) -> Result<Logger> {
    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&config.level)?);
    if let Some(filter) = &config.filter {
        builder = builder.env_filter(filter.as_str());
    }

    let logger = match &config.path {
        Some(path) => builder.path(path).json(config.json).init(),
        None => builder.init(),
    };
    logger.context("Failed to initialize logging")
}
