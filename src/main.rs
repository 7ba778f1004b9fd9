//! corpus-frontend - one process serving many independently configured corpora.

mod admin;
mod cache;
mod cli;
mod config;
mod core;
mod corpus;
mod dispatch;
mod error;
mod frontend;
mod handler;
mod logger;
mod resolve;
mod router;
mod template;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::FrontendConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = FrontendConfig::load(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(&config),
        Commands::Route { path, json } => cli::route::run_route(&config, path, *json),
        Commands::Check => cli::check::run_check(&config),
    }
}
