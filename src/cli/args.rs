//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Multi-corpus search frontend
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: corpus-frontend.toml)
    #[arg(short = 'C', long, global = true, default_value = "corpus-frontend.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Web application directory (relative to the config file)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub webapp: Option<PathBuf>,

    /// URL prefix every route lives under, e.g. /corpus-frontend
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub context_path: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Number of request worker threads
        #[arg(short = 'j', long)]
        workers: Option<usize>,
    },

    /// Show how a request path is routed
    #[command(visible_alias = "r")]
    Route {
        /// Request path, optionally with a query string
        #[arg(value_name = "PATH")]
        path: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run every startup check and exit
    #[command(visible_alias = "c")]
    Check,
}
