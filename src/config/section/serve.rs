//! `[serve]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"            # Network interface (127.0.0.1 = localhost only)
//! port = 8080                        # HTTP port number
//! context_path = "/corpus-frontend"  # URL prefix every route lives under
//! workers = 8                        # Request worker threads
//! ```
//!
//! The context path also names the deployment: the admin properties file is
//! looked up as `<deployment>.properties`.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// URL prefix of the application, `""` or `/name` (no trailing slash).
    pub context_path: String,

    /// Number of request worker threads.
    pub workers: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8080,
            context_path: "/corpus-frontend".to_string(),
            workers: 8,
        }
    }
}

impl ServeConfig {
    /// Deployment name derived from the context path.
    ///
    /// A root deployment (`""`) is called `ROOT`, like a servlet container
    /// names its root application.
    pub fn deployment_name(&self) -> &str {
        match self.context_path.trim_start_matches('/') {
            "" => "ROOT",
            name => name,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let context = &self.context_path;
        if !context.is_empty() && !context.starts_with('/') {
            diag.error_with_hint(
                FieldPath::new("serve.context_path"),
                format!("'{context}' must start with '/'"),
                format!("use \"/{context}\""),
            );
        }
        if context.ends_with('/') {
            diag.error_with_hint(
                FieldPath::new("serve.context_path"),
                format!("'{context}' must not end with '/'"),
                "use \"\" for a root deployment",
            );
        }
        if self.port == 0 {
            diag.error(FieldPath::new("serve.port"), "port must not be 0");
        }
        if self.workers == 0 {
            diag.error(FieldPath::new("serve.workers"), "at least one worker is required");
        }
    }
}
