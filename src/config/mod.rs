//! Frontend configuration management for `corpus-frontend.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── admin      # [admin]
//! │   ├── corpus     # [corpus]
//! │   ├── paths      # [paths]
//! │   └── serve      # [serve]
//! ├── types/         # ConfigError, diagnostics, field paths
//! └── mod.rs         # FrontendConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | `[serve]`  | Interface, port, context path, worker threads        |
//! | `[paths]`  | Web application layout (templates, project configs)  |
//! | `[corpus]` | Default corpus, deployment corpora, aliases          |
//! | `[admin]`  | Explicit location of the admin properties file       |
//!
//! A missing config file is not an error: every section has defaults that
//! describe a web application rooted at the working directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AdminConfig, CorpusSection, PathsConfig, ServeConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing corpus-frontend.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Absolute path to the config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub corpus: CorpusSection,

    #[serde(default)]
    pub admin: AdminConfig,
}

impl FrontendConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The root is the config
    /// file's directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_cli_options(cli);
        let root = config.root.clone();
        config.paths.normalize(&root);
        config.validate()?;

        Ok(config)
    }

    /// Default configuration for a web application rooted at `webapp`.
    #[cfg(test)]
    pub fn with_webapp(webapp: &Path) -> Self {
        let mut config = Self {
            root: webapp.to_path_buf(),
            ..Self::default()
        };
        config.paths.normalize(webapp);
        config
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "ignoring unknown fields in {}: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Context path every route lives under.
    pub fn context_path(&self) -> &str {
        &self.serve.context_path
    }

    /// Corpus served when the URL names none.
    pub fn default_corpus(&self) -> String {
        self.corpus.default_corpus(self.serve.deployment_name())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global and command-specific CLI overrides.
    fn apply_cli_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.paths.webapp, cli.webapp.as_ref());
        Self::update_option(&mut self.serve.context_path, cli.context_path.as_ref());

        if let Commands::Serve {
            interface,
            port,
            workers,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.workers, workers.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting every error before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.serve.validate(&mut diag);
        self.corpus.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> FrontendConfig {
    let (parsed, ignored) = FrontendConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
