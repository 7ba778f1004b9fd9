//! `[paths]` section configuration.
//!
//! Describes the on-disk layout of the web application. Every directory
//! except `webapp` is relative to `webapp`.
//!
//! ```toml
//! [paths]
//! webapp = "."                       # Application root (relative to config file)
//! project_configs = "projectconfigs" # Per-corpus overrides: <dir>/<corpus>/<file>
//! defaults = "defaults"              # Generic help/about text
//! stylesheets = "stylesheets"        # Shared XSL stylesheets
//! templates = "templates"            # Page templates
//! template_extension = "html"
//! static_dir = "static"              # Served as-is under the context path
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::path::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub webapp: PathBuf,
    pub project_configs: PathBuf,
    pub defaults: PathBuf,
    pub stylesheets: PathBuf,
    pub templates: PathBuf,
    pub template_extension: String,
    pub static_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            webapp: PathBuf::from("."),
            project_configs: PathBuf::from("projectconfigs"),
            defaults: PathBuf::from("defaults"),
            stylesheets: PathBuf::from("stylesheets"),
            templates: PathBuf::from("templates"),
            template_extension: "html".to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl PathsConfig {
    /// Make every directory absolute: `webapp` against `root`, the rest
    /// against `webapp`.
    pub fn normalize(&mut self, root: &Path) {
        let webapp = expand_tilde(&self.webapp);
        self.webapp = normalize_path(&root.join(webapp));

        for dir in [
            &mut self.project_configs,
            &mut self.defaults,
            &mut self.stylesheets,
            &mut self.templates,
            &mut self.static_dir,
        ] {
            let expanded = expand_tilde(dir);
            *dir = normalize_path(&self.webapp.join(expanded));
        }
    }

    /// Location of the build manifest inside the web application.
    pub fn manifest(&self) -> PathBuf {
        self.webapp.join("META-INF").join("MANIFEST.MF")
    }
}

/// Expand a leading `~` so config paths can point into the user's home.
fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.to_str().unwrap_or_default()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_paths_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.paths.project_configs, PathBuf::from("projectconfigs"));
        assert_eq!(config.paths.template_extension, "html");
    }

    #[test]
    fn test_normalize_relative_to_webapp() {
        let mut paths = test_parse_config("[paths]\nwebapp = \"site\"\nstylesheets = \"xsl\"").paths;
        paths.normalize(Path::new("/srv/frontend"));

        assert_eq!(paths.webapp, PathBuf::from("/srv/frontend/site"));
        assert_eq!(paths.stylesheets, PathBuf::from("/srv/frontend/site/xsl"));
        assert_eq!(paths.templates, PathBuf::from("/srv/frontend/site/templates"));
        assert_eq!(
            paths.manifest(),
            PathBuf::from("/srv/frontend/site/META-INF/MANIFEST.MF")
        );
    }

    #[test]
    fn test_absolute_directory_kept() {
        let mut paths = test_parse_config("[paths]\nproject_configs = \"/etc/corpora\"").paths;
        paths.normalize(Path::new("/srv/frontend"));
        assert_eq!(paths.project_configs, PathBuf::from("/etc/corpora"));
    }
}
