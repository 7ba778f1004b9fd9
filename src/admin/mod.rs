//! Deployment-wide admin settings.
//!
//! Read once at startup from `<deployment>.properties`:
//!
//! ```properties
//! blsUrl=http://localhost:8080/blacklab-server/
//! blsUrlExternal=/blacklab-server/
//! sourceImagesLocation=https://images.example.org/
//! sourceImagesLocation_zeebrieven=https://zeebrieven.example.org/img/
//! googleAnalyticsKey=UA-000000-1
//! ```
//!
//! `blsUrl` and `blsUrlExternal` are required; everything else is optional
//! and may be overridden per corpus with a `_<corpus>` suffix.

mod locate;
mod manifest;
mod properties;

pub use locate::locate;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::config::FrontendConfig;
use crate::error::{FrontendError, Result};

pub const BLS_URL: &str = "blsUrl";
pub const BLS_URL_EXTERNAL: &str = "blsUrlExternal";
const SOURCE_IMAGES: &str = "sourceImagesLocation";
const ANALYTICS_KEY: &str = "googleAnalyticsKey";

/// Loaded admin properties plus the lazily read build time.
#[derive(Debug)]
pub struct AdminProperties {
    path: PathBuf,
    values: FxHashMap<String, String>,
    manifest: PathBuf,
    build_time: OnceLock<String>,
}

impl AdminProperties {
    /// Locate and load the properties file for this deployment.
    ///
    /// `[admin] properties` bypasses the search.
    pub fn load(config: &FrontendConfig) -> Result<Self> {
        let file_name = format!("{}.properties", config.serve.deployment_name());

        let path = match &config.admin.properties {
            Some(explicit) => explicit.clone(),
            None => locate(&file_name, &config.paths.webapp).ok_or_else(|| {
                FrontendError::Configuration(format!(
                    "file {file_name} (with {BLS_URL} and {BLS_URL_EXTERNAL} settings) not found \
                     next to the web application, in the system config directories or in the temp dir"
                ))
            })?,
        };

        Self::from_file(&path, config.paths.manifest())
    }

    /// Load a specific properties file.
    pub fn from_file(path: &Path, manifest: PathBuf) -> Result<Self> {
        if !path.is_file() {
            return Err(FrontendError::Configuration(format!(
                "property file {} does not exist or is not a regular file",
                path.display()
            )));
        }
        let text = fs::read_to_string(path).map_err(|e| FrontendError::io(path, e))?;
        let props = Self::parse(path, &text, manifest)?;

        crate::debug!("admin"; "loaded {}", path.display());
        crate::debug!("admin"; "{}: {}", BLS_URL, props.required(BLS_URL));
        crate::debug!("admin"; "{}: {}", BLS_URL_EXTERNAL, props.required(BLS_URL_EXTERNAL));
        Ok(props)
    }

    /// Parse properties text, checking the required keys.
    pub fn parse(path: &Path, text: &str, manifest: PathBuf) -> Result<Self> {
        let values = properties::parse(text);

        for key in [BLS_URL, BLS_URL_EXTERNAL] {
            if !values.contains_key(key) {
                return Err(FrontendError::Configuration(format!(
                    "missing {key} setting in {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            values,
            manifest,
            build_time: OnceLock::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Internal search webservice URL for `corpus`, always ending in `/`.
    pub fn webservice_url(&self, corpus: &str) -> String {
        let mut url = with_trailing_slash(self.required(BLS_URL));
        url.push_str(corpus);
        url.push('/');
        url
    }

    /// Browser-facing webservice URL. The corpus segment is only appended
    /// when `corpus` is non-empty.
    pub fn external_webservice_url(&self, corpus: &str) -> String {
        let mut url = with_trailing_slash(self.required(BLS_URL_EXTERNAL));
        if !corpus.is_empty() {
            url.push_str(corpus);
            url.push('/');
        }
        url
    }

    /// Base URL for a corpus' source images, or `""` when none is configured.
    pub fn source_images_location(&self, corpus: &str) -> String {
        if let Some(specific) = self.corpus_override(SOURCE_IMAGES, corpus) {
            return specific.to_string();
        }
        match self.get(SOURCE_IMAGES).unwrap_or_default() {
            "" => String::new(),
            base => format!("{base}{corpus}/"),
        }
    }

    /// Analytics key for `corpus`, falling back to the deployment-wide key.
    pub fn google_analytics_key(&self, corpus: &str) -> &str {
        self.corpus_override(ANALYTICS_KEY, corpus)
            .or_else(|| self.get(ANALYTICS_KEY))
            .unwrap_or_default()
    }

    /// Build time of the web application, read from the manifest once.
    pub fn build_time(&self) -> &str {
        self.build_time
            .get_or_init(|| manifest::build_time(&self.manifest))
    }

    /// Value of `<key>_<corpus>`, if set and non-empty.
    fn corpus_override(&self, key: &str, corpus: &str) -> Option<&str> {
        self.get(&format!("{key}_{corpus}"))
            .filter(|value| !value.is_empty())
    }

    /// Keys checked in `parse`.
    fn required(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }
}

fn with_trailing_slash(base: &str) -> String {
    let mut url = base.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROPS: &str = "\
blsUrl=http://localhost:8080/blacklab-server
blsUrlExternal=/blacklab-server/
sourceImagesLocation=https://images.example.org/
sourceImagesLocation_zeebrieven=https://zeebrieven.example.org/img/
sourceImagesLocation_gysseling=
googleAnalyticsKey=UA-1
googleAnalyticsKey_surinaams=UA-2
";

    fn props(text: &str) -> AdminProperties {
        AdminProperties::parse(Path::new("test.properties"), text, PathBuf::from("MANIFEST.MF")).unwrap()
    }

    #[test]
    fn test_webservice_url() {
        let props = props(PROPS);
        assert_eq!(
            props.webservice_url("zeebrieven"),
            "http://localhost:8080/blacklab-server/zeebrieven/"
        );
    }

    #[test]
    fn test_external_webservice_url() {
        let props = props(PROPS);
        assert_eq!(props.external_webservice_url("zeebrieven"), "/blacklab-server/zeebrieven/");
        assert_eq!(props.external_webservice_url(""), "/blacklab-server/");
    }

    #[test]
    fn test_source_images_location() {
        let props = props(PROPS);
        assert_eq!(
            props.source_images_location("zeebrieven"),
            "https://zeebrieven.example.org/img/"
        );
        // empty override falls through to the base
        assert_eq!(
            props.source_images_location("gysseling"),
            "https://images.example.org/gysseling/"
        );
        assert_eq!(
            props.source_images_location("chn"),
            "https://images.example.org/chn/"
        );
    }

    #[test]
    fn test_source_images_unconfigured() {
        let props = props("blsUrl=a\nblsUrlExternal=b\n");
        assert_eq!(props.source_images_location("chn"), "");
    }

    #[test]
    fn test_google_analytics_key() {
        let props = props(PROPS);
        assert_eq!(props.google_analytics_key("surinaams"), "UA-2");
        assert_eq!(props.google_analytics_key("zeebrieven"), "UA-1");

        let props = self::props("blsUrl=a\nblsUrlExternal=b\n");
        assert_eq!(props.google_analytics_key("zeebrieven"), "");
    }

    #[test]
    fn test_required_keys() {
        let err = AdminProperties::parse(
            Path::new("x.properties"),
            "blsUrl=http://localhost/\n",
            PathBuf::new(),
        )
        .unwrap_err();
        assert!(matches!(err, FrontendError::Configuration(ref m) if m.contains("blsUrlExternal")));
    }

    #[test]
    fn test_from_file_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = AdminProperties::from_file(dir.path(), PathBuf::new()).unwrap_err();
        assert!(matches!(err, FrontendError::Configuration(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.properties");
        fs::write(&path, PROPS).unwrap();

        let mut config = FrontendConfig::with_webapp(dir.path());
        config.admin.properties = Some(path.clone());

        let props = AdminProperties::load(&config).unwrap();
        assert_eq!(props.path(), path);
        assert_eq!(props.build_time(), manifest::NO_MANIFEST);
    }

    #[test]
    fn test_load_from_webapp_parent() {
        let dir = TempDir::new().unwrap();
        let webapp = dir.path().join("app");
        fs::create_dir_all(webapp.join("META-INF")).unwrap();
        fs::write(webapp.join("META-INF/MANIFEST.MF"), "Build-Time: 2024-01-01\n").unwrap();

        let mut config = FrontendConfig::with_webapp(&webapp);
        config.serve.context_path = "/frontend-admin-test-4c1e".to_string();
        fs::write(dir.path().join("frontend-admin-test-4c1e.properties"), PROPS).unwrap();

        let props = AdminProperties::load(&config).unwrap();
        assert_eq!(props.get(BLS_URL_EXTERNAL), Some("/blacklab-server/"));
        assert_eq!(props.build_time(), "2024-01-01");
    }

    #[test]
    fn test_load_not_found() {
        let dir = TempDir::new().unwrap();
        let mut config = FrontendConfig::with_webapp(&dir.path().join("app"));
        config.serve.context_path = "/frontend-missing-9b2d".to_string();

        let err = AdminProperties::load(&config).unwrap_err();
        assert!(matches!(err, FrontendError::Configuration(ref m) if m.contains("frontend-missing-9b2d.properties")));
    }
}
