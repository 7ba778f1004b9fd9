//! `[admin]` section configuration.
//!
//! ```toml
//! [admin]
//! properties = "/etc/blacklab/corpus-frontend.properties"
//! ```
//!
//! When `properties` is unset the file `<deployment>.properties` is searched
//! for next to the web application, in the system config directories and in
//! the temp directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Explicit admin properties file, bypassing the search.
    pub properties: Option<PathBuf>,
}
