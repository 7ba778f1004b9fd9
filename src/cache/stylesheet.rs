//! Stylesheet text cache.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{FrontendError, Result};
use crate::resolve::{ProjectFiles, Provenance, Resource};

/// (corpus, stylesheet name) → full stylesheet text.
pub struct StylesheetCache {
    files: Arc<ProjectFiles>,
    shared_dir: PathBuf,
    sheets: DashMap<(String, String), Arc<str>>,
}

impl StylesheetCache {
    pub fn new(files: Arc<ProjectFiles>, shared_dir: PathBuf) -> Self {
        Self {
            files,
            shared_dir,
            sheets: DashMap::new(),
        }
    }

    /// Stylesheet text for `corpus`, read eagerly and cached.
    ///
    /// The corpus' project directory wins over the shared stylesheet
    /// directory. A stylesheet found in neither is `NotFound` and is not
    /// cached.
    pub fn get(&self, corpus: &str, name: &str) -> Result<Arc<str>> {
        let key = (corpus.to_string(), name.to_string());
        if let Some(sheet) = self.sheets.get(&key) {
            return Ok(Arc::clone(&sheet));
        }

        let resource = self.open(corpus, name)?.ok_or_else(|| FrontendError::NotFound {
            corpus: corpus.to_string(),
            file: name.to_string(),
        })?;
        crate::debug!("cache"; "stylesheet {} for {}: {:?}", name, corpus, resource.provenance());

        let text: Arc<str> = resource.read_to_string()?.into();
        let stored = self.sheets.entry(key).or_insert(text);
        Ok(Arc::clone(stored.value()))
    }

    /// Locate a stylesheet without reading it.
    pub fn open(&self, corpus: &str, name: &str) -> Result<Option<Resource>> {
        if let Some(found) = self.files.resolve(corpus, name, false)? {
            return Ok(Some(found));
        }
        Ok(Resource::find_in(&self.shared_dir, name, Provenance::Generic))
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

}
