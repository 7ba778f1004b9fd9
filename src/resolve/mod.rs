//! Project file resolution: corpus-specific override first, generic second.
//!
//! Layout on disk:
//!
//! ```text
//! projectconfigs/
//! ├── zeebrieven/
//! │   ├── search.xml
//! │   ├── help.inc
//! │   └── article.xsl
//! └── chn/
//!     └── about.inc
//! defaults/
//! ├── help.inc
//! └── about.inc
//! ```
//!
//! The resolver is stateless. Callers that want memoization go through
//! [`crate::cache`]; callers that need the raw present/absent answer (the
//! stylesheet fallback) call it directly.

mod alias;

pub use alias::AliasTable;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FrontendConfig;
use crate::error::{FrontendError, Result};
use crate::utils::path::is_safe_segment;

/// Where a resolved resource came from. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Override in the corpus' own project directory.
    Corpus,
    /// Shared default.
    Generic,
}

/// A resolved file plus where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: PathBuf,
    provenance: Provenance,
}

impl Resource {
    /// Look for `file_name` in `dir`, returning it only if it is a regular file.
    pub fn find_in(dir: &Path, file_name: &str, provenance: Provenance) -> Option<Self> {
        if !is_safe_segment(file_name) {
            return None;
        }
        let path = dir.join(file_name);
        path.is_file().then_some(Self { path, provenance })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    #[cfg(test)]
    pub fn is_corpus_specific(&self) -> bool {
        self.provenance == Provenance::Corpus
    }

    /// Read the whole resource as UTF-8 text.
    pub fn read_to_string(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| FrontendError::io(&self.path, e))
    }
}

/// Resolves `(corpus, file name)` to the most specific existing file.
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    project_dir: PathBuf,
    generic_dir: PathBuf,
    aliases: AliasTable,
}

impl ProjectFiles {
    pub fn new(project_dir: PathBuf, generic_dir: PathBuf, aliases: AliasTable) -> Self {
        Self {
            project_dir,
            generic_dir,
            aliases,
        }
    }

    pub fn from_config(config: &FrontendConfig) -> Self {
        Self::new(
            config.paths.project_configs.clone(),
            config.paths.defaults.clone(),
            AliasTable::from_map(&config.corpus.aliases),
        )
    }

    /// Resolve a project file for `corpus`.
    ///
    /// A corpus-specific file is authoritative. Without one, `must_exist`
    /// decides: `true` consults the generic directory and fails with
    /// `NotFound` if that misses too; `false` returns `None` so the caller
    /// can apply its own default.
    pub fn resolve(
        &self,
        corpus: &str,
        file_name: &str,
        must_exist: bool,
    ) -> Result<Option<Resource>> {
        if let Some(found) = self.corpus_file(corpus, file_name) {
            return Ok(Some(found));
        }

        if !must_exist {
            return Ok(None);
        }

        self.generic_file(corpus, file_name).map(Some)
    }

    /// Resolve a file that has to exist somewhere.
    pub fn require(&self, corpus: &str, file_name: &str) -> Result<Resource> {
        match self.corpus_file(corpus, file_name) {
            Some(found) => Ok(found),
            None => self.generic_file(corpus, file_name),
        }
    }

    /// The generic directory, or `NotFound` naming the canonical corpus.
    fn generic_file(&self, corpus: &str, file_name: &str) -> Result<Resource> {
        Resource::find_in(&self.generic_dir, file_name, Provenance::Generic).ok_or_else(|| {
            FrontendError::NotFound {
                corpus: self.aliases.resolve(corpus).to_string(),
                file: file_name.to_string(),
            }
        })
    }

    /// Only the corpus' own project directory, after alias rewriting.
    fn corpus_file(&self, corpus: &str, file_name: &str) -> Option<Resource> {
        let corpus = self.aliases.resolve(corpus);
        if corpus.is_empty() || !is_safe_segment(corpus) {
            return None;
        }
        let found = Resource::find_in(&self.project_dir.join(corpus), file_name, Provenance::Corpus);
        crate::debug!("resolve"; "{}/{}: {}", corpus, file_name,
            if found.is_some() { "corpus-specific" } else { "not found" });
        found
    }
}
