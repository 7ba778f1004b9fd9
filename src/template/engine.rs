//! Template engine seam.

use std::path::{Path, PathBuf};

use super::Template;
use crate::error::{FrontendError, Result};
use crate::utils::path::is_safe_segment;

/// Source of named templates.
///
/// The template cache only needs to know whether a template exists and how
/// to load it; everything else about the engine stays behind this trait.
pub trait TemplateEngine: Send + Sync {
    fn exists(&self, name: &str) -> bool;

    fn load(&self, name: &str) -> Result<Template>;
}

/// Templates stored as `<dir>/<name>.<extension>`.
#[derive(Debug, Clone)]
pub struct FileTemplates {
    dir: PathBuf,
    extension: String,
}

impl FileTemplates {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        is_safe_segment(name).then(|| self.dir.join(format!("{name}.{}", self.extension)))
    }
}

impl TemplateEngine for FileTemplates {
    fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_some_and(|p| p.is_file())
    }

    fn load(&self, name: &str) -> Result<Template> {
        let path = self
            .path_for(name)
            .ok_or_else(|| FrontendError::TemplateMissing(name.to_string()))?;
        let source = std::fs::read_to_string(&path).map_err(|e| FrontendError::io(&path, e))?;
        Ok(Template::new(name, source))
    }
}
