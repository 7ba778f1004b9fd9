//! Compiled template cache.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{FrontendError, Result};
use crate::template::{ERROR_TEMPLATE, Template, TemplateEngine};

/// Template name → loaded template.
///
/// Check-and-populate runs under one mutex, so each template is loaded at
/// most once. A name the engine doesn't know resolves to the error
/// template; the requested name itself is never cached.
pub struct TemplateCache {
    engine: Box<dyn TemplateEngine>,
    templates: Mutex<FxHashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    /// Fails if the engine has no error template, since every missing
    /// template resolves to it.
    pub fn new(engine: Box<dyn TemplateEngine>) -> Result<Self> {
        if !engine.exists(ERROR_TEMPLATE) {
            return Err(FrontendError::Configuration(format!(
                "required template '{ERROR_TEMPLATE}' is missing"
            )));
        }
        Ok(Self {
            engine,
            templates: Mutex::new(FxHashMap::default()),
        })
    }

    /// Template `name`, or the error template if it doesn't exist.
    pub fn get(&self, name: &str) -> Result<Arc<Template>> {
        let mut templates = self.templates.lock();

        if let Some(template) = templates.get(name) {
            return Ok(Arc::clone(template));
        }

        let name = if self.engine.exists(name) {
            name
        } else {
            crate::debug!("cache"; "template '{}' missing, using '{}'", name, ERROR_TEMPLATE);
            if let Some(template) = templates.get(ERROR_TEMPLATE) {
                return Ok(Arc::clone(template));
            }
            // Checked at construction; only a deployment broken at runtime gets here.
            if !self.engine.exists(ERROR_TEMPLATE) {
                return Err(FrontendError::TemplateMissing(ERROR_TEMPLATE.to_string()));
            }
            ERROR_TEMPLATE
        };

        let template = Arc::new(self.engine.load(name)?);
        templates.insert(name.to_string(), Arc::clone(&template));
        Ok(template)
    }

    /// Whether `name` has been loaded under its own key.
    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::FileTemplates;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use tempfile::TempDir;

    /// Counts loads so tests can observe the at-most-once guarantee.
    struct CountingEngine {
        inner: FileTemplates,
        loads: Arc<AtomicUsize>,
    }

    impl TemplateEngine for CountingEngine {
        fn exists(&self, name: &str) -> bool {
            self.inner.exists(name)
        }

        fn load(&self, name: &str) -> Result<Template> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load(name)
        }
    }

    fn fixture() -> (TempDir, TemplateCache, Arc<AtomicUsize>) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("error.html"), "error page").unwrap();
        fs::write(dir.path().join("search.html"), "search page").unwrap();
        fs::write(dir.path().join("contentpage.html"), "content page").unwrap();

        let loads = Arc::new(AtomicUsize::new(0));
        let engine = CountingEngine {
            inner: FileTemplates::new(dir.path(), "html"),
            loads: Arc::clone(&loads),
        };
        let cache = TemplateCache::new(Box::new(engine)).unwrap();
        (dir, cache, loads)
    }

    #[test]
    fn test_missing_error_template_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = TemplateCache::new(Box::new(FileTemplates::new(dir.path(), "html")));
        assert!(matches!(result, Err(FrontendError::Configuration(_))));
    }

    #[test]
    fn test_template_loaded_once() {
        let (_dir, cache, loads) = fixture();

        let first = cache.get("search").unwrap();
        let second = cache.get("search").unwrap();

        assert_eq!(first.source(), "search page");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_template_resolves_to_error() {
        let (_dir, cache, _) = fixture();

        let template = cache.get("does-not-exist").unwrap();

        assert_eq!(template.name(), ERROR_TEMPLATE);
        assert_eq!(template.source(), "error page");
        assert!(!cache.contains("does-not-exist"));
        assert!(cache.contains(ERROR_TEMPLATE));
    }

    #[test]
    fn test_missing_template_picked_up_when_added() {
        let (dir, cache, _) = fixture();

        assert_eq!(cache.get("article").unwrap().name(), ERROR_TEMPLATE);
        fs::write(dir.path().join("article.html"), "article page").unwrap();
        assert_eq!(cache.get("article").unwrap().source(), "article page");
    }

    #[test]
    fn test_concurrent_population() {
        let (_dir, cache, loads) = fixture();
        let names = ["search", "contentpage", "error", "missing-a", "missing-b"];

        thread::scope(|s| {
            for _ in 0..32 {
                s.spawn(|| {
                    for _ in 0..20 {
                        for name in names {
                            let template = cache.get(name).unwrap();
                            assert!(!template.source().is_empty());
                        }
                    }
                });
            }
        });

        assert_eq!(cache.len(), 3);
        assert_eq!(loads.load(Ordering::SeqCst), 3);
    }
}
