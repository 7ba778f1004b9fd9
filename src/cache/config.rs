//! Corpus configuration cache.

use std::sync::Arc;

use dashmap::DashMap;

use crate::corpus::{CONFIG_FILE, CorpusConfig};
use crate::error::Result;
use crate::resolve::ProjectFiles;

/// Corpus id → loaded (or synthesized) configuration.
pub struct ConfigCache {
    files: Arc<ProjectFiles>,
    configs: DashMap<String, Arc<CorpusConfig>>,
}

impl ConfigCache {
    pub fn new(files: Arc<ProjectFiles>) -> Self {
        Self {
            files,
            configs: DashMap::new(),
        }
    }

    /// Configuration for `corpus`, loading it on first use.
    ///
    /// A corpus without `search.xml` gets a generic configuration bound to
    /// its id. Load failures are returned and nothing is cached.
    pub fn get(&self, corpus: &str) -> Result<Arc<CorpusConfig>> {
        if let Some(config) = self.configs.get(corpus) {
            return Ok(Arc::clone(&config));
        }

        let loaded = Arc::new(self.load(corpus)?);
        let stored = self.configs.entry(corpus.to_string()).or_insert(loaded);
        Ok(Arc::clone(stored.value()))
    }

    fn load(&self, corpus: &str) -> Result<CorpusConfig> {
        match self.files.resolve(corpus, CONFIG_FILE, false)? {
            Some(resource) => {
                crate::debug!("cache"; "config for {}: {}", corpus, resource.path().display());
                CorpusConfig::load(corpus, resource.path())
            }
            None => {
                crate::debug!("cache"; "config for {}: generic", corpus);
                Ok(CorpusConfig::generic(corpus))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::AliasTable;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, ConfigCache) {
        let dir = TempDir::new().unwrap();
        let projects = dir.path().join("projectconfigs");
        fs::create_dir_all(projects.join("zeebrieven")).unwrap();
        fs::create_dir_all(projects.join("broken")).unwrap();
        fs::write(
            projects.join("zeebrieven/search.xml"),
            "<SearchInterface><InterfaceProperties><DisplayName>Letters</DisplayName></InterfaceProperties></SearchInterface>",
        )
        .unwrap();
        fs::write(projects.join("broken/search.xml"), "<Nope/>").unwrap();

        let files = ProjectFiles::new(projects, dir.path().join("defaults"), AliasTable::default());
        (dir, ConfigCache::new(Arc::new(files)))
    }

    #[test]
    fn test_generic_config_is_memoized() {
        let (_dir, cache) = fixture();

        let first = cache.get("gysseling").unwrap();
        let second = cache.get("gysseling").unwrap();

        assert!(first.is_generic());
        assert_eq!(first.corpus(), "gysseling");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_loaded_config_is_memoized() {
        let (_dir, cache) = fixture();

        let first = cache.get("zeebrieven").unwrap();
        let second = cache.get("zeebrieven").unwrap();

        assert!(!first.is_generic());
        assert_eq!(first.display_name(), "Letters");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_broken_config_not_cached() {
        let (_dir, cache) = fixture();

        assert!(cache.get("broken").is_err());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_concurrent_population() {
        let (_dir, cache) = fixture();
        let corpora: Vec<String> = (0..16).map(|i| format!("corpus-{i}")).collect();

        let results: Vec<Vec<Arc<CorpusConfig>>> = thread::scope(|s| {
            let handles: Vec<_> = (0..32)
                .map(|_| {
                    s.spawn(|| {
                        corpora
                            .iter()
                            .chain(std::iter::once(&"zeebrieven".to_string()))
                            .map(|c| cache.get(c).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), corpora.len() + 1);
        // every thread observed the single stored value per key
        for per_thread in &results {
            for (config, expected) in per_thread.iter().zip(&results[0]) {
                assert!(Arc::ptr_eq(config, expected));
            }
        }
    }
}
