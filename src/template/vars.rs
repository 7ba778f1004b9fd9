//! Flat page variable map.

use rustc_hash::FxHashMap;

use super::TemplateVars;

/// Variables a handler exposes to its template.
#[derive(Debug, Clone, Default)]
pub struct PageVars {
    vars: FxHashMap<String, String>,
}

impl PageVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

impl TemplateVars for PageVars {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}
