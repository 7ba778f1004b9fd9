//! URL router: request path → `{corpus, canonical route}`.
//!
//! ```text
//! /corpus-frontend/zeebrieven/search/  →  zeebrieven, /corpus-frontend/page/search
//! /corpus-frontend/page/help           →  <default>,  /corpus-frontend/page/help
//! /corpus-frontend/                    →  <default>,  /corpus-frontend
//! ```
//!
//! Matching is purely syntactic: nothing here checks that the corpus exists
//! or that the operation has a handler.

use regex::Regex;
use serde::Serialize;

use crate::error::{FrontendError, Result};

/// Characters allowed in a corpus id (owner prefixes like
/// `user@example.org:corpus` included).
const CORPUS_TOKEN: &str = r"[a-zA-Z0-9\-\._!\$&'\(\)\*\+,;:=@]+";

const OPERATION_TOKEN: &str = r"[a-zA-Z0-9\-_]+";

/// Reserved first segment: `<context>/page/<op>` never names a corpus.
const PAGE_SEGMENT: &str = "page";

/// Result of routing one request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routed {
    pub corpus: String,
    pub route: String,
}

#[derive(Debug)]
pub struct Router {
    context_path: String,
    default_corpus: String,
    pattern: Regex,
}

impl Router {
    pub fn new(context_path: &str, default_corpus: impl Into<String>) -> Result<Self> {
        let pattern = format!(
            "^{}/({CORPUS_TOKEN})/({OPERATION_TOKEN})/?$",
            regex::escape(context_path)
        );
        let pattern = Regex::new(&pattern).map_err(|e| {
            FrontendError::Configuration(format!("invalid context path '{context_path}': {e}"))
        })?;

        Ok(Self {
            context_path: context_path.to_string(),
            default_corpus: default_corpus.into(),
            pattern,
        })
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn default_corpus(&self) -> &str {
        &self.default_corpus
    }

    /// Route a request path (query string already removed).
    pub fn route(&self, path: &str) -> Routed {
        let corpus_op = self.pattern.captures(path).and_then(|caps| {
            let corpus = caps.get(1)?.as_str();
            let op = caps.get(2)?.as_str();
            (corpus != PAGE_SEGMENT).then_some((corpus, op))
        });

        let (corpus, route) = match corpus_op {
            Some((corpus, op)) => (
                corpus.to_string(),
                format!("{}/{PAGE_SEGMENT}/{op}", self.context_path),
            ),
            None => (self.default_corpus.clone(), path.to_string()),
        };

        let route = match route.strip_suffix('/') {
            Some(stripped) => stripped.to_string(),
            None => route,
        };

        Routed { corpus, route }
    }
}
