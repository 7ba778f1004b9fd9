//! `[corpus]` section configuration.
//!
//! ```toml
//! [corpus]
//! # default = "zeebrieven"          # Corpus used when the URL names none
//! fallback = "autosearch"
//! deployment_corpora = ["zeebrieven", "gysseling", "surinaams"]
//!
//! [corpus.aliases]
//! "chn-i" = "chn"
//! ```
//!
//! Without an explicit `default`, a deployment named after one of
//! `deployment_corpora` serves that corpus by default (one deployment per
//! corpus); every other deployment falls back to `fallback`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSection {
    pub default: Option<String>,
    pub fallback: String,
    pub deployment_corpora: Vec<String>,
    /// Legacy corpus ids rewritten before any project file lookup.
    pub aliases: BTreeMap<String, String>,
}

impl Default for CorpusSection {
    fn default() -> Self {
        Self {
            default: None,
            fallback: "autosearch".to_string(),
            deployment_corpora: ["zeebrieven", "gysseling", "surinaams"]
                .map(String::from)
                .to_vec(),
            aliases: BTreeMap::from([("chn-i".to_string(), "chn".to_string())]),
        }
    }
}

impl CorpusSection {
    /// Corpus served when the URL does not name one.
    pub fn default_corpus(&self, deployment: &str) -> String {
        if let Some(corpus) = self.default.as_deref().filter(|c| !c.is_empty()) {
            return corpus.to_string();
        }
        if self.deployment_corpora.iter().any(|c| c == deployment) {
            return deployment.to_string();
        }
        self.fallback.clone()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.fallback.is_empty() {
            diag.error(FieldPath::new("corpus.fallback"), "fallback corpus must not be empty");
        }
        for (from, to) in &self.aliases {
            if from.is_empty() || to.is_empty() {
                diag.error(
                    FieldPath::new("corpus.aliases"),
                    format!("alias '{from}' -> '{to}' has an empty side"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_corpus_from_deployment() {
        let section = CorpusSection::default();
        assert_eq!(section.default_corpus("zeebrieven"), "zeebrieven");
        assert_eq!(section.default_corpus("corpus-frontend"), "autosearch");
    }

    #[test]
    fn test_explicit_default_wins() {
        let config = test_parse_config("[corpus]\ndefault = \"opensonar\"");
        assert_eq!(config.corpus.default_corpus("zeebrieven"), "opensonar");
    }

    #[test]
    fn test_aliases_default_and_override() {
        let config = test_parse_config("");
        assert_eq!(config.corpus.aliases.get("chn-i").map(String::as_str), Some("chn"));

        let config = test_parse_config("[corpus.aliases]\n\"old\" = \"new\"");
        assert_eq!(config.corpus.aliases.len(), 1);
        assert_eq!(config.corpus.aliases.get("old").map(String::as_str), Some("new"));
    }

    #[test]
    fn test_validate_empty_alias() {
        let config = test_parse_config("[corpus]\nfallback = \"\"\n[corpus.aliases]\n\"x\" = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.corpus.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
