//! Legacy corpus id aliases.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Maps legacy corpus ids to the id whose project files they share.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: FxHashMap<String, String>,
}

impl AliasTable {
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            aliases: map
                .iter()
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect(),
        }
    }

    /// The canonical id for `corpus`; unaliased ids map to themselves.
    ///
    /// Rewriting is a single step, aliases are not chained.
    pub fn resolve<'a>(&'a self, corpus: &'a str) -> &'a str {
        self.aliases.get(corpus).map_or(corpus, String::as_str)
    }
}
