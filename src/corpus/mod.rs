//! Per-corpus website configuration (`search.xml`).

mod config;

pub use config::CorpusConfig;

/// File name of the per-corpus configuration inside its project directory.
pub const CONFIG_FILE: &str = "search.xml";
