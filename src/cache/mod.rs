//! Process-lifetime caches for corpus-scoped resources.
//!
//! | Cache             | Key                | Concurrency                         |
//! |-------------------|--------------------|-------------------------------------|
//! | `ConfigCache`     | corpus             | sharded map, first insert wins      |
//! | `TemplateCache`   | template name      | one mutex around check-and-populate |
//! | `StylesheetCache` | (corpus, name)     | sharded map, first insert wins      |
//!
//! Entries are never evicted: corpus configuration, templates and
//! stylesheets are static for the lifetime of the process.
//!
//! The sharded caches derive values outside any lock. Two threads missing
//! the same key at once may both do the work, but only the first value is
//! stored and both callers get that stored value back.

mod config;
mod stylesheet;
mod template;

pub use config::ConfigCache;
pub use stylesheet::StylesheetCache;
pub use template::TemplateCache;
