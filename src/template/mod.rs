//! Page templates.
//!
//! - `engine` - the [`TemplateEngine`] seam and its file-backed implementation
//! - `vars` - [`PageVars`], the flat variable map handlers fill in
//!
//! Template syntax is deliberately small:
//!
//! ```text
//! <title>{{pageTitle}}</title>      escaped substitution
//! <div>{{{content}}}</div>          raw substitution (help/about HTML)
//! ```
//!
//! Unknown keys render as empty strings.

mod engine;
mod vars;

pub use engine::{FileTemplates, TemplateEngine};
pub use vars::PageVars;

use crate::utils::html::escape;

/// Name of the template every missing template resolves to.
pub const ERROR_TEMPLATE: &str = "error";

/// Trait for template variable sets
pub trait TemplateVars {
    /// Value for `key`, if set.
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// A loaded template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `{{key}}` (escaped) and `{{{key}}}` (raw) placeholders.
    pub fn render<V: TemplateVars>(&self, vars: &V) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start..];

            let (raw, open, close) = if after.starts_with("{{{") {
                (true, 3, "}}}")
            } else {
                (false, 2, "}}")
            };

            let Some(end) = after[open..].find(close) else {
                // Unterminated placeholder: emit the remainder verbatim
                out.push_str(after);
                return out;
            };

            let key = after[open..open + end].trim();
            let value = vars.lookup(key).unwrap_or_default();
            if raw {
                out.push_str(value);
            } else {
                out.push_str(&escape(value));
            }
            rest = &after[open + end + close.len()..];
        }

        out.push_str(rest);
        out
    }
}
