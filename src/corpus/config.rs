//! `search.xml` parsing.
//!
//! ```xml
//! <SearchInterface>
//!   <InterfaceProperties>
//!     <DisplayName>Letters as Loot</DisplayName>
//!     <Description>Dutch letters from the 17th-19th century</Description>
//!   </InterfaceProperties>
//!   <FieldProperties>
//!     <Field function="title">title</Field>
//!     <Field function="author">author_name</Field>
//!   </FieldProperties>
//!   <NavLinks>
//!     <Link href="https://example.org/">Home</Link>
//!   </NavLinks>
//! </SearchInterface>
//! ```
//!
//! Elements not listed above are ignored.

use std::path::Path;

use quick_xml::{Reader, escape, events::Event};
use rustc_hash::FxHashMap;

use crate::error::{FrontendError, Result};

const ROOT: &str = "SearchInterface";

/// A navigation link shown in the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Website configuration for one corpus. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    corpus: String,
    display_name: Option<String>,
    description: Option<String>,
    /// role (title, author, date, pid) -> field name
    fields: FxHashMap<String, String>,
    nav_links: Vec<NavLink>,
    generic: bool,
}

impl CorpusConfig {
    /// Configuration for a corpus without a `search.xml`.
    pub fn generic(corpus: &str) -> Self {
        Self {
            corpus: corpus.to_string(),
            display_name: None,
            description: None,
            fields: FxHashMap::default(),
            nav_links: Vec::new(),
            generic: true,
        }
    }

    /// Load and parse a `search.xml` file.
    pub fn load(corpus: &str, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FrontendError::io(path, e))?;
        Self::parse(corpus, &content).map_err(|message| FrontendError::CorpusConfig {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse `search.xml` content.
    pub fn parse(corpus: &str, xml: &str) -> std::result::Result<Self, String> {
        let mut config = Self {
            generic: false,
            ..Self::generic(corpus)
        };

        // Text is trimmed per element on close, not per event: entity
        // references split text into several events.
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<String> = Vec::new();
        let mut text = String::new();
        let mut attr: Option<String> = None;
        let mut seen_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if stack.is_empty() && name != ROOT {
                        return Err(format!("expected <{ROOT}> root element, found <{name}>"));
                    }
                    seen_root = true;
                    attr = match name.as_str() {
                        "Field" => attribute(&e, b"function")?,
                        "Link" => attribute(&e, b"href")?,
                        _ => None,
                    };
                    text.clear();
                    stack.push(name);
                }
                Ok(Event::Empty(e)) => {
                    if stack.is_empty() {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        if name != ROOT {
                            return Err(format!("expected <{ROOT}> root element, found <{name}>"));
                        }
                        seen_root = true;
                    }
                }
                Ok(Event::Text(e)) => {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::CData(e)) => {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::GeneralRef(e)) => {
                    let entity = String::from_utf8_lossy(&e).into_owned();
                    match e.resolve_char_ref() {
                        Ok(Some(c)) => text.push(c),
                        Ok(None) => match escape::resolve_predefined_entity(&entity) {
                            Some(value) => text.push_str(value),
                            None => return Err(format!("unknown entity '&{entity};'")),
                        },
                        Err(err) => return Err(format!("invalid reference '&{entity};': {err}")),
                    }
                }
                Ok(Event::End(_)) => {
                    config.apply(&stack, text.trim(), attr.take());
                    text.clear();
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(format!(
                        "error at position {}: {}",
                        reader.buffer_position(),
                        e
                    ));
                }
            }
        }

        if !stack.is_empty() {
            return Err(format!("unclosed element <{}>", stack.join("/")));
        }
        if !seen_root {
            return Err(format!("missing <{ROOT}> root element"));
        }

        Ok(config)
    }

    /// Record the value of the element that just closed.
    fn apply(&mut self, stack: &[String], value: &str, attr: Option<String>) {
        let path: Vec<&str> = stack.iter().map(String::as_str).collect();
        match path.as_slice() {
            [ROOT, "InterfaceProperties", "DisplayName"] if !value.is_empty() => {
                self.display_name = Some(value.to_string());
            }
            [ROOT, "InterfaceProperties", "Description"] if !value.is_empty() => {
                self.description = Some(value.to_string());
            }
            [ROOT, "FieldProperties", "Field"] => {
                if let Some(function) = attr.filter(|f| !f.is_empty()) {
                    self.fields.insert(function, value.to_string());
                }
            }
            [ROOT, "NavLinks", "Link"] => {
                if let Some(href) = attr {
                    self.nav_links.push(NavLink {
                        label: value.to_string(),
                        href,
                    });
                }
            }
            _ => {}
        }
    }

    pub fn corpus(&self) -> &str {
        &self.corpus
    }

    /// Configured display name, or the corpus id.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.corpus)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Which field serves `role` (title, author, date, pid), if configured.
    pub fn field_for_function(&self, role: &str) -> Option<&str> {
        self.fields
            .get(role)
            .map(String::as_str)
            .filter(|f| !f.is_empty())
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.nav_links
    }

    /// Whether this config was synthesized because no `search.xml` exists.
    pub const fn is_generic(&self) -> bool {
        self.generic
    }
}

/// Attribute value with XML references resolved.
fn attribute(
    e: &quick_xml::events::BytesStart<'_>,
    key: &[u8],
) -> std::result::Result<Option<String>, String> {
    let Some(attr) = e.attributes().flatten().find(|a| a.key.as_ref() == key) else {
        return Ok(None);
    };
    let raw = String::from_utf8_lossy(&attr.value);
    escape::unescape(&raw)
        .map(|value| Some(value.into_owned()))
        .map_err(|err| format!("invalid attribute {}: {err}", String::from_utf8_lossy(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<SearchInterface>
  <InterfaceProperties>
    <DisplayName>Letters as Loot</DisplayName>
    <Description>Letters &amp; papers</Description>
  </InterfaceProperties>
  <FieldProperties>
    <Field function="title">title</Field>
    <Field function="author">author_name</Field>
    <Field function="date"></Field>
  </FieldProperties>
  <NavLinks>
    <Link href="https://example.org/?a=1&amp;b=2">Home</Link>
  </NavLinks>
  <SomethingElse><Nested>ignored</Nested></SomethingElse>
</SearchInterface>
"#;

    #[test]
    fn test_parse_full() {
        let config = CorpusConfig::parse("zeebrieven", SEARCH_XML).unwrap();

        assert!(!config.is_generic());
        assert_eq!(config.corpus(), "zeebrieven");
        assert_eq!(config.display_name(), "Letters as Loot");
        assert_eq!(config.description(), Some("Letters & papers"));
        assert_eq!(config.field_for_function("title"), Some("title"));
        assert_eq!(config.field_for_function("author"), Some("author_name"));
        assert_eq!(config.field_for_function("date"), None);
        assert_eq!(config.field_for_function("pid"), None);
        assert_eq!(
            config.nav_links(),
            &[NavLink {
                label: "Home".into(),
                href: "https://example.org/?a=1&b=2".into()
            }]
        );
    }

    #[test]
    fn test_generic() {
        let config = CorpusConfig::generic("gysseling");
        assert!(config.is_generic());
        assert_eq!(config.display_name(), "gysseling");
        assert_eq!(config.field_for_function("title"), None);
    }

    #[test]
    fn test_wrong_root_rejected() {
        let err = CorpusConfig::parse("x", "<Config><DisplayName>x</DisplayName></Config>").unwrap_err();
        assert!(err.contains("SearchInterface"));
    }

    #[test]
    fn test_empty_document_rejected() {
        assert!(CorpusConfig::parse("x", "").is_err());
        assert!(CorpusConfig::parse("x", "<SearchInterface/>").is_ok());
    }

    #[test]
    fn test_xml_references_only() {
        let config = CorpusConfig::parse(
            "x",
            "<SearchInterface><InterfaceProperties>\
               <DisplayName>&lt;A&gt; &#65;&#x42; &apos;s</DisplayName>\
             </InterfaceProperties></SearchInterface>",
        )
        .unwrap();
        assert_eq!(config.display_name(), "<A> AB 's");

        let html_only = "<SearchInterface><InterfaceProperties>\
               <DisplayName>a&nbsp;b</DisplayName>\
             </InterfaceProperties></SearchInterface>";
        assert!(CorpusConfig::parse("x", html_only).unwrap_err().contains("nbsp"));

        let attr = r#"<SearchInterface><NavLinks><Link href="a&nbsp;b">x</Link></NavLinks></SearchInterface>"#;
        assert!(CorpusConfig::parse("x", attr).is_err());
    }

    #[test]
    fn test_unclosed_rejected() {
        assert!(CorpusConfig::parse("x", "<SearchInterface><InterfaceProperties>").is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("search.xml");
        std::fs::write(&path, "<Other/>").unwrap();

        let err = CorpusConfig::load("x", &path).unwrap_err();
        assert!(matches!(err, FrontendError::CorpusConfig { .. }));
        assert!(err.to_string().contains("search.xml"));
    }
}
