//! Page handlers.
//!
//! A handler is built fresh for every request through the
//! [`HandlerRegistry`](crate::dispatch::HandlerRegistry), handed a [`Page`]
//! with the common variables already filled in, and returns a [`Reply`].

pub mod article;
pub mod content;
pub mod corpora;
pub mod error;
mod request;
pub mod search;

pub use request::RequestInfo;

use std::sync::Arc;

use crate::corpus::CorpusConfig;
use crate::dispatch::HandlerKind;
use crate::error::Result;
use crate::frontend::Frontend;
use crate::template::PageVars;
use crate::utils::html::escape;
use crate::utils::mime;

/// One page kind.
pub trait Handler: Send {
    fn kind(&self) -> HandlerKind;

    /// Fill in page-specific variables and render.
    fn process(&mut self, page: &mut Page<'_>) -> Result<Reply>;
}

/// A finished response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: mime::types::HTML,
            body,
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: mime::types::PLAIN,
            body: body.into(),
        }
    }
}

/// Request-scoped rendering context.
pub struct Page<'a> {
    corpus: &'a str,
    request: &'a RequestInfo,
    frontend: &'a Frontend,
    config: Arc<CorpusConfig>,
    vars: PageVars,
}

impl<'a> Page<'a> {
    /// Load the corpus configuration and fill in the common variables.
    pub fn init(corpus: &'a str, request: &'a RequestInfo, frontend: &'a Frontend) -> Result<Self> {
        let config = frontend.config(corpus)?;
        Ok(Self::with_config(corpus, request, frontend, config))
    }

    /// Like [`Page::init`] with an already loaded configuration.
    pub fn with_config(
        corpus: &'a str,
        request: &'a RequestInfo,
        frontend: &'a Frontend,
        config: Arc<CorpusConfig>,
    ) -> Self {
        let mut vars = PageVars::new();
        vars.set("corpus", corpus);
        vars.set("displayName", config.display_name());
        vars.set("pageTitle", config.display_name());
        vars.set("description", config.description().unwrap_or_default());
        vars.set("contextPath", frontend.context_path());
        vars.set("webserviceUrl", frontend.webservice_url(corpus));
        vars.set("externalWebserviceUrl", frontend.external_webservice_url(corpus));
        vars.set("googleAnalyticsKey", frontend.google_analytics_key(corpus));
        vars.set("buildTime", frontend.build_time());
        vars.set("navLinks", nav_links_html(&config));

        Self {
            corpus,
            request,
            frontend,
            config,
            vars,
        }
    }

    pub fn corpus(&self) -> &'a str {
        self.corpus
    }

    pub fn request(&self) -> &'a RequestInfo {
        self.request
    }

    pub fn frontend(&self) -> &'a Frontend {
        self.frontend
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.set(key, value);
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key)
    }

    /// Render `template_name` with the collected variables.
    pub fn render(&self, template_name: &str, status: u16) -> Result<Reply> {
        let template = self.frontend.template(template_name)?;
        Ok(Reply::html(status, template.render(&self.vars)))
    }
}

/// `<li>` items for the corpus' navigation links.
fn nav_links_html(config: &CorpusConfig) -> String {
    config
        .nav_links()
        .iter()
        .map(|link| {
            format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape(&link.href),
                escape(&link.label)
            )
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A complete web application in a temp dir.

    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::admin::AdminProperties;
    use crate::config::FrontendConfig;
    use crate::dispatch::HandlerRegistry;
    use crate::frontend::Frontend;
    use crate::template::FileTemplates;

    pub const PROPERTIES: &str = "\
blsUrl=http://localhost:8080/blacklab-server/
blsUrlExternal=/blacklab-server/
sourceImagesLocation=https://images.example.org/
googleAnalyticsKey=UA-1
";

    const TEMPLATES: &[(&str, &str)] = &[
        ("error", "{{corpus}}|{{message}}"),
        ("search", "search:{{corpus}}|{{titleField}}|{{authorField}}|{{webserviceUrl}}"),
        ("mpsearch", "mpsearch:{{corpus}}|{{pidField}}"),
        ("contentpage", "content:{{corpus}}|{{{content}}}"),
        ("article", "article:{{docPid}}|{{sourceImages}}|{{{articleStylesheet}}}"),
        ("corpora", "corpora:{{contextPath}}|{{externalWebserviceUrl}}"),
    ];

    pub fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Web application with one configured corpus (`zeebrieven`).
    pub fn webapp() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let webapp = dir.path().join("webapp");

        for (name, source) in TEMPLATES {
            write(&webapp, &format!("templates/{name}.html"), source);
        }
        write(
            &webapp,
            "projectconfigs/zeebrieven/search.xml",
            "<SearchInterface>\
               <InterfaceProperties><DisplayName>Letters as Loot</DisplayName></InterfaceProperties>\
               <FieldProperties>\
                 <Field function=\"title\">title</Field>\
                 <Field function=\"author\">author_name</Field>\
               </FieldProperties>\
               <NavLinks><Link href=\"https://example.org\">Home &amp; away</Link></NavLinks>\
             </SearchInterface>",
        );
        write(&webapp, "projectconfigs/zeebrieven/help.inc", "<p>zeebrieven help</p>");
        write(&webapp, "projectconfigs/zeebrieven/article.xsl", "zeebrieven xsl");
        write(&webapp, "projectconfigs/broken/search.xml", "<NotAnInterface/>");
        write(&webapp, "defaults/help.inc", "<p>generic help</p>");
        write(&webapp, "stylesheets/article.xsl", "shared xsl");

        (dir, webapp)
    }

    pub fn config(webapp: &Path) -> FrontendConfig {
        let mut config = FrontendConfig::with_webapp(webapp);
        config.serve.context_path = "/cf".to_string();
        config
    }

    pub fn frontend_with(config: FrontendConfig, registry: HandlerRegistry) -> Frontend {
        let admin = AdminProperties::parse(
            Path::new("cf.properties"),
            PROPERTIES,
            config.paths.manifest(),
        )
        .unwrap();
        let engine = FileTemplates::new(
            config.paths.templates.clone(),
            config.paths.template_extension.clone(),
        );
        Frontend::with_parts(config, admin, Box::new(engine), registry).unwrap()
    }

    pub fn frontend(webapp: &Path) -> Frontend {
        frontend_with(config(webapp), HandlerRegistry::standard())
    }
}
