//! The `Frontend` facade: everything a handler may ask for, behind one
//! shared handle.
//!
//! Built once at startup and shared by every request worker. Construction
//! performs all fatal checks (admin properties, error template, context
//! path), so a `Frontend` that exists can serve traffic.

use std::sync::Arc;

use crate::admin::AdminProperties;
use crate::cache::{ConfigCache, StylesheetCache, TemplateCache};
use crate::config::FrontendConfig;
use crate::corpus::CorpusConfig;
use crate::dispatch::{Dispatcher, HandlerRegistry, RouteTable};
use crate::error::{FrontendError, Result};
use crate::handler::{self, Page, Reply, RequestInfo};
use crate::resolve::{ProjectFiles, Resource};
use crate::router::Router;
use crate::template::{FileTemplates, Template, TemplateEngine};
use crate::{debug, log, logger};

const HELP_FILE: &str = "help.inc";
const ABOUT_FILE: &str = "about.inc";

/// Shown instead of the error text for failures that point at the deployment.
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred.";

pub struct Frontend {
    config: FrontendConfig,
    files: Arc<ProjectFiles>,
    configs: ConfigCache,
    templates: TemplateCache,
    stylesheets: StylesheetCache,
    admin: AdminProperties,
    router: Router,
    dispatcher: Dispatcher,
}

impl Frontend {
    /// Production setup: admin properties located on disk, templates read
    /// from the web application, every standard handler registered.
    pub fn new(config: FrontendConfig) -> Result<Self> {
        let admin = AdminProperties::load(&config)?;
        let engine = FileTemplates::new(
            config.paths.templates.clone(),
            config.paths.template_extension.clone(),
        );
        Self::with_parts(config, admin, Box::new(engine), HandlerRegistry::standard())
    }

    pub fn with_parts(
        config: FrontendConfig,
        admin: AdminProperties,
        engine: Box<dyn TemplateEngine>,
        registry: HandlerRegistry,
    ) -> Result<Self> {
        let default_corpus = config.default_corpus();
        debug!("frontend"; "default corpus: {}", default_corpus);

        let router = Router::new(config.context_path(), default_corpus)?;
        let dispatcher = Dispatcher::new(RouteTable::new(config.context_path()), registry);
        let templates = TemplateCache::new(engine)?;

        let files = Arc::new(ProjectFiles::from_config(&config));
        let configs = ConfigCache::new(Arc::clone(&files));
        let stylesheets = StylesheetCache::new(Arc::clone(&files), config.paths.stylesheets.clone());

        Ok(Self {
            config,
            files,
            configs,
            templates,
            stylesheets,
            admin,
            router,
            dispatcher,
        })
    }

    pub fn settings(&self) -> &FrontendConfig {
        &self.config
    }

    pub fn admin(&self) -> &AdminProperties {
        &self.admin
    }

    pub fn context_path(&self) -> &str {
        self.router.context_path()
    }

    pub fn default_corpus(&self) -> &str {
        self.router.default_corpus()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // ========================================================================
    // request handling
    // ========================================================================

    /// Entries currently held by the config, template and stylesheet caches.
    pub fn cache_sizes(&self) -> (usize, usize, usize) {
        (self.configs.len(), self.templates.len(), self.stylesheets.len())
    }

    /// Serve one request. Failures become an error page; this never fails.
    pub fn handle(&self, request: &RequestInfo) -> Reply {
        let routed = self.router.route(&request.path);

        let reply = match self.dispatcher.dispatch(&routed, request, self) {
            Ok(reply) => reply,
            Err(err) => self.error_reply(&routed.corpus, request, &err),
        };

        logger::request(&request.method, &request.path, &routed.corpus, &routed.route, reply.status);
        reply
    }

    /// Error page for the current corpus, or plain text if even that fails.
    fn error_reply(&self, corpus: &str, request: &RequestInfo, err: &FrontendError) -> Reply {
        let message = if err.is_unexpected() {
            log!("error"; "{} {}: {}", request.method, request.path, err);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            debug!("frontend"; "{} {}: {}", request.method, request.path, err);
            err.to_string()
        };

        // a broken search.xml must not also break its error page
        let config = self
            .config(corpus)
            .unwrap_or_else(|_| Arc::new(CorpusConfig::generic(corpus)));
        let mut page = Page::with_config(corpus, request, self, config);

        handler::error::render(&mut page, err.status(), &message).unwrap_or_else(|render_err| {
            log!("error"; "could not render error page: {}", render_err);
            Reply::text(500, INTERNAL_ERROR_MESSAGE)
        })
    }

    // ========================================================================
    // corpus resources
    // ========================================================================

    pub fn config(&self, corpus: &str) -> Result<Arc<CorpusConfig>> {
        self.configs.get(corpus)
    }

    pub fn template(&self, name: &str) -> Result<Arc<Template>> {
        self.templates.get(name)
    }

    pub fn stylesheet(&self, corpus: &str, name: &str) -> Result<Arc<str>> {
        self.stylesheets.get(corpus, name)
    }

    /// Help text for `corpus`; an empty id means the default corpus.
    pub fn help_page(&self, corpus: &str) -> Result<Resource> {
        let corpus = if corpus.is_empty() {
            self.default_corpus()
        } else {
            corpus
        };
        self.files.require(corpus, HELP_FILE)
    }

    pub fn about_page(&self, corpus: &str) -> Result<Resource> {
        self.files.require(corpus, ABOUT_FILE)
    }

    /// Field name serving `role` in `corpus`, or the role itself.
    pub fn special_field(&self, corpus: &str, role: &str) -> Result<String> {
        let config = self.config(corpus)?;
        Ok(config.field_for_function(role).unwrap_or(role).to_string())
    }

    // ========================================================================
    // admin properties
    // ========================================================================

    pub fn webservice_url(&self, corpus: &str) -> String {
        self.admin.webservice_url(corpus)
    }

    pub fn external_webservice_url(&self, corpus: &str) -> String {
        self.admin.external_webservice_url(corpus)
    }

    pub fn source_images_location(&self, corpus: &str) -> String {
        self.admin.source_images_location(corpus)
    }

    pub fn google_analytics_key(&self, corpus: &str) -> &str {
        self.admin.google_analytics_key(corpus)
    }

    pub fn build_time(&self) -> &str {
        self.admin.build_time()
    }
}
