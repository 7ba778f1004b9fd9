//! `check` command: perform every startup check without binding a port.

use anyhow::{Context, Result};

use crate::config::FrontendConfig;
use crate::dispatch::HandlerKind;
use crate::frontend::Frontend;
use crate::log;

pub fn run_check(config: &FrontendConfig) -> Result<()> {
    let frontend = Frontend::new(config.clone()).context("startup checks failed")?;
    verify(&frontend)
}

/// Checks that need a constructed [`Frontend`].
fn verify(frontend: &Frontend) -> Result<()> {
    log!("check"; "admin properties: {}", frontend.admin().path().display());
    log!("check"; "context path: '{}'", frontend.context_path());
    log!("check"; "default corpus: {}", frontend.default_corpus());
    log!("check"; "build time: {}", frontend.build_time());

    let dispatcher = frontend.dispatcher();
    log!("check"; "{} routes", dispatcher.routes().len());
    for (route, kind) in dispatcher.routes().iter() {
        if kind != HandlerKind::Error {
            crate::debug!("check"; "{} -> {:?}", route, kind);
        }
    }
    let unregistered = dispatcher.unregistered();
    if !unregistered.is_empty() {
        anyhow::bail!("no handler registered for {unregistered:?}");
    }

    // the default corpus is served without naming it, so it has to load
    let corpus = frontend.default_corpus();
    let corpus_config = frontend
        .config(corpus)
        .with_context(|| format!("default corpus '{corpus}' has a broken configuration"))?;
    log!("check"; "{}: {} ({})", corpus_config.corpus(), corpus_config.display_name(),
        if corpus_config.is_generic() { "generic config" } else { "search.xml" });
    frontend.template("search").context("search template failed to load")?;

    let (configs, templates, stylesheets) = frontend.cache_sizes();
    crate::debug!("check"; "cached: {} configs, {} templates, {} stylesheets",
        configs, templates, stylesheets);

    log!("check"; "ok");
    Ok(())
}
