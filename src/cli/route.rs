//! `route` command: show how a path is routed without serving it.

use anyhow::Result;
use serde::Serialize;

use crate::dispatch::{HandlerKind, RouteTable};
use crate::config::FrontendConfig;
use crate::handler::RequestInfo;
use crate::router::Router;

#[derive(Debug, Serialize)]
struct RouteReport<'a> {
    path: &'a str,
    corpus: String,
    route: String,
    handler: HandlerKind,
    query: &'a [(String, String)],
}

/// Route `target` with the configured context path and default corpus.
///
/// Needs neither admin properties nor templates, so it works on a
/// half-configured deployment.
pub fn run_route(config: &FrontendConfig, target: &str, json: bool) -> Result<()> {
    let router = Router::new(config.context_path(), config.default_corpus())?;
    let routes = RouteTable::new(config.context_path());

    let request = RequestInfo::get(target);
    let routed = router.route(&request.path);
    let report = RouteReport {
        path: &request.path,
        handler: routes.lookup(&routed.route),
        corpus: routed.corpus,
        route: routed.route,
        query: &request.query,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("path:    {}", report.path);
        println!("corpus:  {}", report.corpus);
        println!("route:   {}", report.route);
        println!("handler: {:?}", report.handler);
        for (key, value) in report.query {
            println!("param:   {key} = {value}");
        }
    }
    Ok(())
}
