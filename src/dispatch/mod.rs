//! Route table, handler registry and the dispatcher tying them together.
//!
//! Both tables are built once before the server starts and only read
//! afterwards.

mod registry;
mod routes;

pub use registry::HandlerRegistry;
pub use routes::RouteTable;

use serde::Serialize;

use crate::error::Result;
use crate::frontend::Frontend;
use crate::handler::{Page, Reply, RequestInfo};
use crate::router::Routed;

/// Every kind of page the frontend can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HandlerKind {
    Search,
    MultiPageSearch,
    About,
    Help,
    Article,
    Corpora,
    Error,
}

impl HandlerKind {
    #[cfg(test)]
    pub const ALL: [Self; 7] = [
        Self::Search,
        Self::MultiPageSearch,
        Self::About,
        Self::Help,
        Self::Article,
        Self::Corpora,
        Self::Error,
    ];
}

/// Route lookup plus handler construction.
pub struct Dispatcher {
    routes: RouteTable,
    registry: HandlerRegistry,
}

impl Dispatcher {
    pub fn new(routes: RouteTable, registry: HandlerRegistry) -> Self {
        Self { routes, registry }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Routed handler kinds the registry has no constructor for.
    pub fn unregistered(&self) -> Vec<HandlerKind> {
        let mut missing = Vec::new();
        for (_, kind) in self.routes.iter() {
            if !self.registry.contains(kind) && !missing.contains(&kind) {
                missing.push(kind);
            }
        }
        missing
    }

    /// Handler kind for a canonical route, `Error` for unknown routes.
    pub fn kind_for(&self, route: &str) -> HandlerKind {
        self.routes.lookup(route)
    }

    /// Construct, initialize and run the handler for `routed`.
    pub fn dispatch(
        &self,
        routed: &Routed,
        request: &RequestInfo,
        frontend: &Frontend,
    ) -> Result<Reply> {
        let kind = self.kind_for(&routed.route);
        let mut handler = self.registry.instantiate(kind)?;
        let mut page = Page::init(&routed.corpus, request, frontend)?;
        handler.process(&mut page)
    }
}
