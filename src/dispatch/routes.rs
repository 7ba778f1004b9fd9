use indexmap::IndexMap;

use super::HandlerKind;

/// Key of the fallback entry.
pub const ERROR_ROUTE: &str = "error";

/// Canonical route → handler kind, in registration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: IndexMap<String, HandlerKind>,
}

impl RouteTable {
    /// The standard routes under `context_path`.
    pub fn new(context_path: &str) -> Self {
        let page = |op: &str| format!("{context_path}/page/{op}");

        let routes = IndexMap::from([
            (page("search"), HandlerKind::Search),
            (page("mpsearch"), HandlerKind::MultiPageSearch),
            (page("about"), HandlerKind::About),
            (page("help"), HandlerKind::Help),
            (page("article"), HandlerKind::Article),
            (format!("{context_path}/help"), HandlerKind::Help),
            (context_path.to_string(), HandlerKind::Corpora),
            (ERROR_ROUTE.to_string(), HandlerKind::Error),
        ]);

        Self { routes }
    }

    /// Handler for `route`, falling back to the `error` entry.
    pub fn lookup(&self, route: &str) -> HandlerKind {
        self.routes
            .get(route)
            .or_else(|| self.routes.get(ERROR_ROUTE))
            .copied()
            .unwrap_or(HandlerKind::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, HandlerKind)> {
        self.routes.iter().map(|(route, kind)| (route.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_routes() {
        let table = RouteTable::new("/cf");

        assert_eq!(table.lookup("/cf/page/search"), HandlerKind::Search);
        assert_eq!(table.lookup("/cf/page/mpsearch"), HandlerKind::MultiPageSearch);
        assert_eq!(table.lookup("/cf/page/help"), HandlerKind::Help);
        assert_eq!(table.lookup("/cf/help"), HandlerKind::Help);
        assert_eq!(table.lookup("/cf"), HandlerKind::Corpora);
    }

    #[test]
    fn test_unknown_route_is_error() {
        let table = RouteTable::new("/cf");
        assert_eq!(table.lookup("/cf/page/nope"), HandlerKind::Error);
        assert_eq!(table.lookup("/cf/zeebrieven"), HandlerKind::Error);
    }

    #[test]
    fn test_insertion_order() {
        let table = RouteTable::new("");
        let routes: Vec<_> = table.iter().map(|(route, _)| route).collect();
        assert_eq!(
            routes,
            [
                "/page/search",
                "/page/mpsearch",
                "/page/about",
                "/page/help",
                "/page/article",
                "/help",
                "",
                "error"
            ]
        );
        // root deployment: bare context is the empty route
        assert_eq!(table.lookup(""), HandlerKind::Corpora);
    }
}
