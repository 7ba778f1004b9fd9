//! Single- and multi-page search interfaces.

use super::{Handler, Page, Reply};
use crate::dispatch::HandlerKind;
use crate::error::Result;

/// Template variable → field role looked up in the corpus config.
const FIELD_VARS: [(&str, &str); 4] = [
    ("titleField", "title"),
    ("authorField", "author"),
    ("dateField", "date"),
    ("pidField", "pid"),
];

pub struct SearchHandler {
    kind: HandlerKind,
    template: &'static str,
}

pub fn search() -> Box<dyn Handler> {
    Box::new(SearchHandler {
        kind: HandlerKind::Search,
        template: "search",
    })
}

pub fn multi_page() -> Box<dyn Handler> {
    Box::new(SearchHandler {
        kind: HandlerKind::MultiPageSearch,
        template: "mpsearch",
    })
}

impl Handler for SearchHandler {
    fn kind(&self) -> HandlerKind {
        self.kind
    }

    fn process(&mut self, page: &mut Page<'_>) -> Result<Reply> {
        let frontend = page.frontend();
        for (var, role) in FIELD_VARS {
            let field = frontend.special_field(page.corpus(), role)?;
            page.set(var, field);
        }
        page.render(self.template, 200)
    }
}
