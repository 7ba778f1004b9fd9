//! Help and about pages: corpus-specific HTML fragments in a shared shell.

use super::{Handler, Page, Reply};
use crate::dispatch::HandlerKind;
use crate::error::Result;

const TEMPLATE: &str = "contentpage";

pub struct ContentHandler {
    kind: HandlerKind,
}

pub fn about() -> Box<dyn Handler> {
    Box::new(ContentHandler {
        kind: HandlerKind::About,
    })
}

pub fn help() -> Box<dyn Handler> {
    Box::new(ContentHandler {
        kind: HandlerKind::Help,
    })
}

impl Handler for ContentHandler {
    fn kind(&self) -> HandlerKind {
        self.kind
    }

    fn process(&mut self, page: &mut Page<'_>) -> Result<Reply> {
        let frontend = page.frontend();
        let resource = match self.kind {
            HandlerKind::About => frontend.about_page(page.corpus())?,
            _ => frontend.help_page(page.corpus())?,
        };
        page.set("content", resource.read_to_string()?);
        page.render(TEMPLATE, 200)
    }
}
