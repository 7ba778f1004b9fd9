//! Corpus listing served at the bare context path.

use super::{Handler, Page, Reply};
use crate::dispatch::HandlerKind;
use crate::error::Result;

pub struct CorporaHandler;

pub fn new() -> Box<dyn Handler> {
    Box::new(CorporaHandler)
}

impl Handler for CorporaHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Corpora
    }

    fn process(&mut self, page: &mut Page<'_>) -> Result<Reply> {
        // the listing itself is fetched client-side from the webservice root
        page.set("externalWebserviceUrl", page.frontend().external_webservice_url(""));
        page.render("corpora", 200)
    }
}
