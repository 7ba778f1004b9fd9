//! Error page, for unknown routes and for failed requests.

use super::{Handler, Page, Reply};
use crate::dispatch::HandlerKind;
use crate::error::Result;
use crate::template::ERROR_TEMPLATE;

pub const NOT_FOUND_MESSAGE: &str = "The page you requested does not exist.";

pub struct ErrorHandler;

pub fn new() -> Box<dyn Handler> {
    Box::new(ErrorHandler)
}

impl Handler for ErrorHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Error
    }

    fn process(&mut self, page: &mut Page<'_>) -> Result<Reply> {
        render(page, 404, NOT_FOUND_MESSAGE)
    }
}

/// Render the error template with `message`.
pub fn render(page: &mut Page<'_>, status: u16, message: &str) -> Result<Reply> {
    page.set("message", message);
    page.render(ERROR_TEMPLATE, status)
}
