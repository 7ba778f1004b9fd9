//! Single document view.

use super::{Handler, Page, Reply};
use crate::dispatch::HandlerKind;
use crate::error::Result;

const TEMPLATE: &str = "article";
const STYLESHEET: &str = "article.xsl";

pub struct ArticleHandler;

pub fn new() -> Box<dyn Handler> {
    Box::new(ArticleHandler)
}

impl Handler for ArticleHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Article
    }

    fn process(&mut self, page: &mut Page<'_>) -> Result<Reply> {
        let frontend = page.frontend();
        let corpus = page.corpus();

        let stylesheet = frontend.stylesheet(corpus, STYLESHEET)?;
        let doc = page.request().param("doc").unwrap_or_default();

        page.set("docPid", doc);
        page.set("sourceImages", frontend.source_images_location(corpus));
        page.set("articleStylesheet", &*stylesheet);
        page.render(TEMPLATE, 200)
    }
}

#[cfg(test)]
mod tests {
    use crate::handler::RequestInfo;
    use crate::handler::test_support::{frontend, webapp};

    #[test]
    fn test_article_with_corpus_stylesheet() {
        let (_dir, webapp) = webapp();
        let reply = frontend(&webapp).handle(&RequestInfo::get("/cf/zeebrieven/article?doc=INT_42"));

        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.body,
            "article:INT_42|https://images.example.org/zeebrieven/|zeebrieven xsl"
        );
    }

    #[test]
    fn test_article_with_shared_stylesheet() {
        let (_dir, webapp) = webapp();
        let reply = frontend(&webapp).handle(&RequestInfo::get("/cf/chn/article"));

        assert_eq!(reply.body, "article:|https://images.example.org/chn/|shared xsl");
    }
}
