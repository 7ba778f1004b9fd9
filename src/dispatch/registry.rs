use rustc_hash::FxHashMap;

use super::HandlerKind;
use crate::error::{FrontendError, Result};
use crate::handler::{self, Handler};

/// Builds a fresh handler for one request.
pub type HandlerConstructor = fn() -> Box<dyn Handler>;

/// Handler kind → constructor.
pub struct HandlerRegistry {
    constructors: FxHashMap<HandlerKind, HandlerConstructor>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: FxHashMap::default(),
        }
    }

    /// A constructor for every kind.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(HandlerKind::Search, handler::search::search);
        registry.register(HandlerKind::MultiPageSearch, handler::search::multi_page);
        registry.register(HandlerKind::About, handler::content::about);
        registry.register(HandlerKind::Help, handler::content::help);
        registry.register(HandlerKind::Article, handler::article::new);
        registry.register(HandlerKind::Corpora, handler::corpora::new);
        registry.register(HandlerKind::Error, handler::error::new);
        registry
    }

    pub fn register(&mut self, kind: HandlerKind, constructor: HandlerConstructor) {
        self.constructors.insert(kind, constructor);
    }

    pub fn instantiate(&self, kind: HandlerKind) -> Result<Box<dyn Handler>> {
        self.constructors
            .get(&kind)
            .map(|construct| construct())
            .ok_or(FrontendError::Instantiation(kind))
    }

    pub fn contains(&self, kind: HandlerKind) -> bool {
        self.constructors.contains_key(&kind)
    }
}
