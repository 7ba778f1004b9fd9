//! Request and startup error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::dispatch::HandlerKind;

/// Errors raised while resolving corpus resources or dispatching a request.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// Fatal at startup: the deployment cannot serve any traffic.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required project file exists neither for the corpus nor generically.
    #[error("couldn't find file '{file}' for corpus '{corpus}'")]
    NotFound { corpus: String, file: String },

    /// The route table points at a handler kind without a constructor.
    #[error("no handler registered for {0:?}")]
    Instantiation(HandlerKind),

    /// Never surfaced to callers; the template cache substitutes the error template.
    #[error("template '{0}' does not exist")]
    TemplateMissing(String),

    #[error("IO error when reading `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid corpus config `{}`: {message}", path.display())]
    CorpusConfig { path: PathBuf, message: String },
}

impl FrontendError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status used when this error is rendered as an error page.
    pub const fn status(&self) -> u16 {
        match self {
            Self::NotFound { .. } | Self::TemplateMissing(_) => 404,
            _ => 500,
        }
    }

    /// Failures that point at a broken deployment rather than a bad URL.
    pub const fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Self::Instantiation(_) | Self::Configuration(_) | Self::Io { .. }
        )
    }
}

pub type Result<T, E = FrontendError> = std::result::Result<T, E>;
