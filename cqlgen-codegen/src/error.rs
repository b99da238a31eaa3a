use thiserror::Error;

use crate::{format::FormatError, template::TemplateError};

/// Errors raised after the configuration has been parsed.
///
/// Generators return `eyre::Result`; these are the typed causes callers can
/// downcast to.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration parsed but cannot be generated from
    #[error("{0}")]
    Configuration(String),

    #[error("boilerplate template error")]
    Template(#[from] TemplateError),

    /// The formatter rejected a rendered artifact; the text is kept for inspection
    #[error("failed to format '{artifact}': {message}")]
    Formatting {
        artifact: String,
        message: String,
        source_text: String,
        #[source]
        cause: FormatError,
    },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Wrap a formatter failure for `artifact`.
    pub fn formatting(artifact: impl Into<String>, source_text: &str, cause: FormatError) -> Self {
        Self::Formatting {
            artifact: artifact.into(),
            message: cause.to_string(),
            source_text: source_text.to_string(),
            cause,
        }
    }
}
