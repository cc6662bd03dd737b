//! Errors raised while splitting, decoding or encoding front matter.

use super::types::FormatMark;
use thiserror::Error;

/// Errors that can occur while reading or writing front matter.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    /// The document does not start with a recognized delimiter.
    /// Callers treat this as a document without metadata.
    #[error("document has no front matter")]
    NoFrontMatter,

    /// An opening delimiter was found but the block never ends.
    #[error("{format} front matter is not terminated")]
    UnterminatedFrontMatter { format: FormatMark },

    /// The payload between the delimiters is not valid for its format.
    #[error("invalid {format} front matter: {source}")]
    Decode {
        format: FormatMark,
        #[source]
        source: DecodeCause,
    },

    /// A value cannot be written in the target format.
    #[error("cannot encode '{path}' as {format}: {reason}")]
    UnrepresentableValue { format: FormatMark, path: String, reason: String },
}

impl FrontMatterError {
    /// Whether the caller may continue with an empty metadata mapping.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoFrontMatter)
    }

    pub(crate) fn decode(format: FormatMark, source: impl Into<DecodeCause>) -> Self {
        Self::Decode { format, source: source.into() }
    }

    pub(crate) fn unrepresentable(
        format: FormatMark,
        path: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnrepresentableValue { format, path: path.to_string(), reason: reason.into() }
    }
}

/// Underlying structural failure behind a [`FrontMatterError::Decode`].
#[derive(Debug, Error)]
pub enum DecodeCause {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Syntactically valid payload with an unusable shape.
    #[error("{0}")]
    Shape(String),
}
