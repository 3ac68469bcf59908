//! Command source errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("empty command template")]
    EmptyTemplate,

    #[error("unknown placeholder `{{{name}}}` in template")]
    UnknownPlaceholder { name: String },

    #[error("failed to read commands from {origin}: {message}")]
    ReadFailed { origin: String, message: String },

    #[error("failed to walk {root}: {message}")]
    WalkFailed { root: String, message: String },
}

impl UserFacingError for SourceError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPattern { .. } => Some("Patterns use glob syntax, e.g. `data/**/*.csv`."),
            Self::UnknownPlaceholder { .. } | Self::EmptyTemplate => {
                Some("Templates accept {}, {name}, {stem} and {dir} placeholders.")
            }
            Self::ReadFailed { .. } | Self::WalkFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidPattern { .. } => "source.invalid_pattern",
            Self::EmptyTemplate => "source.empty_template",
            Self::UnknownPlaceholder { .. } => "source.unknown_placeholder",
            Self::ReadFailed { .. } => "source.read_failed",
            Self::WalkFailed { .. } => "source.walk_failed",
        })
    }
}
