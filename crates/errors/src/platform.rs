//! Process execution errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors raised by the process execution facility
///
/// These describe failures of the facility itself. A child that starts and
/// then exits nonzero is not an error at this level.
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("failed to spawn `{command}` via {shell}: {message}")]
    ProcessSpawnFailed {
        command: String,
        shell: String,
        message: String,
    },

    #[error("failed to query status of `{command}`: {message}")]
    ProcessStatusFailed { command: String, message: String },
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ProcessSpawnFailed { .. } => {
                Some("Check that the configured shell exists and is executable.")
            }
            Self::ProcessStatusFailed { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::ProcessStatusFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::ProcessSpawnFailed { .. } => "platform.spawn_failed",
            Self::ProcessStatusFailed { .. } => "platform.status_failed",
        })
    }
}
