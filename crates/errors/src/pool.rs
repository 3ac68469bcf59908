//! Admission errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PoolError {
    #[error("pool capacity must be at least 1")]
    ZeroCapacity,

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("refusing to submit an empty command")]
    EmptyCommand,
}

impl UserFacingError for PoolError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ZeroCapacity => Some("Pass --capacity with a value of 1 or more."),
            Self::ZeroPollInterval => Some("Pass --poll-interval-ms with a value of 1 or more."),
            Self::EmptyCommand => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::ZeroCapacity => "pool.zero_capacity",
            Self::ZeroPollInterval => "pool.zero_poll_interval",
            Self::EmptyCommand => "pool.empty_command",
        })
    }
}
