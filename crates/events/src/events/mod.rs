use serde::{Deserialize, Serialize};

pub mod general;
pub mod pool;

pub use general::*;
pub use pool::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Warnings and errors
    General(GeneralEvent),

    /// Process pool events (admission, reclamation, dry run)
    Pool(PoolEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Error { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Pool(PoolEvent::ProcessFailed { .. }) => Level::WARN,

            Self::Pool(PoolEvent::WaitingForSlot { .. } | PoolEvent::Configured { .. }) => {
                Level::DEBUG
            }

            _ => Level::INFO,
        }
    }
}
