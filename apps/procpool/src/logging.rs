//! Structured logging integration for events
//!
//! Every event the CLI receives is mirrored into tracing with structured
//! fields, so `--debug` log files hold the full run history even when the
//! terminal only shows a summary.

use procpool_events::{AppEvent, GeneralEvent, PoolEvent};
use tracing::{debug, error, info, trace, warn, Level};

/// Dispatch to the tracing macro matching a runtime level
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            Level::ERROR => error!($($arg)+),
            Level::WARN => warn!($($arg)+),
            Level::INFO => info!($($arg)+),
            Level::DEBUG => debug!($($arg)+),
            _ => trace!($($arg)+),
        }
    };
}

/// Log an `AppEvent` at its own level with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let level = event.log_level();
    match event {
        AppEvent::General(general) => match general {
            GeneralEvent::Warning { message, context } => {
                log_at!(level, target: "procpool::events::general", context = ?context, "{message}");
            }
            GeneralEvent::Error { message, details } => {
                log_at!(level, target: "procpool::events::general", details = ?details, "{message}");
            }
        },

        AppEvent::Pool(pool) => match pool {
            PoolEvent::ProcessStarted { id, command, pid } => {
                log_at!(
                    level,
                    target: "procpool::events::pool",
                    id = %id,
                    pid = ?pid,
                    command = %command,
                    "Process started"
                );
            }
            PoolEvent::ProcessSucceeded {
                id,
                command,
                duration_ms,
            } => {
                log_at!(
                    level,
                    target: "procpool::events::pool",
                    id = %id,
                    command = %command,
                    duration_ms = duration_ms,
                    "Process succeeded"
                );
            }
            PoolEvent::ProcessFailed {
                id,
                command,
                exit_code,
                duration_ms,
            } => {
                log_at!(
                    level,
                    target: "procpool::events::pool",
                    id = %id,
                    command = %command,
                    exit_code = exit_code,
                    duration_ms = duration_ms,
                    "Process failed"
                );
            }
            PoolEvent::DryRun { command } => {
                log_at!(level, target: "procpool::events::pool", command = %command, "Dry run");
            }
            PoolEvent::WaitingForSlot { active, capacity } => {
                log_at!(
                    level,
                    target: "procpool::events::pool",
                    active = active,
                    capacity = capacity,
                    "Waiting for a free slot"
                );
            }
            PoolEvent::Drained { completed, failed } => {
                log_at!(
                    level,
                    target: "procpool::events::pool",
                    completed = completed,
                    failed = failed,
                    "Pool drained"
                );
            }
            PoolEvent::Configured {
                capacity,
                dry_run,
                poll_interval_ms,
                reclaim,
            } => {
                log_at!(
                    level,
                    target: "procpool::events::pool",
                    capacity = capacity,
                    dry_run = dry_run,
                    poll_interval_ms = poll_interval_ms,
                    reclaim = %reclaim,
                    "Pool configured"
                );
            }
        },
    }
}
