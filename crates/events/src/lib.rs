#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in procpool
//!
//! Library crates never print. Everything the user should see (process
//! starts, completions, failures, dry-run intents) is emitted as an
//! [`AppEvent`] over an unbounded channel and rendered by the CLI.

pub mod events;
pub use events::{AppEvent, GeneralEvent, PoolEvent};

use procpool_types::SlotId;
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender using the `AppEvent` system
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver using the `AppEvent` system
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel with the `AppEvent` system
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout procpool
///
/// This trait provides a single, consistent API for emitting events regardless of
/// whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an error event
    fn emit_error(&self, message: impl Into<String>, details: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error_with_details(
            message, details,
        )));
    }

    /// Emit a process started event
    fn emit_process_started(&self, id: SlotId, command: impl Into<String>, pid: Option<u32>) {
        self.emit(AppEvent::Pool(PoolEvent::ProcessStarted {
            id,
            command: command.into(),
            pid,
        }));
    }

    /// Emit a completion event; the exit code picks success or failure
    fn emit_process_finished(
        &self,
        id: SlotId,
        command: impl Into<String>,
        exit_code: i32,
        duration_ms: u64,
    ) {
        let command = command.into();
        let event = if exit_code == 0 {
            PoolEvent::ProcessSucceeded {
                id,
                command,
                duration_ms,
            }
        } else {
            PoolEvent::ProcessFailed {
                id,
                command,
                exit_code,
                duration_ms,
            }
        };
        self.emit(AppEvent::Pool(event));
    }

    /// Emit a dry-run intent notice
    fn emit_dry_run(&self, command: impl Into<String>) {
        self.emit(AppEvent::Pool(PoolEvent::DryRun {
            command: command.into(),
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
