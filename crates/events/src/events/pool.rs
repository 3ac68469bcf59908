//! Admission and reclamation events

use procpool_types::{ReclaimStrategy, SlotId};
use serde::{Deserialize, Serialize};

/// Events emitted by the process pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PoolEvent {
    /// A command was admitted and its process started
    ProcessStarted {
        id: SlotId,
        command: String,
        /// OS process id, when the platform reports one
        pid: Option<u32>,
    },

    /// A process was reclaimed with exit code 0
    ProcessSucceeded {
        id: SlotId,
        command: String,
        duration_ms: u64,
    },

    /// A process was reclaimed with a nonzero exit code
    ProcessFailed {
        id: SlotId,
        command: String,
        exit_code: i32,
        duration_ms: u64,
    },

    /// Dry-run mode: the command would have been started
    DryRun { command: String },

    /// All slots are busy; the submitter is waiting for one to free up
    WaitingForSlot { active: usize, capacity: usize },

    /// `drain` finished with nothing left active
    Drained { completed: u64, failed: u64 },

    /// Pool constructed
    Configured {
        capacity: usize,
        dry_run: bool,
        poll_interval_ms: u64,
        reclaim: ReclaimStrategy,
    },
}
