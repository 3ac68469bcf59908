//! Report type definitions for pool runs

use crate::SlotId;
use serde::{Deserialize, Serialize};

/// Outcome of one reclaimed process
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitRecord {
    /// Slot the process occupied
    pub id: SlotId,
    /// Command as submitted
    pub command: String,
    /// Exit code; signal termination is reported as 128 + signal
    pub exit_code: i32,
    /// Wall time between admission and reclamation
    pub duration_ms: u64,
}

impl ExitRecord {
    /// Whether the process exited with code 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Running counters for a pool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Commands admitted as real processes
    pub submitted: u64,
    /// Processes reclaimed, successful or not
    pub completed: u64,
    /// Processes reclaimed with a nonzero exit code
    pub failed: u64,
    /// Commands only announced because of dry-run mode
    pub dry_run: u64,
}

impl PoolStats {
    /// Processes reclaimed with exit code 0
    #[must_use]
    pub fn succeeded(&self) -> u64 {
        self.completed - self.failed
    }
}

/// Final report of a pool run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolReport {
    /// Capacity the pool ran with
    pub capacity: usize,
    /// Whether the run was a dry run
    pub dry_run: bool,
    /// Exit records in completion order
    pub results: Vec<ExitRecord>,
    /// Counters covering the whole run
    pub stats: PoolStats,
    /// Total execution time
    pub duration_ms: u64,
}

impl PoolReport {
    /// True when no reclaimed process exited nonzero
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.stats.failed == 0
    }

    /// Records with a nonzero exit code
    pub fn failures(&self) -> impl Iterator<Item = &ExitRecord> {
        self.results.iter().filter(|record| !record.success())
    }
}
