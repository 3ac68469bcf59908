//! Admission and reclamation

use std::collections::BTreeMap;

use procpool_errors::{Error, PoolError};
use procpool_events::{AppEvent, EventEmitter, EventSender, PoolEvent};
use procpool_platform::{Platform, ProcessHandle, ProcessStatus, ShellCommand};
use procpool_types::{ExitRecord, PoolReport, PoolStats, ReclaimStrategy, SlotId};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::settings::PoolSettings;

/// A process occupying a slot
struct ActiveProcess {
    handle: Box<dyn ProcessHandle>,
    started: Instant,
}

/// Bounded worker-slot admission controller
///
/// All state is mutated through `&mut self`, so a single controlling task
/// drives the pool and no locking is involved. Concurrency comes entirely
/// from the child processes.
///
/// Dropping a pool with processes still active does not kill them; call
/// [`Pool::drain`] to collect every result.
pub struct Pool {
    settings: PoolSettings,
    platform: Platform,
    /// Keyed by admission order, so iteration is insertion order and
    /// removal never disturbs the remaining entries
    active: BTreeMap<SlotId, ActiveProcess>,
    /// Completion order
    results: Vec<ExitRecord>,
    stats: PoolStats,
    next_id: u64,
    event_sender: Option<EventSender>,
    created: Instant,
}

impl EventEmitter for Pool {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Pool {
    /// Create a pool running commands on the given platform
    ///
    /// # Errors
    ///
    /// Returns `PoolError::ZeroCapacity` if `settings.capacity` is zero and
    /// `PoolError::ZeroPollInterval` if `settings.poll_interval` is zero.
    pub fn new(settings: PoolSettings, platform: Platform) -> Result<Self, Error> {
        if settings.capacity == 0 {
            return Err(PoolError::ZeroCapacity.into());
        }
        if settings.poll_interval.is_zero() {
            return Err(PoolError::ZeroPollInterval.into());
        }

        Ok(Self {
            settings,
            platform,
            active: BTreeMap::new(),
            results: Vec::new(),
            stats: PoolStats::default(),
            next_id: 0,
            event_sender: None,
            created: Instant::now(),
        })
    }

    /// Attach an event sender; progress notices are emitted through it
    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self.emit(AppEvent::Pool(PoolEvent::Configured {
            capacity: self.settings.capacity,
            dry_run: self.settings.dry_run,
            poll_interval_ms: duration_to_millis(self.settings.poll_interval),
            reclaim: self.settings.reclaim,
        }));
        self
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.settings.capacity
    }

    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.settings.dry_run
    }

    /// Number of occupied slots
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Commands of the occupied slots, in admission order
    pub fn active_commands(&self) -> impl Iterator<Item = &str> {
        self.active.values().map(|process| process.handle.command())
    }

    /// Exit records collected so far, in completion order
    #[must_use]
    pub fn results(&self) -> &[ExitRecord] {
        &self.results
    }

    /// Move the collected exit records out of the pool
    ///
    /// Long-running callers use this to keep the record buffer bounded;
    /// [`Pool::stats`] keeps counting across calls.
    pub fn take_results(&mut self) -> Vec<ExitRecord> {
        std::mem::take(&mut self.results)
    }

    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Snapshot of the run so far
    #[must_use]
    pub fn report(&self) -> PoolReport {
        PoolReport {
            capacity: self.settings.capacity,
            dry_run: self.settings.dry_run,
            results: self.results.clone(),
            stats: self.stats,
            duration_ms: duration_to_millis(self.created.elapsed()),
        }
    }

    /// Admit a command, waiting for a free slot if the pool is full
    ///
    /// The command is handed to the shell verbatim; a malformed command is
    /// not an error here and surfaces later as a nonzero exit record. In
    /// dry-run mode the command is only announced and this never waits.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::EmptyCommand` for a blank command, or a platform
    /// error if the shell cannot be started or a status poll fails.
    pub async fn submit(&mut self, command: &str) -> Result<(), Error> {
        let command = command.trim();
        if command.is_empty() {
            return Err(PoolError::EmptyCommand.into());
        }

        if self.settings.dry_run {
            debug!(command = %command, "dry run");
            self.stats.dry_run += 1;
            self.emit_dry_run(command);
            return Ok(());
        }

        if self.active.len() >= self.settings.capacity {
            debug!(
                active = self.active.len(),
                capacity = self.settings.capacity,
                "all slots busy, waiting"
            );
            self.emit(AppEvent::Pool(PoolEvent::WaitingForSlot {
                active: self.active.len(),
                capacity: self.settings.capacity,
            }));
            while self.active.len() >= self.settings.capacity {
                self.reclaim().await?;
            }
        }
        debug_assert!(self.active.len() < self.settings.capacity);

        let mut shell_command = ShellCommand::new(command);
        shell_command
            .shell(&self.settings.shell, &self.settings.shell_flag)
            .stdout(self.settings.stdout);
        let handle = match self.platform.process().spawn(&shell_command).await {
            Ok(handle) => handle,
            Err(e) => {
                self.emit_error(format!("failed to start `{command}`"), e.to_string());
                return Err(e.into());
            }
        };

        let id = SlotId(self.next_id);
        self.next_id += 1;
        debug!(%id, pid = ?handle.pid(), command = %command, "admitted");
        self.emit_process_started(id, command, handle.pid());

        self.active.insert(
            id,
            ActiveProcess {
                handle,
                started: Instant::now(),
            },
        );
        self.stats.submitted += 1;
        debug_assert!(self.active.len() <= self.settings.capacity);

        Ok(())
    }

    /// Wait until every admitted process has been reclaimed
    ///
    /// Returns immediately when nothing is active.
    ///
    /// # Errors
    ///
    /// Returns a platform error if a status poll fails.
    pub async fn drain(&mut self) -> Result<(), Error> {
        while !self.active.is_empty() {
            self.reclaim().await?;
        }

        self.emit(AppEvent::Pool(PoolEvent::Drained {
            completed: self.stats.completed,
            failed: self.stats.failed,
        }));
        Ok(())
    }

    /// Wait for at least one active process to exit and free its slot
    ///
    /// Returns the number of slots freed, zero only if nothing was active.
    pub(crate) async fn reclaim(&mut self) -> Result<usize, Error> {
        if self.active.is_empty() {
            return Ok(0);
        }

        loop {
            let exited = self.poll_round()?;
            if !exited.is_empty() {
                let freed = exited.len();
                for (id, exit_code) in exited {
                    self.record_exit(id, exit_code);
                }
                return Ok(freed);
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// Poll active processes in admission order
    ///
    /// A failed status query leaves every process in its slot.
    fn poll_round(&mut self) -> Result<Vec<(SlotId, i32)>, Error> {
        let strategy = self.settings.reclaim;
        let mut exited = Vec::new();
        let mut failure = None;

        for (id, process) in &mut self.active {
            match process.handle.try_status() {
                Ok(ProcessStatus::Exited(code)) => {
                    exited.push((*id, code));
                    if strategy == ReclaimStrategy::FirstExited {
                        break;
                    }
                }
                Ok(ProcessStatus::Running) => {}
                Err(e) => {
                    failure = Some((*id, e));
                    break;
                }
            }
        }

        if let Some((id, e)) = failure {
            warn!(%id, error = %e, "status poll failed");
            self.emit_error(format!("could not poll process {id}"), e.to_string());
            return Err(e.into());
        }
        Ok(exited)
    }

    fn record_exit(&mut self, id: SlotId, exit_code: i32) {
        let Some(process) = self.active.remove(&id) else {
            return;
        };

        let duration_ms = duration_to_millis(process.started.elapsed());
        let command = process.handle.command().to_string();

        self.stats.completed += 1;
        if exit_code == 0 {
            debug!(%id, command = %command, duration_ms, "process completed");
        } else {
            self.stats.failed += 1;
            warn!(%id, command = %command, exit_code, duration_ms, "process failed");
        }

        self.emit_process_finished(id, command.clone(), exit_code, duration_ms);
        self.results.push(ExitRecord {
            id,
            command,
            exit_code,
            duration_ms,
        });
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        if !self.active.is_empty() {
            warn!(
                active = self.active.len(),
                "pool dropped before drain, processes left running unrecorded"
            );
            self.emit_warning(
                "pool dropped before drain",
                format!("{} process(es) left running unrecorded", self.active.len()),
            );
        }
    }
}

fn duration_to_millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
