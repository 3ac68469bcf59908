//! Pool construction parameters

use procpool_config::constants::{
    DEFAULT_CAPACITY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SHELL, DEFAULT_SHELL_FLAG,
};
use procpool_config::Config;
use procpool_platform::StdoutTarget;
use procpool_types::ReclaimStrategy;
use std::time::Duration;

/// Parameters fixed for the lifetime of a [`Pool`](crate::Pool)
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Maximum number of concurrently running processes
    pub capacity: usize,
    /// Announce commands instead of running them
    pub dry_run: bool,
    /// Pause between polling rounds while waiting for a slot
    pub poll_interval: Duration,
    /// How many exited processes a polling round frees
    pub reclaim: ReclaimStrategy,
    /// Shell program commands are handed to
    pub shell: String,
    /// Flag that makes the shell take the command from its argument
    pub shell_flag: String,
    /// Where children write their standard output
    pub stdout: StdoutTarget,
}

impl PoolSettings {
    /// Settings with the given capacity and defaults for everything else
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn reclaim(mut self, strategy: ReclaimStrategy) -> Self {
        self.reclaim = strategy;
        self
    }

    #[must_use]
    pub fn stdout(mut self, target: StdoutTarget) -> Self {
        self.stdout = target;
        self
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            dry_run: false,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            reclaim: ReclaimStrategy::FirstExited,
            shell: DEFAULT_SHELL.to_string(),
            shell_flag: DEFAULT_SHELL_FLAG.to_string(),
            stdout: StdoutTarget::Inherit,
        }
    }
}

/// Trait for converting configuration types into pool settings
pub trait IntoPoolSettings {
    /// Convert this configuration into `PoolSettings`
    fn into_pool_settings(self) -> PoolSettings;
}

impl IntoPoolSettings for &Config {
    fn into_pool_settings(self) -> PoolSettings {
        PoolSettings {
            capacity: self.pool.capacity,
            dry_run: self.pool.dry_run,
            poll_interval: self.pool.poll_interval(),
            reclaim: self.pool.reclaim,
            shell: self.shell.program.clone(),
            shell_flag: self.shell.flag.clone(),
            stdout: StdoutTarget::Inherit,
        }
    }
}
