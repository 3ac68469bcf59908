//! Built-in defaults shared by the config loader and the CLI

/// Concurrent processes when nothing else is configured
pub const DEFAULT_CAPACITY: usize = 5;

/// Pause between two polling rounds while waiting for a slot
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

pub const DEFAULT_SHELL: &str = "/bin/sh";
pub const DEFAULT_SHELL_FLAG: &str = "-c";

/// Directory name under the platform config/state dirs
pub const APP_DIR: &str = "procpool";
