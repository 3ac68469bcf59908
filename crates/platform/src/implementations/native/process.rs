//! Host process operations
//!
//! Children are started through `tokio::process` so that status polling
//! never blocks the controlling task.

use async_trait::async_trait;
use procpool_errors::PlatformError;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};

use crate::process::{
    ProcessHandle, ProcessOperations, ProcessStatus, ShellCommand, StdoutTarget,
};

/// Host implementation of process operations
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

/// A running child started by [`NativeProcessOperations`]
pub struct NativeProcess {
    command: String,
    pid: Option<u32>,
    child: Child,
    exit_code: Option<i32>,
}

/// Collapse an exit status into a single code
///
/// Signal termination follows the shell convention of 128 + signal number.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    signal_code(status).unwrap_or(-1)
}

#[cfg(unix)]
fn signal_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_code(_status: ExitStatus) -> Option<i32> {
    None
}

impl ProcessHandle for NativeProcess {
    fn command(&self) -> &str {
        &self.command
    }

    fn pid(&self) -> Option<u32> {
        self.pid
    }

    fn try_status(&mut self) -> Result<ProcessStatus, PlatformError> {
        if let Some(code) = self.exit_code {
            return Ok(ProcessStatus::Exited(code));
        }

        let status = self
            .child
            .try_wait()
            .map_err(|e| PlatformError::ProcessStatusFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        Ok(match status {
            Some(status) => {
                let code = exit_code(status);
                self.exit_code = Some(code);
                ProcessStatus::Exited(code)
            }
            None => ProcessStatus::Running,
        })
    }
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn spawn(&self, cmd: &ShellCommand) -> Result<Box<dyn ProcessHandle>, PlatformError> {
        let mut command = Command::new(cmd.get_shell());
        command.arg(cmd.get_shell_flag()).arg(cmd.command());

        if cmd.get_stdout() == StdoutTarget::Stderr {
            command.stdout(Stdio::from(std::io::stderr()));
        }

        let child = command
            .spawn()
            .map_err(|e| PlatformError::ProcessSpawnFailed {
                command: cmd.command().to_string(),
                shell: cmd.get_shell().to_string(),
                message: e.to_string(),
            })?;

        let pid = child.id();
        tracing::debug!(pid = ?pid, command = %cmd.command(), "spawned child");

        Ok(Box::new(NativeProcess {
            command: cmd.command().to_string(),
            pid,
            child,
            exit_code: None,
        }))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::time::Duration;

    async fn wait_for_exit(handle: &mut Box<dyn ProcessHandle>) -> i32 {
        loop {
            if let ProcessStatus::Exited(code) = handle.try_status().unwrap() {
                return code;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[test]
    fn test_exit_code_mapping() {
        // Raw wait statuses: exit code lives in the high byte, signal in the low bits
        assert_eq!(exit_code(ExitStatus::from_raw(0)), 0);
        assert_eq!(exit_code(ExitStatus::from_raw(3 << 8)), 3);
        assert_eq!(exit_code(ExitStatus::from_raw(9)), 137);
    }

    #[tokio::test]
    async fn test_spawn_reports_exit_code() {
        let ops = NativeProcessOperations::new();
        let mut handle = ops.spawn(&ShellCommand::new("exit 7")).await.unwrap();

        assert_eq!(handle.command(), "exit 7");
        assert!(handle.pid().is_some());
        assert_eq!(wait_for_exit(&mut handle).await, 7);
        // Status is sticky once observed
        assert_eq!(handle.try_status().unwrap(), ProcessStatus::Exited(7));
    }

    #[tokio::test]
    async fn test_running_then_exited() {
        let ops = NativeProcessOperations::new();
        let mut handle = ops.spawn(&ShellCommand::new("sleep 0.3")).await.unwrap();

        assert_eq!(handle.try_status().unwrap(), ProcessStatus::Running);
        assert_eq!(wait_for_exit(&mut handle).await, 0);
    }

    #[tokio::test]
    async fn test_stdout_redirected_to_stderr() {
        let mut cmd = ShellCommand::new("echo redirected");
        cmd.stdout(StdoutTarget::Stderr);
        assert_eq!(cmd.get_stdout(), StdoutTarget::Stderr);

        let ops = NativeProcessOperations::new();
        let mut handle = ops.spawn(&cmd).await.unwrap();
        assert_eq!(wait_for_exit(&mut handle).await, 0);
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_error() {
        let mut cmd = ShellCommand::new("true");
        cmd.shell("/nonexistent/shell", "-c");

        let ops = NativeProcessOperations::new();
        let err = ops.spawn(&cmd).await.err().unwrap();
        assert!(matches!(err, PlatformError::ProcessSpawnFailed { .. }));
    }
}
