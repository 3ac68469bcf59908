//! Process execution operations

use async_trait::async_trait;
use procpool_errors::PlatformError;

/// Where a child's standard output goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdoutTarget {
    /// Share the parent's stdout
    #[default]
    Inherit,
    /// Write to the parent's stderr, keeping the parent's stdout to itself
    Stderr,
}

/// A command line handed to a shell, plus how to launch that shell
#[derive(Debug, Clone)]
pub struct ShellCommand {
    command: String,
    shell: String,
    shell_flag: String,
    stdout: StdoutTarget,
}

impl ShellCommand {
    /// Create a command run by `/bin/sh -c`
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            shell: "/bin/sh".to_string(),
            shell_flag: "-c".to_string(),
            stdout: StdoutTarget::Inherit,
        }
    }

    /// Use a different shell and command flag
    pub fn shell(&mut self, program: impl Into<String>, flag: impl Into<String>) -> &mut Self {
        self.shell = program.into();
        self.shell_flag = flag.into();
        self
    }

    /// Redirect the child's standard output
    pub fn stdout(&mut self, target: StdoutTarget) -> &mut Self {
        self.stdout = target;
        self
    }

    /// Get the command line
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Get the shell program
    pub fn get_shell(&self) -> &str {
        &self.shell
    }

    /// Get the flag that makes the shell read the command from its argument
    pub fn get_shell_flag(&self) -> &str {
        &self.shell_flag
    }

    /// Get where the child's stdout goes
    pub fn get_stdout(&self) -> StdoutTarget {
        self.stdout
    }
}

/// Result of a non-blocking status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    /// Exited with this code (signal termination is 128 + signal)
    Exited(i32),
}

/// One started child process
pub trait ProcessHandle: Send {
    /// The command line the process was started with
    fn command(&self) -> &str;

    /// OS process id, if the platform exposes one
    fn pid(&self) -> Option<u32>;

    /// Poll the process without blocking
    ///
    /// Once `Exited` has been returned, later calls return the same code.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS status query itself fails.
    fn try_status(&mut self) -> Result<ProcessStatus, PlatformError>;
}

/// Trait for process execution operations
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Start a command asynchronously and return a handle to it
    ///
    /// The child inherits stdin and stderr, and stdout unless redirected
    /// to stderr; its output is never captured.
    async fn spawn(&self, cmd: &ShellCommand) -> Result<Box<dyn ProcessHandle>, PlatformError>;
}
