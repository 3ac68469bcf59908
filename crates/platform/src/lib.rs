//! Platform abstraction for starting and observing child processes.
//!
//! The pool only needs three things from the operating system: start a
//! command under a shell without waiting for it, ask whether it is still
//! running, and read its exit code once it is not. This crate puts those
//! behind [`ProcessOperations`] and [`ProcessHandle`] so the pool can be
//! driven by real processes or by test doubles.

pub mod core;
pub mod implementations;
pub mod process;

pub use crate::core::Platform;
pub use implementations::native::NativePlatform;

/// Re-export commonly used types
pub use process::{ProcessHandle, ProcessOperations, ProcessStatus, ShellCommand, StdoutTarget};
