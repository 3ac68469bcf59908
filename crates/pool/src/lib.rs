#![deny(clippy::pedantic, unsafe_code)]

//! Bounded-concurrency process pool
//!
//! [`Pool`] admits shell commands as child processes while never letting
//! more than `capacity` of them run at once. When every slot is taken,
//! [`Pool::submit`] suspends the caller until a running process exits and
//! its slot is reclaimed; [`Pool::drain`] suspends until nothing is left
//! running. Exit codes are recorded, never raised: a failing command shows
//! up as a nonzero [`ExitRecord`](procpool_types::ExitRecord).

pub mod pool;
pub mod settings;


pub use pool::Pool;
pub use settings::{IntoPoolSettings, PoolSettings};
