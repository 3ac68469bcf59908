//! Host platform implementation backed by tokio's process support

pub mod process;

use std::sync::Arc;

/// Host platform implementation
pub struct NativePlatform;

impl NativePlatform {
    /// Create a new host platform instance
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> crate::core::Platform {
        use process::NativeProcessOperations;

        crate::core::Platform::new(Arc::new(NativeProcessOperations::new()))
    }
}
