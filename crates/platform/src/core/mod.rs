//! Core platform abstraction

use std::sync::Arc;

use crate::process::ProcessOperations;

/// Access point for platform operations
///
/// Cheap to clone; the operations object is shared.
#[derive(Clone)]
pub struct Platform {
    process_ops: Arc<dyn ProcessOperations>,
}

impl Platform {
    /// Create a new platform instance with the specified implementation
    pub fn new(process_ops: Arc<dyn ProcessOperations>) -> Self {
        Self { process_ops }
    }

    /// Get the platform for the running host
    pub fn current() -> Self {
        crate::implementations::native::NativePlatform::new()
    }

    /// Access process operations
    pub fn process(&self) -> &dyn ProcessOperations {
        &*self.process_ops
    }
}
