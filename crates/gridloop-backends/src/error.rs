//! Error types for backend operations.

use crate::dims::Axis;

/// Result type for launch operations.
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Rejected launch-dimension configuration.
///
/// A caller-supplied dimension component of zero is rejected at
/// construction. Only descriptor components *derived* by the dimension
/// calculator may default to 1; explicit input is never silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A requested dimension component was zero.
    #[error("{what} extent along axis {axis} must be at least 1, got 0")]
    ZeroExtent { what: &'static str, axis: Axis },
}

/// Errors surfaced by the execution substrate.
///
/// Faults from asynchronous launches are sticky: they are recorded by the
/// backend and reported from the next synchronization point (or the next
/// launch), never from the faulting launch call itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    /// The requested launch shape exceeds an absolute substrate ceiling.
    #[error("launch dimensions rejected by substrate: {0}")]
    InvalidDims(String),

    /// The substrate reported an execution fault. For asynchronous
    /// launches this surfaces at the following synchronization call.
    #[error("device fault during launch: {0}")]
    DeviceFault(String),

    /// The backend does not support the requested operation.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl LaunchError {
    /// Create an invalid-dimensions error.
    pub fn invalid_dims(msg: impl Into<String>) -> Self {
        Self::InvalidDims(msg.into())
    }

    /// Create a device-fault error.
    pub fn device_fault(msg: impl Into<String>) -> Self {
        Self::DeviceFault(msg.into())
    }
}
