//! Error types for the mapping engine.

use gridloop_backends::{ConfigError, LaunchError};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the mapping engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A caller-supplied launch dimension was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The execution substrate refused or faulted on a launch.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}
