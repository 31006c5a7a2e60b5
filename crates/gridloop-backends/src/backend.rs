//! Backend trait for grid launches.
//!
//! Backends implement this trait to run a loop-nest body across a grid of
//! groups and lanes on some execution substrate.

use crate::context::LaunchContext;
use crate::dims::LaunchDims;
use crate::error::Result;
use crate::limits::ResourceLimits;

/// Synchronization behavior of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Block until every (group, lane) body has returned; all memory
    /// effects are visible to the caller on return.
    Sync,
    /// Return after enqueuing the work. The caller must reach a later
    /// synchronization point before observing results; any fault surfaces
    /// there, not here.
    Async,
}

/// A launch body: invoked once per (group, lane) pair with that lane's
/// context. Bodies run concurrently and must synchronize any shared
/// mutation themselves; the engine offers no built-in critical sections.
pub type LaunchBody<'a> = &'a (dyn Fn(&LaunchContext) + Sync);

/// Backend trait for grid execution.
///
/// The iteration over groups and lanes is the backend's concern; index
/// mapping happens inside the body via the mapping strategies in
/// `gridloop-core`, driven by the coordinates in each [`LaunchContext`].
///
/// # Errors
///
/// `launch` fails with [`crate::LaunchError::InvalidDims`] when the
/// requested shape exceeds an absolute substrate ceiling, and with
/// [`crate::LaunchError::DeviceFault`] when a previously unsynchronized
/// launch faulted (the sticky, deferred error contract). Faults are never
/// retried by the backend.
pub trait Backend {
    /// Hardware ceilings this backend imposes on launch dimensions.
    fn limits(&self) -> ResourceLimits;

    /// Run `body` once per (group, lane) pair described by `dims`.
    fn launch(&self, dims: &LaunchDims, mode: LaunchMode, body: LaunchBody<'_>) -> Result<()>;

    /// Wait for all outstanding work and surface any deferred fault.
    fn synchronize(&self) -> Result<()>;
}
