//! Launch front-end.
//!
//! [`launch`] issues a body over explicitly chosen dimensions;
//! [`launch_sized`] routes the descriptor through the dimension
//! calculator first and is the expected path whenever direct strategies
//! are in play, since an undersized descriptor silently under-covers the
//! domain.

use gridloop_backends::{Backend, LaunchContext, LaunchDims, LaunchMode};
use gridloop_tracing::perf_span;

use crate::error::Result;
use crate::sizing::{self, LoopNest};

/// Run `body` once per (group, lane) pair described by `dims`.
///
/// With [`LaunchMode::Sync`] the call blocks until every body has
/// returned and all memory effects are visible. With
/// [`LaunchMode::Async`] it returns after enqueuing; the caller must
/// call [`Backend::synchronize`] before observing results, and any fault
/// surfaces there.
pub fn launch<B: Backend + ?Sized>(
    backend: &B,
    dims: &LaunchDims,
    mode: LaunchMode,
    body: impl Fn(&LaunchContext) + Sync,
) -> Result<()> {
    let _span = perf_span!("launch", groups = dims.total_groups(), lanes = dims.total_lanes());
    backend.launch(dims, mode, &body)?;
    Ok(())
}

/// Size the launch from `nest` via the dimension calculator, then run
/// `body`. Returns the realized dimensions (also available to the body
/// through its [`LaunchContext`]).
pub fn launch_sized<B: Backend + ?Sized>(
    backend: &B,
    nest: &LoopNest,
    mode: LaunchMode,
    body: impl Fn(&LaunchContext) + Sync,
) -> Result<LaunchDims> {
    launch_sized_with(backend, nest, LaunchDims::default(), mode, body)
}

/// As [`launch_sized`], starting from caller-preset dimensions (for
/// example a block hint); preset components are never lowered.
pub fn launch_sized_with<B: Backend + ?Sized>(
    backend: &B,
    nest: &LoopNest,
    current: LaunchDims,
    mode: LaunchMode,
    body: impl Fn(&LaunchContext) + Sync,
) -> Result<LaunchDims> {
    let limits = backend.limits();
    let dims = sizing::calculate(nest, current, &limits);
    tracing::debug!(%dims, "launch_sized");
    launch(backend, &dims, mode, body)?;
    Ok(dims)
}
