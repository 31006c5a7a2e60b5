//! Execution-mapping engine for hierarchical parallel launches.
//!
//! A single loop-nest description runs unmodified on any substrate that
//! implements [`Backend`]: the caller supplies iteration-domain
//! [`Segment`]s and a body closure, picks a mapping strategy per axis
//! ([`Direct`] or [`Strided`], over group or lane coordinates), and the
//! engine sizes the grid, issues the launch, and translates each lane's
//! hardware coordinates into logical indices.
//!
//! ```
//! use gridloop_core::{launch_sized, loop_axis, Direct, Scope, Axis, Segment};
//! use gridloop_core::sizing::{AxisMap, LoopNest};
//! use gridloop_backends::{CpuBackend, LaunchMode};
//! use std::sync::atomic::{AtomicI64, Ordering};
//!
//! let backend = CpuBackend::new();
//! let seg = Segment::new(0, 100);
//! let nest = LoopNest::stmt(vec![AxisMap::direct_lanes(Axis::X, seg.len())]);
//! let sum = AtomicI64::new(0);
//!
//! launch_sized(&backend, &nest, LaunchMode::Sync, |ctx| {
//!     loop_axis::<Direct>(ctx, Scope::Lane, Axis::X, &seg, |i| {
//!         sum.fetch_add(i, Ordering::Relaxed);
//!     });
//! })
//! .unwrap();
//!
//! assert_eq!(sum.load(Ordering::Relaxed), (0..100).sum::<i64>());
//! ```
//!
//! Visitation guarantee: with a descriptor produced by the
//! [`sizing`] calculator, every index of every segment is visited exactly
//! once per launch, for both strategies and every nesting arity. Direct
//! strategies over an *undersized* descriptor silently under-cover the
//! domain; route sizing through [`launch_sized`] to avoid that.

pub mod error;
pub mod launch;
pub mod loops;
pub mod mapping;
pub mod segment;
pub mod sizing;

pub use error::{Error, Result};
pub use launch::{launch, launch_sized, launch_sized_with};
pub use loops::{loop_all_groups, loop_axis, loop_global, loop_nested2, loop_nested3};
pub use mapping::{Direct, IndexMapping, MapStyle, Scope, Strided};
pub use segment::Segment;

pub use gridloop_backends::{Axis, Backend, BlockDim, GridDim, LaunchContext, LaunchDims, LaunchMode};
