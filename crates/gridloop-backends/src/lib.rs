//! Execution substrates for the gridloop workspace.
//!
//! A backend realizes the two-level execution hierarchy the mapping engine
//! targets: a grid of groups (blocks), each holding a fixed set of parallel
//! lanes (threads). This crate defines:
//!
//! - [`dims`] - the launch resource descriptor ([`GridDim`], [`BlockDim`],
//!   [`LaunchDims`]) and the [`Axis`] type shared across the workspace
//! - [`limits`] - per-axis hardware maxima reported by each backend
//! - [`context`] - the per-lane [`LaunchContext`] carrying the realized
//!   descriptor and this lane's explicit hardware coordinates
//! - [`backend`] - the [`Backend`] trait (launch, synchronize, limits)
//! - [`backends::cpu`] - the rayon-based grid emulator with sticky,
//!   deferred fault reporting
//!
//! # Execution Model
//!
//! ```text
//! Grid (dims.grid):
//!   ┌─────┬─────┬─────┐
//!   │Group│Group│Group│  Each group contains...
//!   ├─────┼─────┼─────┤
//!   │Group│Group│Group│
//!   └─────┴─────┴─────┘
//!
//! Group (dims.block):
//!   ┌────┬────┬────┐
//!   │Lane│Lane│Lane│  Each lane runs the body once
//!   ├────┼────┼────┤    with its own LaunchContext
//!   │Lane│Lane│Lane│
//!   └────┴────┴────┘
//! ```
//!
//! There is no ordering guarantee between distinct (group, lane) pairs.

pub mod backend;
pub mod backends;
pub mod context;
pub mod dims;
pub mod error;
pub mod limits;

pub use backend::{Backend, LaunchMode};
pub use backends::cpu::CpuBackend;
pub use context::LaunchContext;
pub use dims::{Axis, BlockDim, GridDim, LaunchDims};
pub use error::{ConfigError, LaunchError, Result};
pub use limits::ResourceLimits;
