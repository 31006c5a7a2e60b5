//! CPU grid emulator.
//!
//! Realizes the grid-of-groups execution model on the host with rayon:
//! groups execute in parallel across the thread pool, and lanes within a
//! group execute in parallel as a nested rayon scope. Each lane gets its
//! own [`LaunchContext`] so there is no shared mutable state between lanes
//! beyond what the body itself introduces.
//!
//! Fault model: a panic inside a lane body is the CPU emulation of an
//! asynchronous hardware fault. For `LaunchMode::Sync` it surfaces from
//! the launch call; for `LaunchMode::Async` it is recorded in a sticky
//! slot and surfaces from the next `synchronize()` (or the next launch),
//! matching how real device queues report errors.

use std::panic::{self, AssertUnwindSafe};

use parking_lot::Mutex;
use rayon::prelude::*;

use gridloop_tracing::perf_span;

use crate::backend::{Backend, LaunchBody, LaunchMode};
use crate::context::LaunchContext;
use crate::dims::{Axis, LaunchDims};
use crate::error::{LaunchError, Result};
use crate::limits::ResourceLimits;

/// Per-axis group ceiling, mirroring common device grid caps.
const MAX_GROUPS_PER_AXIS: u32 = 65_535;
/// Per-axis lane ceiling.
const MAX_LANES_PER_AXIS: u32 = 1_024;
/// Total lanes per group the emulator accepts.
const MAX_LANES_PER_GROUP: u32 = 1_024;

/// Rayon-based grid emulator.
pub struct CpuBackend {
    /// Sticky fault from an unsynchronized launch. Drained by the next
    /// synchronization point.
    deferred_fault: Mutex<Option<LaunchError>>,
}

impl CpuBackend {
    /// Create a new CPU backend.
    pub fn new() -> Self {
        Self {
            deferred_fault: Mutex::new(None),
        }
    }

    /// Validate a launch shape against the emulator's absolute ceilings.
    fn validate(&self, dims: &LaunchDims) -> Result<()> {
        let limits = self.limits();
        for axis in Axis::ALL {
            if dims.groups(axis) > limits.max_groups(axis) {
                return Err(LaunchError::invalid_dims(format!(
                    "{} groups along {} exceeds ceiling {}",
                    dims.groups(axis),
                    axis,
                    limits.max_groups(axis)
                )));
            }
            if dims.lanes(axis) > limits.max_lanes(axis) {
                return Err(LaunchError::invalid_dims(format!(
                    "{} lanes along {} exceeds ceiling {}",
                    dims.lanes(axis),
                    axis,
                    limits.max_lanes(axis)
                )));
            }
            if dims.groups(axis) == 0 || dims.lanes(axis) == 0 {
                return Err(LaunchError::invalid_dims(format!(
                    "zero extent along {axis}"
                )));
            }
        }
        if dims.block.total() > MAX_LANES_PER_GROUP {
            return Err(LaunchError::invalid_dims(format!(
                "{} lanes per group exceeds ceiling {}",
                dims.block.total(),
                MAX_LANES_PER_GROUP
            )));
        }
        Ok(())
    }

    /// Run the grid and report the first fault, if any.
    fn run_grid(&self, dims: &LaunchDims, body: LaunchBody<'_>) -> Option<LaunchError> {
        let total_groups = dims.total_groups() as usize;
        let num_lanes = dims.block.total() as usize;

        let groups_per_row = dims.grid.x as usize;
        let groups_per_slice = (dims.grid.x * dims.grid.y) as usize;
        let lanes_per_row = dims.block.x as usize;
        let lanes_per_slice = (dims.block.x * dims.block.y) as usize;

        let fault: Mutex<Option<LaunchError>> = Mutex::new(None);

        // Group-level parallelism outside, lane-level nested inside.
        // Groups are naturally independent; each lane builds its own
        // context, so no execution state is shared between lanes.
        (0..total_groups).into_par_iter().for_each(|group_idx| {
            let gz = (group_idx / groups_per_slice) as u32;
            let gy = ((group_idx % groups_per_slice) / groups_per_row) as u32;
            let gx = (group_idx % groups_per_row) as u32;

            (0..num_lanes).into_par_iter().for_each(|lane_idx| {
                let lz = (lane_idx / lanes_per_slice) as u32;
                let ly = ((lane_idx % lanes_per_slice) / lanes_per_row) as u32;
                let lx = (lane_idx % lanes_per_row) as u32;

                let ctx = LaunchContext::new([gx, gy, gz], [lx, ly, lz], *dims);

                let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&ctx)));
                if let Err(payload) = outcome {
                    let msg = panic_message(payload.as_ref());
                    let mut slot = fault.lock();
                    // First fault wins; later ones from the same launch
                    // carry no extra information.
                    if slot.is_none() {
                        *slot = Some(LaunchError::device_fault(msg));
                    }
                }
            });
        });

        fault.into_inner()
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CpuBackend {
    fn limits(&self) -> ResourceLimits {
        ResourceLimits::new(
            [MAX_GROUPS_PER_AXIS; 3],
            [MAX_LANES_PER_AXIS, MAX_LANES_PER_AXIS, 64],
        )
    }

    fn launch(&self, dims: &LaunchDims, mode: LaunchMode, body: LaunchBody<'_>) -> Result<()> {
        let _span = perf_span!(
            "cpu_launch",
            groups = dims.total_groups(),
            lanes = dims.total_lanes()
        );

        self.validate(dims)?;

        // Sticky-error contract: a fault from a previous unsynchronized
        // launch surfaces from the next substrate call.
        if let Some(fault) = self.deferred_fault.lock().take() {
            return Err(fault);
        }

        tracing::debug!(
            grid_x = dims.grid.x,
            grid_y = dims.grid.y,
            grid_z = dims.grid.z,
            block_x = dims.block.x,
            block_y = dims.block.y,
            block_z = dims.block.z,
            mode = ?mode,
            "cpu_launch_begin"
        );

        let fault = self.run_grid(dims, body);

        match mode {
            LaunchMode::Sync => match fault {
                Some(err) => Err(err),
                None => Ok(()),
            },
            LaunchMode::Async => {
                // The emulated queue drains eagerly, but the error contract
                // of an asynchronous substrate is preserved: the fault is
                // held back until a synchronization point.
                if let Some(err) = fault {
                    *self.deferred_fault.lock() = Some(err);
                }
                Ok(())
            }
        }
    }

    fn synchronize(&self) -> Result<()> {
        match self.deferred_fault.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Extract a readable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "lane panicked".to_string()
    }
}
