//! Per-lane launch context.

use crate::dims::{Axis, LaunchDims};

/// Execution context for a single lane.
///
/// Created by the substrate once per (group, lane) pair and passed by
/// reference into the body; it carries the *realized* launch dimensions
/// (which may differ from what the caller requested) plus this lane's
/// explicit hardware coordinates, so nested statements can recompute
/// sub-mappings without consulting any ambient state. Read-only for the
/// lifetime of the launch.
#[derive(Debug, Clone, Copy)]
pub struct LaunchContext {
    group_idx: [u32; 3],
    lane_idx: [u32; 3],
    dims: LaunchDims,
}

impl LaunchContext {
    /// Create a new context. Called by backends only; bodies never
    /// construct their own coordinates.
    pub const fn new(group_idx: [u32; 3], lane_idx: [u32; 3], dims: LaunchDims) -> Self {
        Self {
            group_idx,
            lane_idx,
            dims,
        }
    }

    /// The realized launch dimensions.
    pub const fn dims(&self) -> &LaunchDims {
        &self.dims
    }

    /// This lane's group coordinate along one axis.
    pub const fn group(&self, axis: Axis) -> u32 {
        self.group_idx[axis.index()]
    }

    /// This lane's coordinate within its group along one axis.
    pub const fn lane(&self, axis: Axis) -> u32 {
        self.lane_idx[axis.index()]
    }

    /// Realized group count along one axis.
    pub const fn groups(&self, axis: Axis) -> u32 {
        self.dims.groups(axis)
    }

    /// Realized lane count along one axis.
    pub const fn lanes(&self, axis: Axis) -> u32 {
        self.dims.lanes(axis)
    }

    /// This lane's global coordinate along one axis, spanning the whole
    /// launch: `group * lanes_per_group + lane`.
    pub const fn global_lane(&self, axis: Axis) -> u64 {
        self.group(axis) as u64 * self.lanes(axis) as u64 + self.lane(axis) as u64
    }

    /// Global lane extent along one axis: `groups * lanes_per_group`.
    pub const fn global_extent(&self, axis: Axis) -> u64 {
        self.groups(axis) as u64 * self.lanes(axis) as u64
    }

    /// Linearized group index within the grid (x fastest).
    pub const fn linear_group_index(&self) -> u64 {
        let [gx, gy, gz] = self.group_idx;
        (gz as u64 * self.dims.grid.y as u64 * self.dims.grid.x as u64)
            + (gy as u64 * self.dims.grid.x as u64)
            + gx as u64
    }

    /// Linearized lane index within the group (x fastest).
    pub const fn linear_lane_index(&self) -> u32 {
        let [lx, ly, lz] = self.lane_idx;
        (lz * self.dims.block.y * self.dims.block.x) + (ly * self.dims.block.x) + lx
    }

    /// Linearized lane index across the whole launch.
    pub const fn global_linear_index(&self) -> u64 {
        self.linear_group_index() * self.dims.block.total() as u64 + self.linear_lane_index() as u64
    }
}
