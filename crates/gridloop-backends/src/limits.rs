//! Per-axis hardware resource maxima.

use crate::dims::Axis;

/// Hardware ceilings a backend imposes on launch dimensions.
///
/// Supplied by the execution substrate and consulted by the dimension
/// calculator; a descriptor component may never exceed the corresponding
/// ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    max_groups: [u32; 3],
    max_lanes: [u32; 3],
}

impl ResourceLimits {
    /// Create limits from per-axis group and lane ceilings (x, y, z order).
    pub const fn new(max_groups: [u32; 3], max_lanes: [u32; 3]) -> Self {
        Self { max_groups, max_lanes }
    }

    /// Maximum group count along one axis.
    pub const fn max_groups(&self, axis: Axis) -> u32 {
        self.max_groups[axis.index()]
    }

    /// Maximum lane count along one axis.
    pub const fn max_lanes(&self, axis: Axis) -> u32 {
        self.max_lanes[axis.index()]
    }
}
