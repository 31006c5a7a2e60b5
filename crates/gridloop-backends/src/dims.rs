//! Launch dimension types.
//!
//! [`LaunchDims`] is the resource descriptor governing one launch: a
//! three-component group-count vector ([`GridDim`]) and a three-component
//! lane-count vector ([`BlockDim`]), every component at least 1.

use std::fmt;

use crate::error::ConfigError;
use crate::limits::ResourceLimits;

/// One axis of the execution hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, x first.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (x = 0, y = 1, z = 2).
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Grid dimensions: the number of groups along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDim {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridDim {
    /// Create new grid dimensions. Components are assumed to be at least 1;
    /// use [`GridDim::try_new`] for caller-supplied values.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Create grid dimensions from caller input, rejecting zero components.
    pub fn try_new(x: u32, y: u32, z: u32) -> Result<Self, ConfigError> {
        for (axis, v) in [(Axis::X, x), (Axis::Y, y), (Axis::Z, z)] {
            if v == 0 {
                return Err(ConfigError::ZeroExtent { what: "group", axis });
            }
        }
        Ok(Self { x, y, z })
    }

    /// Create a 1-D grid.
    pub const fn linear(size: u32) -> Self {
        Self { x: size, y: 1, z: 1 }
    }

    /// Group count along one axis.
    pub const fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn set(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Total number of groups in the grid.
    pub const fn total(&self) -> u64 {
        self.x as u64 * self.y as u64 * self.z as u64
    }
}

impl Default for GridDim {
    fn default() -> Self {
        Self { x: 1, y: 1, z: 1 }
    }
}

impl fmt::Display for GridDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Block dimensions: the number of lanes along each axis within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDim {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl BlockDim {
    /// Create new block dimensions. Components are assumed to be at least 1;
    /// use [`BlockDim::try_new`] for caller-supplied values.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Create block dimensions from caller input, rejecting zero components.
    pub fn try_new(x: u32, y: u32, z: u32) -> Result<Self, ConfigError> {
        for (axis, v) in [(Axis::X, x), (Axis::Y, y), (Axis::Z, z)] {
            if v == 0 {
                return Err(ConfigError::ZeroExtent { what: "lane", axis });
            }
        }
        Ok(Self { x, y, z })
    }

    /// Create a 1-D block.
    pub const fn linear(size: u32) -> Self {
        Self { x: size, y: 1, z: 1 }
    }

    /// Lane count along one axis.
    pub const fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn set(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Total number of lanes per group.
    pub const fn total(&self) -> u32 {
        self.x * self.y * self.z
    }
}

impl Default for BlockDim {
    fn default() -> Self {
        Self { x: 1, y: 1, z: 1 }
    }
}

impl fmt::Display for BlockDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Resource descriptor for one launch.
///
/// Defaults to a single group with a single lane; the dimension calculator
/// fills in components the caller left at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchDims {
    /// Group counts per axis.
    pub grid: GridDim,
    /// Lane counts per axis within each group.
    pub block: BlockDim,
}

impl LaunchDims {
    /// Create a new descriptor from pre-validated dimensions.
    pub const fn new(grid: GridDim, block: BlockDim) -> Self {
        Self { grid, block }
    }

    /// Preset the lane extents (launch-bounds hint). The dimension
    /// calculator never lowers a component below an explicit hint.
    pub const fn with_block_hint(block: BlockDim) -> Self {
        Self {
            grid: GridDim::new(1, 1, 1),
            block,
        }
    }

    /// Group count along one axis.
    pub const fn groups(&self, axis: Axis) -> u32 {
        self.grid.get(axis)
    }

    /// Lane count along one axis.
    pub const fn lanes(&self, axis: Axis) -> u32 {
        self.block.get(axis)
    }

    /// Total number of groups.
    pub const fn total_groups(&self) -> u64 {
        self.grid.total()
    }

    /// Total number of lanes across all groups.
    pub const fn total_lanes(&self) -> u64 {
        self.grid.total() * self.block.total() as u64
    }

    /// Raise one group component to at least `value`.
    pub fn grow_groups(&mut self, axis: Axis, value: u32) {
        if self.grid.get(axis) < value {
            self.grid.set(axis, value);
        }
    }

    /// Raise one lane component to at least `value`.
    pub fn grow_lanes(&mut self, axis: Axis, value: u32) {
        if self.block.get(axis) < value {
            self.block.set(axis, value);
        }
    }

    /// Reduce each component to the hardware ceiling, never below 1.
    pub fn clamp(&self, limits: &ResourceLimits) -> Self {
        let mut out = *self;
        for axis in Axis::ALL {
            let g = out.grid.get(axis).min(limits.max_groups(axis)).max(1);
            let l = out.block.get(axis).min(limits.max_lanes(axis)).max(1);
            out.grid.set(axis, g);
            out.block.set(axis, l);
        }
        out
    }
}

impl fmt::Display for LaunchDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid={}, block={}", self.grid, self.block)
    }
}
