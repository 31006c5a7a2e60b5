//! Dimension calculator.
//!
//! Computes the minimum launch dimensions that cover a described loop
//! nest, respecting hardware maxima. Statements composed sequentially
//! inside one launch share the same physical grid, so their requirements
//! combine point-wise by maximum, never by sum.

use gridloop_backends::{Axis, LaunchDims, ResourceLimits};

use crate::mapping::{MapStyle, Scope};

/// One axis of a mapped statement: which coordinate drives it, the
/// visitation style, and the iteration-domain length along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap {
    pub scope: Scope,
    pub axis: Axis,
    pub style: MapStyle,
    pub len: i64,
}

impl AxisMap {
    /// Direct mapping over lane coordinates.
    pub const fn direct_lanes(axis: Axis, len: i64) -> Self {
        Self {
            scope: Scope::Lane,
            axis,
            style: MapStyle::Direct,
            len,
        }
    }

    /// Direct mapping over group coordinates.
    pub const fn direct_groups(axis: Axis, len: i64) -> Self {
        Self {
            scope: Scope::Group,
            axis,
            style: MapStyle::Direct,
            len,
        }
    }

    /// Strided mapping over lane coordinates.
    pub const fn strided_lanes(axis: Axis, len: i64) -> Self {
        Self {
            scope: Scope::Lane,
            axis,
            style: MapStyle::Strided,
            len,
        }
    }

    /// Strided mapping over group coordinates.
    pub const fn strided_groups(axis: Axis, len: i64) -> Self {
        Self {
            scope: Scope::Group,
            axis,
            style: MapStyle::Strided,
            len,
        }
    }
}

/// A loop nest, as the calculator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopNest {
    /// One mapped statement: up to one [`AxisMap`] per (scope, axis).
    Stmt(Vec<AxisMap>),
    /// Sequential composition of statements within the same launch.
    Seq(Vec<LoopNest>),
}

impl LoopNest {
    /// Convenience constructor for a single statement.
    pub fn stmt(maps: Vec<AxisMap>) -> Self {
        LoopNest::Stmt(maps)
    }
}

/// Compute launch dimensions covering `nest`, starting from `current`.
///
/// Per axis: a direct mapping requires `min(len, maximum)` coordinates;
/// a strided mapping is correct at any extent, so the same formula is
/// used as the occupancy default. Components the caller already set in
/// `current` are never lowered (point-wise max), and the result never
/// exceeds `limits` on any axis nor drops below 1.
pub fn calculate(nest: &LoopNest, current: LaunchDims, limits: &ResourceLimits) -> LaunchDims {
    let mut dims = current;
    apply(nest, &mut dims, limits);
    dims.clamp(limits)
}

fn apply(nest: &LoopNest, dims: &mut LaunchDims, limits: &ResourceLimits) {
    match nest {
        LoopNest::Stmt(maps) => {
            for m in maps {
                let len = m.len.max(0);
                let ceiling = match m.scope {
                    Scope::Group => limits.max_groups(m.axis),
                    Scope::Lane => limits.max_lanes(m.axis),
                };
                // Direct needs one coordinate per index; strided accepts
                // any extent, and min(len, ceiling) avoids idle
                // coordinates without a separate heuristic.
                let required = (len.min(ceiling as i64) as u32).max(1);
                match m.scope {
                    Scope::Group => dims.grow_groups(m.axis, required),
                    Scope::Lane => dims.grow_lanes(m.axis, required),
                }
            }
        }
        LoopNest::Seq(children) => {
            // Depth-first; the grow_* max-update makes the combination
            // point-wise maximum across sibling statements.
            for child in children {
                apply(child, dims, limits);
            }
        }
    }
}
