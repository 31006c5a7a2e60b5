//! Index-mapping strategies.
//!
//! A strategy is a pure function of one hardware coordinate, the realized
//! extent along its axis, and an iteration-domain segment, yielding the
//! sequence of logical indices that (group, lane) visits. The strategy
//! set is closed: [`Direct`] maps a coordinate to at most one index;
//! [`Strided`] walks the segment with a stride equal to the realized
//! extent (a grid-stride loop), so it covers the domain at any launch
//! size.

use gridloop_backends::{Axis, LaunchContext};

use crate::segment::Segment;

/// Which level of the execution hierarchy drives a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The group (block) coordinate along the axis.
    Group,
    /// The lane (thread) coordinate along the axis.
    Lane,
}

/// Visitation rule of a mapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapStyle {
    /// One coordinate, at most one index; out-of-range coordinates are
    /// silently skipped.
    Direct,
    /// One coordinate, zero or more indices spaced by the realized extent.
    Strided,
}

/// An index-mapping strategy.
///
/// Implementations are stateless unit types; `map` takes the coordinate
/// and the extent as explicit arguments, never ambient state.
pub trait IndexMapping {
    /// The visitation sequence produced for one coordinate.
    type Iter: Iterator<Item = i64>;

    /// Runtime tag for this strategy, used by the dimension calculator.
    const STYLE: MapStyle;

    /// Map one hardware coordinate over `segment`.
    ///
    /// `extent` is the realized coordinate count along the axis (stride
    /// source for [`Strided`]; ignored by [`Direct`]).
    fn map(coord: u32, extent: u32, segment: &Segment) -> Self::Iter;
}

/// Direct mapping: coordinate `c` visits `begin + c` iff `c < len`.
///
/// Intended for domains no larger than the realized extent. With a
/// smaller extent the tail of the domain is silently skipped; size the
/// launch through the dimension calculator to avoid under-coverage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl IndexMapping for Direct {
    type Iter = std::option::IntoIter<i64>;

    const STYLE: MapStyle = MapStyle::Direct;

    fn map(coord: u32, _extent: u32, segment: &Segment) -> Self::Iter {
        let c = coord as i64;
        let hit = if c < segment.len() {
            Some(segment.begin() + c)
        } else {
            None
        };
        hit.into_iter()
    }
}

/// Strided mapping: coordinate `c` visits `begin+c, begin+c+extent, …`
/// while below `end`.
///
/// Full coverage holds at any realized extent; the work per coordinate
/// varies, and that load imbalance is by design.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strided;

impl IndexMapping for Strided {
    type Iter = StridedIter;

    const STYLE: MapStyle = MapStyle::Strided;

    fn map(coord: u32, extent: u32, segment: &Segment) -> Self::Iter {
        StridedIter {
            next: segment.begin() + coord as i64,
            end: segment.begin() + segment.len(),
            stride: extent as i64,
        }
    }
}

/// Lazy visitation sequence for [`Strided`].
#[derive(Debug, Clone)]
pub struct StridedIter {
    next: i64,
    end: i64,
    stride: i64,
}

impl Iterator for StridedIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.next < self.end {
            let idx = self.next;
            self.next += self.stride;
            Some(idx)
        } else {
            None
        }
    }
}

/// Resolve the (coordinate, extent) pair a scope and axis select from a
/// lane's context.
pub(crate) fn scope_coord(ctx: &LaunchContext, scope: Scope, axis: Axis) -> (u32, u32) {
    match scope {
        Scope::Group => (ctx.group(axis), ctx.groups(axis)),
        Scope::Lane => (ctx.lane(axis), ctx.lanes(axis)),
    }
}
