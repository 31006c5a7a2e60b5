//! Loop entry points invoked inside a launch body.
//!
//! Each function reads this lane's hardware coordinates from the
//! [`LaunchContext`], drives an [`IndexMapping`] strategy per axis, and
//! invokes the caller's body once per visited index (or tuple of
//! indices). Nested variants are perfectly nested: the z axis is
//! outermost, y next, and x innermost so the x index varies fastest,
//! the ordering the caller's memory-locality expectations rely on.

use gridloop_backends::{Axis, LaunchContext};

use crate::mapping::{scope_coord, IndexMapping, Scope};
use crate::segment::Segment;

/// Map `segment` over one axis of the hierarchy.
pub fn loop_axis<M: IndexMapping>(
    ctx: &LaunchContext,
    scope: Scope,
    axis: Axis,
    segment: &Segment,
    mut body: impl FnMut(i64),
) {
    let (coord, extent) = scope_coord(ctx, scope, axis);
    for i in M::map(coord, extent, segment) {
        body(i);
    }
}

/// Map a 2-D domain over the x and y axes of one scope.
///
/// The body receives `(i, j)` with `i` drawn from `segment_x` (fastest)
/// and `j` from `segment_y`. With [`crate::Direct`], the body runs at
/// most once, and only when *both* coordinates are within their own
/// segment's bounds.
pub fn loop_nested2<M: IndexMapping>(
    ctx: &LaunchContext,
    scope: Scope,
    segment_x: &Segment,
    segment_y: &Segment,
    mut body: impl FnMut(i64, i64),
) {
    let (cx, ex) = scope_coord(ctx, scope, Axis::X);
    let (cy, ey) = scope_coord(ctx, scope, Axis::Y);
    for j in M::map(cy, ey, segment_y) {
        for i in M::map(cx, ex, segment_x) {
            body(i, j);
        }
    }
}

/// Map a 3-D domain over the x, y, and z axes of one scope.
///
/// The body receives `(i, j, k)`; z is outermost, x innermost.
pub fn loop_nested3<M: IndexMapping>(
    ctx: &LaunchContext,
    scope: Scope,
    segment_x: &Segment,
    segment_y: &Segment,
    segment_z: &Segment,
    mut body: impl FnMut(i64, i64, i64),
) {
    let (cx, ex) = scope_coord(ctx, scope, Axis::X);
    let (cy, ey) = scope_coord(ctx, scope, Axis::Y);
    let (cz, ez) = scope_coord(ctx, scope, Axis::Z);
    for k in M::map(cz, ez, segment_z) {
        for j in M::map(cy, ey, segment_y) {
            for i in M::map(cx, ex, segment_x) {
                body(i, j, k);
            }
        }
    }
}

/// Map `segment` over the *global* lane coordinate along one axis,
/// spanning the whole launch (`group * lanes + lane`, extent
/// `groups * lanes`).
pub fn loop_global<M: IndexMapping>(
    ctx: &LaunchContext,
    axis: Axis,
    segment: &Segment,
    mut body: impl FnMut(i64),
) {
    // Global coordinates can exceed u32 in pathological shapes; the
    // emulator's per-axis ceilings keep the product within u32 range.
    let coord = ctx.global_lane(axis) as u32;
    let extent = ctx.global_extent(axis) as u32;
    for i in M::map(coord, extent, segment) {
        body(i);
    }
}

/// Run `body` with this lane's linearized group index.
///
/// Executes for every physical group regardless of work distribution;
/// useful for per-group setup that precedes the mapped loops.
pub fn loop_all_groups(ctx: &LaunchContext, mut body: impl FnMut(i64)) {
    body(ctx.linear_group_index() as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{Direct, Strided};
    use gridloop_backends::{BlockDim, GridDim, LaunchDims};

    fn ctx_at(lane: [u32; 3], block: BlockDim) -> LaunchContext {
        LaunchContext::new([0, 0, 0], lane, LaunchDims::new(GridDim::default(), block))
    }

    #[test]
    fn test_loop_axis_direct_single_visit() {
        let ctx = ctx_at([3, 0, 0], BlockDim::new(8, 1, 1));
        let seg = Segment::new(0, 8);
        let mut hits = Vec::new();
        loop_axis::<Direct>(&ctx, Scope::Lane, Axis::X, &seg, |i| hits.push(i));
        assert_eq!(hits, vec![3]);
    }

    #[test]
    fn test_loop_axis_direct_skips_out_of_bounds() {
        let ctx = ctx_at([6, 0, 0], BlockDim::new(8, 1, 1));
        let seg = Segment::new(0, 4);
        let mut hits = Vec::new();
        loop_axis::<Direct>(&ctx, Scope::Lane, Axis::X, &seg, |i| hits.push(i));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_loop_nested2_direct_requires_both_axes() {
        let block = BlockDim::new(4, 4, 1);
        let seg_x = Segment::new(0, 3);
        let seg_y = Segment::new(0, 2);

        // In bounds on x, out of bounds on y: no visit.
        let ctx = ctx_at([1, 3, 0], block);
        let mut hits = Vec::new();
        loop_nested2::<Direct>(&ctx, Scope::Lane, &seg_x, &seg_y, |i, j| hits.push((i, j)));
        assert!(hits.is_empty());

        // Both in bounds: exactly one visit.
        let ctx = ctx_at([2, 1, 0], block);
        loop_nested2::<Direct>(&ctx, Scope::Lane, &seg_x, &seg_y, |i, j| hits.push((i, j)));
        assert_eq!(hits, vec![(2, 1)]);
    }

    #[test]
    fn test_loop_nested2_strided_ordering() {
        // One lane sweeps the whole 2-D domain: inner x must complete in
        // increasing order before y advances.
        let ctx = ctx_at([0, 0, 0], BlockDim::new(1, 1, 1));
        let seg = Segment::new(0, 3);
        let mut hits = Vec::new();
        loop_nested2::<Strided>(&ctx, Scope::Lane, &seg, &seg, |i, j| hits.push((i, j)));
        assert_eq!(
            hits,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_loop_nested3_ordering_z_outermost() {
        let ctx = ctx_at([0, 0, 0], BlockDim::new(1, 1, 1));
        let seg = Segment::new(0, 2);
        let mut hits = Vec::new();
        loop_nested3::<Strided>(&ctx, Scope::Lane, &seg, &seg, &seg, |i, j, k| {
            hits.push((i, j, k))
        });
        assert_eq!(hits[0], (0, 0, 0));
        assert_eq!(hits[1], (1, 0, 0)); // x fastest
        assert_eq!(hits[2], (0, 1, 0)); // then y
        assert_eq!(hits[7], (1, 1, 1)); // z slowest
    }

    #[test]
    fn test_loop_global_spans_groups() {
        let dims = LaunchDims::new(GridDim::new(2, 1, 1), BlockDim::new(4, 1, 1));
        let seg = Segment::new(0, 8);

        // Lane 1 of group 1 has global coordinate 5.
        let ctx = LaunchContext::new([1, 0, 0], [1, 0, 0], dims);
        let mut hits = Vec::new();
        loop_global::<Direct>(&ctx, Axis::X, &seg, |i| hits.push(i));
        assert_eq!(hits, vec![5]);
    }

    #[test]
    fn test_loop_all_groups_reports_linear_index() {
        let dims = LaunchDims::new(GridDim::new(3, 2, 1), BlockDim::default());
        let ctx = LaunchContext::new([2, 1, 0], [0, 0, 0], dims);
        let mut hits = Vec::new();
        loop_all_groups(&ctx, |g| hits.push(g));
        assert_eq!(hits, vec![5]);
    }

    #[test]
    fn test_empty_segment_zero_visits_all_arities() {
        let ctx = ctx_at([0, 0, 0], BlockDim::new(2, 2, 2));
        let empty = Segment::new(0, 0);
        let mut count = 0usize;
        loop_axis::<Direct>(&ctx, Scope::Lane, Axis::X, &empty, |_| count += 1);
        loop_axis::<Strided>(&ctx, Scope::Lane, Axis::X, &empty, |_| count += 1);
        loop_nested2::<Direct>(&ctx, Scope::Lane, &empty, &empty, |_, _| count += 1);
        loop_nested2::<Strided>(&ctx, Scope::Lane, &empty, &empty, |_, _| count += 1);
        loop_nested3::<Direct>(&ctx, Scope::Lane, &empty, &empty, &empty, |_, _, _| count += 1);
        loop_nested3::<Strided>(&ctx, Scope::Lane, &empty, &empty, &empty, |_, _, _| count += 1);
        assert_eq!(count, 0);
    }
}
