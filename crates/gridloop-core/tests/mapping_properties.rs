//! Visitation properties of the mapping strategies, exercised through
//! real launches on the CPU grid emulator.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use gridloop_backends::CpuBackend;
use gridloop_core::sizing::{AxisMap, LoopNest};
use gridloop_core::{
    launch, launch_sized, loop_axis, loop_nested2, loop_nested3, Axis, BlockDim, Direct, GridDim,
    LaunchDims, LaunchMode, Scope, Segment, Strided,
};

/// Launch `nest` and collect every index the body is handed.
fn visited_1d<M: gridloop_core::IndexMapping>(
    backend: &CpuBackend,
    nest: &LoopNest,
    scope: Scope,
    seg: Segment,
) -> Vec<i64> {
    let visited = Mutex::new(Vec::new());
    launch_sized(backend, nest, LaunchMode::Sync, |ctx| {
        loop_axis::<M>(ctx, scope, Axis::X, &seg, |i| visited.lock().push(i));
    })
    .unwrap();
    let mut out = visited.into_inner();
    out.sort_unstable();
    out
}

#[test]
fn direct_lane_coverage_is_exact() {
    let backend = CpuBackend::new();
    for len in [0i64, 1, 7, 100] {
        let seg = Segment::new(0, len);
        let nest = LoopNest::stmt(vec![AxisMap::direct_lanes(Axis::X, len)]);
        let got = visited_1d::<Direct>(&backend, &nest, Scope::Lane, seg);
        assert_eq!(got, (0..len).collect::<Vec<i64>>(), "len={len}");
    }
}

#[test]
fn direct_group_coverage_is_exact() {
    let backend = CpuBackend::new();
    let seg = Segment::new(0, 37);
    let nest = LoopNest::stmt(vec![AxisMap::direct_groups(Axis::X, seg.len())]);
    let got = visited_1d::<Direct>(&backend, &nest, Scope::Group, seg);
    assert_eq!(got, (0..37).collect::<Vec<i64>>());
}

#[test]
fn strided_coverage_is_exact_when_sized() {
    let backend = CpuBackend::new();
    for len in [0i64, 1, 23, 300] {
        let seg = Segment::new(0, len);
        let nest = LoopNest::stmt(vec![AxisMap::strided_lanes(Axis::X, len)]);
        let got = visited_1d::<Strided>(&backend, &nest, Scope::Lane, seg);
        assert_eq!(got, (0..len).collect::<Vec<i64>>(), "len={len}");
    }
}

#[test]
fn strided_coverage_holds_at_any_launch_size() {
    // Full coverage must not depend on how the launch was sized.
    let backend = CpuBackend::new();
    let seg = Segment::new(0, 23);
    for lanes in [1u32, 3, 4, 64] {
        let dims = LaunchDims::new(GridDim::default(), BlockDim::new(lanes, 1, 1));
        let visited = Mutex::new(Vec::new());
        launch(&backend, &dims, LaunchMode::Sync, |ctx| {
            loop_axis::<Strided>(ctx, Scope::Lane, Axis::X, &seg, |i| visited.lock().push(i));
        })
        .unwrap();
        let mut got = visited.into_inner();
        got.sort_unstable();
        assert_eq!(got, (0..23).collect::<Vec<i64>>(), "lanes={lanes}");
    }
}

#[test]
fn offset_segment_visits_its_own_values() {
    let backend = CpuBackend::new();
    let seg = Segment::new(100, 120);
    let nest = LoopNest::stmt(vec![AxisMap::direct_lanes(Axis::X, seg.len())]);
    let got = visited_1d::<Direct>(&backend, &nest, Scope::Lane, seg);
    assert_eq!(got, (100..120).collect::<Vec<i64>>());
}

#[test]
fn direct_undersized_descriptor_undercovers_exactly() {
    // Documented silent behavior: an 8-lane block over a 20-index domain
    // visits exactly the first 8 indices, never more.
    let backend = CpuBackend::new();
    let seg = Segment::new(0, 20);
    let dims = LaunchDims::new(GridDim::default(), BlockDim::new(8, 1, 1));
    let visited = Mutex::new(Vec::new());
    launch(&backend, &dims, LaunchMode::Sync, |ctx| {
        loop_axis::<Direct>(ctx, Scope::Lane, Axis::X, &seg, |i| visited.lock().push(i));
    })
    .unwrap();
    let mut got = visited.into_inner();
    got.sort_unstable();
    assert_eq!(got, (0..8).collect::<Vec<i64>>());
}

#[test]
fn strided_per_lane_visit_counts() {
    let backend = CpuBackend::new();
    let len = 17i64;
    let stride = 4u32;
    let seg = Segment::new(0, len);
    let dims = LaunchDims::new(GridDim::default(), BlockDim::new(stride, 1, 1));

    let per_lane: Mutex<HashMap<u32, usize>> = Mutex::new(HashMap::new());
    launch(&backend, &dims, LaunchMode::Sync, |ctx| {
        let lane = ctx.lane(Axis::X);
        let mut count = 0usize;
        loop_axis::<Strided>(ctx, Scope::Lane, Axis::X, &seg, |_| count += 1);
        per_lane.lock().insert(lane, count);
    })
    .unwrap();

    let per_lane = per_lane.into_inner();
    let mut total = 0usize;
    for lane in 0..stride {
        let expected = ((len - lane as i64) + stride as i64 - 1) / stride as i64;
        let got = per_lane[&lane];
        assert_eq!(got as i64, expected, "lane {lane}");
        total += got;
    }
    assert_eq!(total as i64, len);
}

#[test]
fn nested2_direct_counter_matches_product() {
    // Domain 10x10, descriptor 10x10: exactly 100 invocations.
    let backend = CpuBackend::new();
    let seg = Segment::new(0, 10);
    let nest = LoopNest::stmt(vec![
        AxisMap::direct_lanes(Axis::X, 10),
        AxisMap::direct_lanes(Axis::Y, 10),
    ]);
    let count = AtomicUsize::new(0);
    let dims = launch_sized(&backend, &nest, LaunchMode::Sync, |ctx| {
        loop_nested2::<Direct>(ctx, Scope::Lane, &seg, &seg, |_, _| {
            count.fetch_add(1, Ordering::Relaxed);
        });
    })
    .unwrap();
    assert_eq!(dims.block, BlockDim::new(10, 10, 1));
    assert_eq!(count.load(Ordering::Relaxed), 100);
}

#[test]
fn nested2_direct_oversized_descriptor_skips_out_of_bounds() {
    // Descriptor strictly larger than the domain on both axes: the count
    // is still the exact product of the domain sizes.
    let backend = CpuBackend::new();
    let seg_x = Segment::new(0, 5);
    let seg_y = Segment::new(0, 3);
    let dims = LaunchDims::new(GridDim::default(), BlockDim::new(8, 8, 1));
    let count = AtomicUsize::new(0);
    launch(&backend, &dims, LaunchMode::Sync, |ctx| {
        loop_nested2::<Direct>(ctx, Scope::Lane, &seg_x, &seg_y, |_, _| {
            count.fetch_add(1, Ordering::Relaxed);
        });
    })
    .unwrap();
    assert_eq!(count.load(Ordering::Relaxed), 15);
}

#[test]
fn nested3_direct_coverage_is_exact() {
    let backend = CpuBackend::new();
    let (sx, sy, sz) = (Segment::new(0, 4), Segment::new(0, 3), Segment::new(0, 2));
    let nest = LoopNest::stmt(vec![
        AxisMap::direct_lanes(Axis::X, sx.len()),
        AxisMap::direct_lanes(Axis::Y, sy.len()),
        AxisMap::direct_lanes(Axis::Z, sz.len()),
    ]);
    let visited = Mutex::new(Vec::new());
    launch_sized(&backend, &nest, LaunchMode::Sync, |ctx| {
        loop_nested3::<Direct>(ctx, Scope::Lane, &sx, &sy, &sz, |i, j, k| {
            visited.lock().push((i, j, k));
        });
    })
    .unwrap();

    let mut got = visited.into_inner();
    got.sort_unstable();
    let mut expected = Vec::new();
    for i in 0..4 {
        for j in 0..3 {
            for k in 0..2 {
                expected.push((i, j, k));
            }
        }
    }
    expected.sort_unstable();
    assert_eq!(got, expected);
}

#[test]
fn nested_strided_inner_axis_varies_fastest() {
    // Per lane, for fixed outer (y) index the inner (x) indices must
    // arrive in strictly increasing order before y advances.
    let backend = CpuBackend::new();
    let seg_x = Segment::new(0, 5);
    let seg_y = Segment::new(0, 4);
    let dims = LaunchDims::new(GridDim::default(), BlockDim::new(2, 2, 1));

    let per_lane: Mutex<HashMap<(u32, u32), Vec<(i64, i64)>>> = Mutex::new(HashMap::new());
    launch(&backend, &dims, LaunchMode::Sync, |ctx| {
        let key = (ctx.lane(Axis::X), ctx.lane(Axis::Y));
        let mut seq = Vec::new();
        loop_nested2::<Strided>(ctx, Scope::Lane, &seg_x, &seg_y, |i, j| seq.push((i, j)));
        per_lane.lock().insert(key, seq);
    })
    .unwrap();

    let per_lane = per_lane.into_inner();
    let mut all = Vec::new();
    for (lane, seq) in &per_lane {
        for pair in seq.windows(2) {
            let (i0, j0) = pair[0];
            let (i1, j1) = pair[1];
            assert!(
                j1 > j0 || (j1 == j0 && i1 > i0),
                "lane {lane:?}: {pair:?} out of order"
            );
        }
        all.extend_from_slice(seq);
    }

    // Union across lanes covers the product domain exactly once.
    all.sort_unstable();
    let mut expected = Vec::new();
    for j in 0..4 {
        for i in 0..5 {
            expected.push((i, j));
        }
    }
    expected.sort_unstable();
    assert_eq!(all, expected);
}

#[test]
fn mixed_scope_nest_covers_2d_tile() {
    // The common tiling shape: rows strided over groups, columns direct
    // over lanes, composed as two statements in one launch.
    let backend = CpuBackend::new();
    let rows = Segment::new(0, 50);
    let cols = Segment::new(0, 16);
    let nest = LoopNest::Seq(vec![
        LoopNest::stmt(vec![AxisMap::strided_groups(Axis::X, rows.len())]),
        LoopNest::stmt(vec![AxisMap::direct_lanes(Axis::X, cols.len())]),
    ]);

    let visited = Mutex::new(Vec::new());
    launch_sized(&backend, &nest, LaunchMode::Sync, |ctx| {
        loop_axis::<Strided>(ctx, Scope::Group, Axis::X, &rows, |row| {
            loop_axis::<Direct>(ctx, Scope::Lane, Axis::X, &cols, |col| {
                visited.lock().push((row, col));
            });
        });
    })
    .unwrap();

    let mut got = visited.into_inner();
    got.sort_unstable();
    let mut expected = Vec::new();
    for row in 0..50 {
        for col in 0..16 {
            expected.push((row, col));
        }
    }
    assert_eq!(got, expected);
}

#[test]
fn empty_domain_never_invokes_body() {
    let backend = CpuBackend::new();
    let empty = Segment::new(0, 0);
    let dims = LaunchDims::new(GridDim::new(2, 1, 1), BlockDim::new(4, 4, 1));
    let count = AtomicUsize::new(0);
    launch(&backend, &dims, LaunchMode::Sync, |ctx| {
        loop_axis::<Direct>(ctx, Scope::Lane, Axis::X, &empty, |_| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        loop_axis::<Strided>(ctx, Scope::Group, Axis::X, &empty, |_| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        loop_nested2::<Direct>(ctx, Scope::Lane, &empty, &empty, |_, _| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        loop_nested3::<Strided>(ctx, Scope::Lane, &empty, &empty, &empty, |_, _, _| {
            count.fetch_add(1, Ordering::Relaxed);
        });
    })
    .unwrap();
    assert_eq!(count.load(Ordering::Relaxed), 0);
}
