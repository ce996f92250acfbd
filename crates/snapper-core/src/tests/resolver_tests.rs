use super::*;
use crate::layout::test_helpers::uniform_snapshot;
use crate::layout::LayoutSnapshot;
use crate::snap_offsets::SnapOffsets;
use snapper_animation::{decay_distance, SplineBasedDecaySpec};

fn resolve_with(snapshot: &LayoutSnapshot, velocity: f32, distance: f32) -> Option<usize> {
    let geometry = SnapGeometry::new(snapshot, &SnapOffsets::Start);
    TargetIndexResolver::new(&geometry, ResolverTuning::default()).resolve(
        velocity,
        |_| distance,
        f32::INFINITY,
    )
}

#[test]
fn short_swipe_springs_back_to_current_item() {
    let snapshot = uniform_snapshot(10, 200, 0, 500, 0);
    assert_eq!(resolve_with(&snapshot, 1000.0, 150.0), Some(0));
}

#[test]
fn long_fling_is_clamped_to_last_index() {
    let snapshot = uniform_snapshot(10, 200, 0, 500, 0);
    assert_eq!(resolve_with(&snapshot, 8000.0, 2050.0), Some(9));
}

#[test]
fn forward_fling_advances_past_threshold() {
    let snapshot = uniform_snapshot(20, 200, 0, 500, 0);
    // Lands at 850, closest to item 4.
    assert_eq!(resolve_with(&snapshot, 3000.0, 850.0), Some(4));
    assert_eq!(resolve_with(&snapshot, 3000.0, 2050.0), Some(10));
}

#[test]
fn backward_fling_moves_toward_start() {
    let snapshot = uniform_snapshot(20, 200, 0, 500, 1000);
    assert_eq!(resolve_with(&snapshot, -3000.0, -850.0), Some(1));
    assert_eq!(resolve_with(&snapshot, -200.0, -60.0), Some(5));
}

#[test]
fn tap_between_items_picks_the_nearer_one() {
    // Item 5 sits at -120, item 6 at 80.
    let snapshot = uniform_snapshot(20, 200, 0, 500, 1120);
    assert_eq!(resolve_with(&snapshot, 100.0, 10.0), Some(6));

    // Item 5 sits at -60, item 6 at 140.
    let snapshot = uniform_snapshot(20, 200, 0, 500, 1060);
    assert_eq!(resolve_with(&snapshot, -100.0, -10.0), Some(5));
}

#[test]
fn slow_fling_ignores_decay() {
    let snapshot = uniform_snapshot(20, 200, 0, 500, 1060);
    assert_eq!(resolve_with(&snapshot, 0.3, 5000.0), Some(5));
}

#[test]
fn fling_distance_is_limited() {
    let snapshot = uniform_snapshot(20, 200, 0, 500, 0);
    let geometry = SnapGeometry::new(&snapshot, &SnapOffsets::Start);
    let resolver = TargetIndexResolver::new(&geometry, ResolverTuning::default());

    assert_eq!(resolver.fling_distance(5000.0, |_| 5000.0, 400.0), 400.0);
    assert_eq!(resolver.fling_distance(-5000.0, |_| -5000.0, 400.0), -400.0);
    assert_eq!(resolver.resolve(5000.0, |_| 5000.0, 400.0), Some(2));
}

#[test]
fn tap_fraction_is_configurable() {
    let snapshot = uniform_snapshot(20, 200, 0, 500, 0);
    let geometry = SnapGeometry::new(&snapshot, &SnapOffsets::Start);
    let tuning = ResolverTuning {
        tap_fraction: 0.0,
        ..ResolverTuning::default()
    };

    let eager = TargetIndexResolver::new(&geometry, tuning);
    let default = TargetIndexResolver::new(&geometry, ResolverTuning::default());
    assert_eq!(eager.resolve(1000.0, |_| 250.0, f32::INFINITY), Some(1));
    assert_eq!(default.resolve(1000.0, |_| 250.0, f32::INFINITY), Some(0));
}

#[test]
fn nothing_to_resolve_without_current_item() {
    let empty = LayoutSnapshot::new([], 0, 0, 500);
    assert_eq!(resolve_with(&empty, 1000.0, 500.0), None);
}

#[test]
fn resolved_index_grows_with_velocity() {
    let spec = SplineBasedDecaySpec::default();
    let snapshot = uniform_snapshot(1000, 200, 16, 800, 10_000);
    let geometry = SnapGeometry::new(&snapshot, &SnapOffsets::Center);
    let resolver = TargetIndexResolver::new(&geometry, ResolverTuning::default());
    let resolve = |velocity: f32| {
        resolver
            .resolve(velocity, |v| decay_distance(&spec, v), f32::INFINITY)
            .map(|index| index as i64)
    };

    let mut last_forward = resolve(0.0);
    let mut last_backward = last_forward;
    for step in 1..200 {
        let speed = step as f32 * 75.0;
        let forward = resolve(speed);
        let backward = resolve(-speed);
        assert!(forward >= last_forward, "forward target shrank at {speed}");
        assert!(backward <= last_backward, "backward target grew at {speed}");
        last_forward = forward;
        last_backward = backward;
    }
}
