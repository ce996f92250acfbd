use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use super::*;
use crate::frame_clock::FixedStepFrameClock;
use crate::layout::{Item, VisibleItems};
use crate::snap_offsets::SnapOffsets;

/// Equally sized items in a viewport that starts at the top of the content.
struct TestList {
    count: usize,
    size: i32,
    viewport: i32,
    scroll: Cell<f32>,
    scroll_calls: Cell<usize>,
}

impl TestList {
    fn new(count: usize, size: i32, viewport: i32) -> Self {
        Self {
            count,
            size,
            viewport,
            scroll: Cell::new(0.0),
            scroll_calls: Cell::new(0),
        }
    }

    fn scrolled_to(self, scroll: f32) -> Self {
        self.scroll.set(scroll);
        self
    }

    fn max_scroll(&self) -> f32 {
        (self.count as i32 * self.size - self.viewport).max(0) as f32
    }
}

impl LayoutSource for TestList {
    fn visible_items(&self) -> VisibleItems {
        let scroll = self.scroll.get();
        let first = (scroll / self.size as f32).floor().max(0.0) as usize;
        (first..self.count)
            .map(|index| {
                let start = index as f32 * self.size as f32 - scroll;
                Item::new(index, start.round() as i32, self.size)
            })
            .take_while(|item| item.offset < self.viewport)
            .collect()
    }

    fn total_item_count(&self) -> usize {
        self.count
    }

    fn scroll_bounds(&self) -> (i32, i32) {
        (0, self.viewport)
    }
}

impl ScrollSink for TestList {
    fn scroll_by(&self, delta: f32) -> f32 {
        self.scroll_calls.set(self.scroll_calls.get() + 1);
        let before = self.scroll.get();
        let after = (before + delta).clamp(0.0, self.max_scroll());
        self.scroll.set(after);
        after - before
    }
}

fn start_snapping() -> SnapperFlingBehavior {
    SnapperFlingBehavior::new(SnapperConfig::default().with_snap_offset(SnapOffsets::Start))
        .expect("valid config")
}

fn settled_index(list: &TestList) -> (usize, i32) {
    let snapshot = list.snapshot();
    let geometry = SnapGeometry::new(&snapshot, &SnapOffsets::Start);
    let current = geometry.current_index().expect("current item");
    (current, geometry.distance_to_index_snap(current))
}

#[test]
fn zero_velocity_on_snapped_item_does_nothing() {
    let list = TestList::new(20, 200, 500).scrolled_to(400.0);
    let behavior = start_snapping();

    let residual = behavior
        .perform_fling(&list, &list, 0.0, &mut FixedStepFrameClock::at_60_fps())
        .expect("fling");

    assert_eq!(residual, 0.0);
    assert_eq!(list.scroll_calls.get(), 0);
    assert_eq!(behavior.phase(), FlingPhase::Idle);
}

#[test]
fn empty_list_returns_velocity() {
    let list = TestList::new(0, 200, 500);
    let behavior = start_snapping();

    let residual = behavior
        .perform_fling(&list, &list, 1200.0, &mut FixedStepFrameClock::at_60_fps())
        .expect("fling");

    assert_eq!(residual, 1200.0);
    assert_eq!(list.scroll_calls.get(), 0);
}

#[test]
fn fling_toward_exhausted_edge_is_skipped() {
    let list = TestList::new(20, 200, 500);
    let behavior = start_snapping();

    let status = behavior.start_fling(&list, -900.0).expect("fling");

    assert_eq!(
        status,
        FlingStatus::Finished {
            residual_velocity: -900.0
        }
    );
    assert_eq!(behavior.animation_target(), None);
    assert_eq!(list.scroll_calls.get(), 0);
}

#[test]
fn long_fling_decays_then_settles_on_target() {
    let list = TestList::new(50, 200, 500);
    let behavior = start_snapping();

    let status = behavior.start_fling(&list, 3000.0).expect("fling");
    assert_eq!(status, FlingStatus::Running);
    assert_eq!(behavior.phase(), FlingPhase::Decay);
    let target = behavior.animation_target().expect("target");
    assert_eq!(target, 6);

    let mut clock = FixedStepFrameClock::at_60_fps();
    let mut seen_spring = false;
    let mut frames = 0;
    let residual = loop {
        match behavior.on_frame(&list, &list, clock.next_frame_nanos()) {
            FlingStatus::Running => {
                assert_eq!(behavior.animation_target(), Some(target));
                seen_spring |= behavior.phase() == FlingPhase::Spring;
            }
            FlingStatus::Finished { residual_velocity } => break residual_velocity,
        }
        frames += 1;
        assert!(frames < 1_000, "fling never finished");
    };

    assert!(seen_spring);
    assert_eq!(residual, 0.0);
    assert_eq!(settled_index(&list), (6, 0));
    assert_eq!(behavior.animation_target(), None);
    assert_eq!(behavior.phase(), FlingPhase::Idle);
}

#[test]
fn short_swipe_springs_back() {
    // Item 3 sits 40px past its snap.
    let list = TestList::new(20, 200, 500).scrolled_to(640.0);
    let behavior = start_snapping();

    behavior.start_fling(&list, 40.0).expect("fling");
    assert_eq!(behavior.phase(), FlingPhase::Spring);
    assert_eq!(behavior.animation_target(), Some(3));

    let residual = behavior
        .perform_fling(&list, &list, 40.0, &mut FixedStepFrameClock::at_60_fps())
        .expect("fling");

    assert_eq!(residual, 0.0);
    assert_eq!(settled_index(&list), (3, 0));
}

#[test]
fn backward_fling_lands_on_earlier_item() {
    let list = TestList::new(50, 200, 500).scrolled_to(4000.0);
    let behavior = start_snapping();

    behavior
        .perform_fling(&list, &list, -2500.0, &mut FixedStepFrameClock::at_60_fps())
        .expect("fling");

    let (index, distance) = settled_index(&list);
    assert!(index < 20, "landed on {index}");
    assert_eq!(distance, 0);
}

#[test]
fn rejects_non_positive_max_fling_distance() {
    let list = TestList::new(20, 200, 500);
    let behavior = SnapperFlingBehavior::new(
        SnapperConfig::default().with_maximum_fling_distance(|_: &SnapGeometry<'_>| 0.0),
    )
    .expect("valid config");

    let result = behavior.start_fling(&list, 2000.0);

    assert_eq!(result, Err(SnapperError::InvalidMaxFlingDistance(0.0)));
    assert_eq!(behavior.phase(), FlingPhase::Idle);
    assert_eq!(list.scroll_calls.get(), 0);
}

#[test]
fn rejects_override_outside_list() {
    let list = TestList::new(20, 200, 500);
    let behavior = SnapperFlingBehavior::new(
        SnapperConfig::default()
            .with_snap_offset(SnapOffsets::Start)
            .with_snap_index(|_: &SnapGeometry<'_>, _: usize, _: usize| 20),
    )
    .expect("valid config");

    let result = behavior.perform_fling(&list, &list, 2000.0, &mut FixedStepFrameClock::at_60_fps());

    assert_eq!(
        result,
        Err(SnapperError::TargetIndexOutOfRange {
            index: 20,
            item_count: 20
        })
    );
    assert_eq!(behavior.animation_target(), None);
    assert_eq!(list.scroll_calls.get(), 0);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = SnapperConfig::default().with_consumption_epsilon(-0.5);
    assert_eq!(
        SnapperFlingBehavior::new(config).err(),
        Some(SnapperError::InvalidEpsilon(-0.5))
    );
}

#[test]
fn cancel_stops_the_fling() {
    let list = TestList::new(50, 200, 500);
    let behavior = start_snapping();
    let mut clock = FixedStepFrameClock::at_60_fps();

    behavior.start_fling(&list, 3000.0).expect("fling");
    behavior.on_frame(&list, &list, clock.next_frame_nanos());
    behavior.on_frame(&list, &list, clock.next_frame_nanos());
    let scrolled = list.scroll.get();

    let residual = behavior.cancel().expect("fling was running");
    assert!(residual > 0.0);
    assert_eq!(behavior.phase(), FlingPhase::Cancelled);
    assert_eq!(behavior.animation_target(), None);

    let status = behavior.on_frame(&list, &list, clock.next_frame_nanos());
    assert!(status.is_finished());
    assert_eq!(behavior.phase(), FlingPhase::Idle);
    assert_eq!(list.scroll.get(), scrolled);
    assert_eq!(behavior.cancel(), None);
}

#[test]
fn cancel_from_inside_the_sink_reports_last_velocity() {
    let list = TestList::new(50, 200, 500);
    let behavior = start_snapping();
    let cancelled_with = Cell::new(None);
    let cancelling = |delta: f32| -> f32 {
        cancelled_with.set(behavior.cancel());
        list.scroll_by(delta)
    };
    let mut clock = FixedStepFrameClock::at_60_fps();

    behavior.start_fling(&list, 3000.0).expect("fling");
    // Nothing scrolls on the first frame.
    let first = behavior.on_frame(&list, &cancelling, clock.next_frame_nanos());
    assert_eq!(first, FlingStatus::Running);
    assert_eq!(cancelled_with.get(), None);

    let status = behavior.on_frame(&list, &cancelling, clock.next_frame_nanos());
    let velocity = cancelled_with.get().expect("fling was running");
    assert!(velocity > 2_000.0, "{velocity}");
    assert!(status.residual_velocity().is_some_and(|residual| residual > 0.0));
    assert_eq!(behavior.phase(), FlingPhase::Idle);
    assert_eq!(behavior.animation_target(), None);

    let scrolled = list.scroll.get();
    let after = behavior.on_frame(&list, &list, clock.next_frame_nanos());
    assert_eq!(
        after,
        FlingStatus::Finished {
            residual_velocity: 0.0
        }
    );
    assert_eq!(list.scroll.get(), scrolled);
}

#[test]
fn new_fling_replaces_running_one() {
    let list = TestList::new(50, 200, 500);
    let behavior = start_snapping();
    let mut clock = FixedStepFrameClock::at_60_fps();

    behavior.start_fling(&list, 3000.0).expect("fling");
    behavior.on_frame(&list, &list, clock.next_frame_nanos());
    behavior.on_frame(&list, &list, clock.next_frame_nanos());

    let residual = behavior
        .perform_fling(&list, &list, 0.0, &mut clock)
        .expect("fling");

    assert_eq!(residual, 0.0);
    assert_eq!(settled_index(&list).1, 0);
}

#[test]
fn panicking_sink_leaves_behavior_idle() {
    let list = TestList::new(50, 200, 500);
    let behavior = start_snapping();
    let exploding = |_: f32| -> f32 { panic!("sink failed") };

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        behavior.perform_fling(&list, &exploding, 3000.0, &mut FixedStepFrameClock::at_60_fps())
    }));

    assert!(result.is_err());
    assert_eq!(behavior.phase(), FlingPhase::Idle);
    assert_eq!(behavior.animation_target(), None);
    assert!(!behavior.is_running());
}

#[test]
fn panicking_sink_during_on_frame_leaves_behavior_idle() {
    let list = TestList::new(50, 200, 500);
    let behavior = start_snapping();
    let exploding = |_: f32| -> f32 { panic!("sink failed") };
    let mut clock = FixedStepFrameClock::at_60_fps();

    behavior.start_fling(&list, 3000.0).expect("fling");
    assert_eq!(behavior.animation_target(), Some(6));
    // The first frame only pins the start time, so the sink is not called.
    let first = behavior.on_frame(&list, &exploding, clock.next_frame_nanos());
    assert_eq!(first, FlingStatus::Running);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        behavior.on_frame(&list, &exploding, clock.next_frame_nanos())
    }));

    assert!(result.is_err());
    assert_eq!(behavior.phase(), FlingPhase::Idle);
    assert_eq!(behavior.animation_target(), None);
    assert!(!behavior.is_running());
    assert_eq!(behavior.cancel(), None);
}

#[test]
fn frame_without_session_goes_idle() {
    let list = TestList::new(50, 200, 500);
    let behavior = start_snapping();
    let mut clock = FixedStepFrameClock::at_60_fps();

    behavior.start_fling(&list, 3000.0).expect("fling");
    behavior.cancel().expect("fling was running");
    assert_eq!(behavior.phase(), FlingPhase::Cancelled);

    let status = behavior.on_frame(&list, &list, clock.next_frame_nanos());

    assert_eq!(
        status,
        FlingStatus::Finished {
            residual_velocity: 0.0
        }
    );
    assert_eq!(behavior.phase(), FlingPhase::Idle);
    assert_eq!(behavior.animation_target(), None);
    assert_eq!(list.scroll_calls.get(), 0);
}
