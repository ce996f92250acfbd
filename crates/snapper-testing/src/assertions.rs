//! Checks on where a list came to rest.

use snapper_core::{LayoutSource, SnapGeometry, SnapOffsetPolicy};

/// The current item of a layout and how far it is from its snap offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapState {
    pub current_index: Option<usize>,
    pub distance: i32,
}

pub fn snap_state<L>(layout: &L, policy: &dyn SnapOffsetPolicy) -> SnapState
where
    L: LayoutSource + ?Sized,
{
    let snapshot = layout.snapshot();
    let geometry = SnapGeometry::new(&snapshot, policy);
    let current_index = geometry.current_index();
    let distance = current_index.map_or(0, |index| geometry.distance_to_index_snap(index));
    SnapState {
        current_index,
        distance,
    }
}

/// Asserts that the current item rests exactly on its snap offset and
/// returns its index.
#[track_caller]
pub fn assert_snapped<L>(layout: &L, policy: &dyn SnapOffsetPolicy) -> usize
where
    L: LayoutSource + ?Sized,
{
    let state = snap_state(layout, policy);
    let Some(index) = state.current_index else {
        panic!("no current item in {:?}", layout.snapshot());
    };
    assert_eq!(
        state.distance, 0,
        "item {index} is {} px away from its snap offset",
        state.distance
    );
    index
}
