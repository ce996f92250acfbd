//! Ready-made snap index overrides.
//!
//! An override receives the geometry at fling start, the index the gesture
//! started from and the resolved target, and returns the index to settle on.
//! Whatever it returns is used as is, so it must stay below the item count.
//!
//! The start index is the current item for forward flings and the item after
//! it for backward ones: dragging toward the start makes the previous item
//! current before the fling is released.

use crate::geometry::SnapGeometry;

/// Signature of a snap index override.
pub type SnapIndexFn = dyn Fn(&SnapGeometry<'_>, usize, usize) -> usize;

/// Never moves more than one item away from where the fling started.
pub fn one_page_at_a_time() -> impl Fn(&SnapGeometry<'_>, usize, usize) -> usize {
    |geometry, start_index, target_index| {
        let last = geometry.last_index().unwrap_or(0);
        target_index
            .clamp(start_index.saturating_sub(1), start_index + 1)
            .min(last)
    }
}

/// Only settles on multiples of `group_size`, rounding in the direction of
/// the fling. The last item is always reachable.
pub fn grouped(group_size: usize) -> impl Fn(&SnapGeometry<'_>, usize, usize) -> usize {
    let group_size = group_size.max(1);
    move |geometry, start_index, target_index| {
        let last = geometry.last_index().unwrap_or(0);
        let snapped = if target_index > start_index {
            target_index.div_ceil(group_size) * group_size
        } else {
            target_index / group_size * group_size
        };
        snapped.min(last)
    }
}
