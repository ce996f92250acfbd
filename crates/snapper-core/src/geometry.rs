//! Snapping measurements derived from one layout snapshot.
//!
//! Nothing here is cached across frames: the orchestrator builds a new
//! [`SnapGeometry`] from a fresh snapshot every time it needs one.

use crate::layout::{Item, LayoutSnapshot};
use crate::snap_offsets::SnapOffsetPolicy;

/// A layout snapshot viewed through a snap offset policy.
#[derive(Clone, Copy)]
pub struct SnapGeometry<'a> {
    snapshot: &'a LayoutSnapshot,
    policy: &'a dyn SnapOffsetPolicy,
}

impl<'a> SnapGeometry<'a> {
    pub fn new(snapshot: &'a LayoutSnapshot, policy: &'a dyn SnapOffsetPolicy) -> Self {
        Self { snapshot, policy }
    }

    pub fn snapshot(&self) -> &'a LayoutSnapshot {
        self.snapshot
    }

    pub fn start_scroll_offset(&self) -> i32 {
        self.snapshot.start_scroll_offset
    }

    pub fn end_scroll_offset(&self) -> i32 {
        self.snapshot.end_scroll_offset
    }

    pub fn total_item_count(&self) -> usize {
        self.snapshot.total_item_count
    }

    /// Index of the last item, if the list has any.
    pub fn last_index(&self) -> Option<usize> {
        self.snapshot.total_item_count.checked_sub(1)
    }

    pub fn snap_offset(&self, item: &Item) -> i32 {
        self.policy.snap_offset(self, item)
    }

    /// The last visible item that has reached or passed its snap offset.
    ///
    /// `None` when nothing is visible, or when every visible item is still
    /// before its snap offset.
    pub fn current_item(&self) -> Option<Item> {
        self.snapshot
            .visible_items
            .iter()
            .rev()
            .find(|item| item.offset <= self.snap_offset(item))
            .copied()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_item().map(|item| item.index)
    }

    /// Gap between the first two visible items, or 0 with fewer than two.
    pub fn item_spacing(&self) -> i32 {
        match self.snapshot.visible_items.as_slice() {
            [first, second, ..] => second.offset - first.end(),
            _ => 0,
        }
    }

    /// Average pixel distance between consecutive items' snap points,
    /// measured over the visible items. `None` when nothing is visible or
    /// the visible items have no extent.
    pub fn estimated_distance_per_item(&self) -> Option<f32> {
        let first = self.snapshot.first_visible()?;
        let last = self.snapshot.last_visible()?;
        let span = (last.end() - first.offset + self.item_spacing()) as f32;
        let count = self.snapshot.visible_items.len() as f32;
        (span > 0.0).then(|| span / count)
    }

    /// Signed pixels to scroll so that item `index` rests on its snap offset.
    /// Positive means scrolling toward the end.
    ///
    /// Exact when the item is visible. Otherwise extrapolated from the current
    /// item with [`estimated_distance_per_item`](Self::estimated_distance_per_item).
    /// Returns 0 when there is no current item.
    pub fn distance_to_index_snap(&self, index: usize) -> i32 {
        if let Some(item) = self.snapshot.find(index) {
            return item.offset - self.snap_offset(item);
        }
        match self.current_item() {
            Some(current) => self.extrapolate_from(&current, index),
            None => 0,
        }
    }

    /// Like [`distance_to_index_snap`](Self::distance_to_index_snap), but
    /// keeps measuring while no item has reached its snap offset yet (e.g.
    /// only the spacing between two items sits at the snap edge) by
    /// extrapolating from the first visible item. `None` when nothing is
    /// visible.
    pub fn tracking_distance_to_index_snap(&self, index: usize) -> Option<i32> {
        if let Some(item) = self.snapshot.find(index) {
            return Some(item.offset - self.snap_offset(item));
        }
        let anchor = self
            .current_item()
            .or_else(|| self.snapshot.first_visible().copied())?;
        Some(self.extrapolate_from(&anchor, index))
    }

    fn extrapolate_from(&self, anchor: &Item, index: usize) -> i32 {
        let to_anchor = anchor.offset - self.snap_offset(anchor);
        match self.estimated_distance_per_item() {
            Some(per_item) => {
                let items = index as f64 - anchor.index as f64;
                (items * per_item as f64).round() as i32 + to_anchor
            }
            None => to_anchor,
        }
    }

    /// Whether content can still move toward the list start.
    pub fn can_scroll_toward_start(&self) -> bool {
        self.snapshot
            .first_visible()
            .is_some_and(|first| first.index > 0 || first.offset < self.start_scroll_offset())
    }

    /// Whether content can still move toward the list end.
    pub fn can_scroll_toward_end(&self) -> bool {
        self.snapshot.last_visible().is_some_and(|last| {
            last.index + 1 < self.total_item_count() || last.end() > self.end_scroll_offset()
        })
    }

    /// Clamps a possibly out of range index into `0..total_item_count`.
    pub fn clamp_index(&self, index: i64) -> usize {
        let last = self.last_index().unwrap_or(0) as i64;
        index.clamp(0, last) as usize
    }
}

impl std::fmt::Debug for SnapGeometry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapGeometry")
            .field("snapshot", self.snapshot)
            .field("current_item", &self.current_item())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
