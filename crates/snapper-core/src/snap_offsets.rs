//! Where within the viewport an item comes to rest.

use crate::geometry::SnapGeometry;
use crate::layout::Item;

/// Returns the offset, from the viewport's scroll-start edge, at which `item`
/// counts as snapped. Must be a pure function of its inputs.
pub trait SnapOffsetPolicy {
    fn snap_offset(&self, geometry: &SnapGeometry<'_>, item: &Item) -> i32;
}

impl<F> SnapOffsetPolicy for F
where
    F: Fn(&SnapGeometry<'_>, &Item) -> i32,
{
    fn snap_offset(&self, geometry: &SnapGeometry<'_>, item: &Item) -> i32 {
        self(geometry, item)
    }
}

/// Built-in snap offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnapOffsets {
    /// The item's start edge rests on the start of the snapping region.
    Start,
    /// The item rests in the middle of the snapping region.
    #[default]
    Center,
    /// The item's end edge rests on the end of the snapping region.
    End,
}

impl SnapOffsetPolicy for SnapOffsets {
    fn snap_offset(&self, geometry: &SnapGeometry<'_>, item: &Item) -> i32 {
        let start = geometry.start_scroll_offset();
        let end = geometry.end_scroll_offset();
        match self {
            SnapOffsets::Start => start,
            SnapOffsets::Center => start + (end - start - item.size) / 2,
            SnapOffsets::End => end - item.size,
        }
    }
}
