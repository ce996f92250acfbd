//! Contracts with the host list: what is laid out, and how to scroll it.

use smallvec::SmallVec;

/// Visible items of one layout pass. Most lists show only a handful at once.
pub type VisibleItems = SmallVec<[Item; 8]>;

/// A laid out item, in pixels along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    /// Index of the item in the data source.
    pub index: usize,
    /// Distance from the viewport's scroll-start edge. Negative when the item
    /// starts before the viewport.
    pub offset: i32,
    /// Size along the scroll axis.
    pub size: i32,
}

impl Item {
    pub fn new(index: usize, offset: i32, size: i32) -> Self {
        Self {
            index,
            offset,
            size,
        }
    }

    /// Offset of the item's end edge.
    pub fn end(&self) -> i32 {
        self.offset + self.size
    }
}

/// Everything the snapping logic needs to know about one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    /// Visible items, ascending by index (and therefore by offset).
    pub visible_items: VisibleItems,
    /// Total number of items in the list.
    pub total_item_count: usize,
    /// Scroll-start edge of the region items snap within.
    pub start_scroll_offset: i32,
    /// Scroll-end edge of the region items snap within, excluding end padding.
    pub end_scroll_offset: i32,
}

impl LayoutSnapshot {
    pub fn new(
        visible_items: impl IntoIterator<Item = Item>,
        total_item_count: usize,
        start_scroll_offset: i32,
        end_scroll_offset: i32,
    ) -> Self {
        let visible_items: VisibleItems = visible_items.into_iter().collect();
        debug_assert!(
            visible_items.windows(2).all(|pair| pair[0].index < pair[1].index),
            "visible items must be sorted by index"
        );
        Self {
            visible_items,
            total_item_count,
            start_scroll_offset,
            end_scroll_offset,
        }
    }

    /// Snapshot of a lazy list whose items start at offset 0, with end
    /// content padding removed from the snapping region.
    pub fn from_viewport(
        visible_items: impl IntoIterator<Item = Item>,
        total_item_count: usize,
        viewport_end_offset: i32,
        end_content_padding: i32,
    ) -> Self {
        Self::new(
            visible_items,
            total_item_count,
            0,
            viewport_end_offset - end_content_padding,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.visible_items.is_empty()
    }

    pub fn first_visible(&self) -> Option<&Item> {
        self.visible_items.first()
    }

    pub fn last_visible(&self) -> Option<&Item> {
        self.visible_items.last()
    }

    pub fn find(&self, index: usize) -> Option<&Item> {
        self.visible_items.iter().find(|item| item.index == index)
    }
}

/// Reports the current layout of the list. Queried once per animation frame.
pub trait LayoutSource {
    fn visible_items(&self) -> VisibleItems;

    fn total_item_count(&self) -> usize;

    /// `(start, end)` pixel bounds of the snapping region.
    fn scroll_bounds(&self) -> (i32, i32);

    fn snapshot(&self) -> LayoutSnapshot {
        let (start, end) = self.scroll_bounds();
        LayoutSnapshot {
            visible_items: self.visible_items(),
            total_item_count: self.total_item_count(),
            start_scroll_offset: start,
            end_scroll_offset: end,
        }
    }
}

impl LayoutSource for LayoutSnapshot {
    fn visible_items(&self) -> VisibleItems {
        self.visible_items.clone()
    }

    fn total_item_count(&self) -> usize {
        self.total_item_count
    }

    fn scroll_bounds(&self) -> (i32, i32) {
        (self.start_scroll_offset, self.end_scroll_offset)
    }

    fn snapshot(&self) -> LayoutSnapshot {
        self.clone()
    }
}

/// Moves the list content.
///
/// Takes `&self` so that one scroll state object can act as both the
/// [`LayoutSource`] and the sink.
pub trait ScrollSink {
    /// Scrolls by `delta` pixels (positive toward the end) and returns how
    /// much was actually consumed. Less than requested means an edge of the
    /// content was reached.
    fn scroll_by(&self, delta: f32) -> f32;
}

impl<F: Fn(f32) -> f32> ScrollSink for F {
    fn scroll_by(&self, delta: f32) -> f32 {
        self(delta)
    }
}
