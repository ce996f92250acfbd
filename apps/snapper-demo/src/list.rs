//! A lazily laid out row or column of equally sized cells with the same
//! content padding on both ends.
//!
//! Offsets are measured from the end of the leading padding, the way lazy
//! list layouts report them: item 0 sits at offset 0 when the list is
//! scrolled to the top, and the padding lies at negative offsets.

use std::cell::Cell;

use snapper_core::{Item, LayoutSnapshot, LayoutSource, ScrollSink, VisibleItems};

#[derive(Debug)]
pub struct DemoList {
    item_count: usize,
    item_size: i32,
    spacing: i32,
    viewport: i32,
    content_padding: i32,
    scroll: Cell<f32>,
}

impl DemoList {
    pub fn new(item_count: usize, item_size: i32, spacing: i32) -> Self {
        Self {
            item_count,
            item_size,
            spacing,
            viewport: 412,
            content_padding: 0,
            scroll: Cell::new(0.0),
        }
    }

    pub fn with_viewport(mut self, viewport: i32) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_content_padding(mut self, padding: i32) -> Self {
        self.content_padding = padding;
        self
    }

    pub fn scroll_position(&self) -> f32 {
        self.scroll.get()
    }

    pub fn max_scroll(&self) -> f32 {
        let items = self.item_count as i64 * i64::from(self.item_size + self.spacing)
            - i64::from(self.spacing);
        let content = items.max(0) + 2 * i64::from(self.content_padding);
        (content - i64::from(self.viewport)).max(0) as f32
    }

    fn pitch(&self) -> i32 {
        self.item_size + self.spacing
    }

    fn item_start(&self, index: usize) -> f32 {
        (index as i64 * i64::from(self.pitch())) as f32
    }

    /// End of the viewport, in item offset coordinates.
    fn viewport_end_offset(&self) -> i32 {
        self.viewport - self.content_padding
    }
}

impl LayoutSource for DemoList {
    fn visible_items(&self) -> VisibleItems {
        let scroll = self.scroll.get();
        let pitch = self.pitch().max(1) as f32;
        let first = ((scroll - self.content_padding as f32) / pitch).floor().max(0.0) as usize;
        (first..self.item_count)
            .map(|index| {
                let offset = (self.item_start(index) - scroll).round() as i32;
                Item::new(index, offset, self.item_size)
            })
            .skip_while(|item| item.end() <= -self.content_padding)
            .take_while(|item| item.offset < self.viewport_end_offset())
            .collect()
    }

    fn total_item_count(&self) -> usize {
        self.item_count
    }

    fn scroll_bounds(&self) -> (i32, i32) {
        (0, self.viewport_end_offset() - self.content_padding)
    }

    fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::from_viewport(
            self.visible_items(),
            self.item_count,
            self.viewport_end_offset(),
            self.content_padding,
        )
    }
}

impl ScrollSink for DemoList {
    fn scroll_by(&self, delta: f32) -> f32 {
        let before = self.scroll.get();
        let after = (before + delta).clamp(0.0, self.max_scroll());
        self.scroll.set(after);
        after - before
    }
}
