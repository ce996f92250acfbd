//! An in-memory lazy list that reports layouts and accepts scrolls.

use std::cell::{Cell, RefCell};

use snapper_core::{Item, LayoutSource, ScrollSink, VisibleItems};

/// One call made to [`ScrollSink::scroll_by`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCall {
    pub requested: f32,
    pub consumed: f32,
}

#[derive(Debug, Clone)]
enum ItemSizes {
    Uniform { count: usize, size: i32 },
    /// Sizes plus the content offsets of every item's edges.
    Explicit {
        sizes: Vec<i32>,
        starts: Vec<i64>,
        ends: Vec<i64>,
    },
}

/// A vertical (or horizontal) list laid out from offset 0, scrolled by a
/// floating point position and clamped to its content.
///
/// Item offsets are rounded to whole pixels the way a real layout reports
/// them.
#[derive(Debug, Clone)]
pub struct FakeLazyList {
    sizes: ItemSizes,
    spacing: i32,
    viewport: i32,
    end_padding: i32,
    consumption_ratio: f32,
    scroll: Cell<f32>,
    calls: RefCell<Vec<ScrollCall>>,
}

impl FakeLazyList {
    pub const DEFAULT_VIEWPORT: i32 = 500;

    /// `count` items of `size` pixels each.
    pub fn uniform(count: usize, size: i32) -> Self {
        Self::from_sizes(ItemSizes::Uniform { count, size })
    }

    /// One item per entry in `sizes`.
    pub fn with_item_sizes(sizes: Vec<i32>) -> Self {
        Self::from_sizes(ItemSizes::Explicit {
            sizes,
            starts: Vec::new(),
            ends: Vec::new(),
        })
    }

    fn from_sizes(sizes: ItemSizes) -> Self {
        let mut list = Self {
            sizes,
            spacing: 0,
            viewport: Self::DEFAULT_VIEWPORT,
            end_padding: 0,
            consumption_ratio: 1.0,
            scroll: Cell::new(0.0),
            calls: RefCell::new(Vec::new()),
        };
        list.recompute_offsets();
        list
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self.recompute_offsets();
        self
    }

    pub fn with_viewport(mut self, viewport: i32) -> Self {
        self.viewport = viewport;
        self
    }

    /// Padding after the last item. It can be scrolled into view but is not
    /// part of the snapping region.
    pub fn with_end_padding(mut self, padding: i32) -> Self {
        self.end_padding = padding;
        self
    }

    /// Makes the list consume only `ratio` of every scroll request, as if an
    /// edge were always in the way.
    pub fn with_consumption_ratio(mut self, ratio: f32) -> Self {
        self.consumption_ratio = ratio;
        self
    }

    pub fn scrolled_to(self, position: f32) -> Self {
        self.scroll.set(position.clamp(0.0, self.max_scroll()));
        self
    }

    /// Scrolls so that `index` starts at the top of the viewport, or as close
    /// as the content allows.
    pub fn scrolled_to_item(self, index: usize) -> Self {
        let position = self.item_start(index) as f32;
        self.scrolled_to(position)
    }

    pub fn item_count(&self) -> usize {
        match &self.sizes {
            ItemSizes::Uniform { count, .. } => *count,
            ItemSizes::Explicit { sizes, .. } => sizes.len(),
        }
    }

    pub fn item_size(&self, index: usize) -> i32 {
        match &self.sizes {
            ItemSizes::Uniform { size, .. } => *size,
            ItemSizes::Explicit { sizes, .. } => sizes.get(index).copied().unwrap_or(0),
        }
    }

    /// Content offset of the start of item `index`.
    pub fn item_start(&self, index: usize) -> i64 {
        match &self.sizes {
            ItemSizes::Uniform { size, .. } => index as i64 * i64::from(size + self.spacing),
            ItemSizes::Explicit { starts, .. } => starts.get(index).copied().unwrap_or(0),
        }
    }

    pub fn content_length(&self) -> i64 {
        match self.item_count() {
            0 => 0,
            count => {
                let last = count - 1;
                self.item_start(last) + i64::from(self.item_size(last) + self.end_padding)
            }
        }
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_length() - i64::from(self.viewport)).max(0) as f32
    }

    pub fn scroll_position(&self) -> f32 {
        self.scroll.get()
    }

    /// Moves the content without recording a call.
    pub fn set_scroll_position(&self, position: f32) {
        self.scroll.set(position.clamp(0.0, self.max_scroll()));
    }

    pub fn scroll_calls(&self) -> Vec<ScrollCall> {
        self.calls.borrow().clone()
    }

    pub fn scroll_call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn clear_scroll_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn recompute_offsets(&mut self) {
        if let ItemSizes::Explicit {
            sizes,
            starts,
            ends,
        } = &mut self.sizes
        {
            let spacing = i64::from(self.spacing);
            let mut start = 0_i64;
            starts.clear();
            ends.clear();
            for &size in sizes.iter() {
                let end = start + i64::from(size);
                starts.push(start);
                ends.push(end);
                start = end + spacing;
            }
        }
    }

    /// First item whose end lies past `position`.
    fn first_index_after(&self, position: f32) -> usize {
        match &self.sizes {
            ItemSizes::Uniform { count, size } => {
                let pitch = (size + self.spacing).max(1) as f32;
                let index = (position / pitch).floor().max(0.0) as usize;
                let within = position - index as f32 * pitch;
                let index = if within >= *size as f32 { index + 1 } else { index };
                index.min(*count)
            }
            ItemSizes::Explicit { ends, .. } => {
                ends.partition_point(|&end| end as f32 <= position)
            }
        }
    }
}

impl LayoutSource for FakeLazyList {
    fn visible_items(&self) -> VisibleItems {
        let scroll = self.scroll.get();
        let viewport_end = scroll + self.viewport as f32;
        (self.first_index_after(scroll)..self.item_count())
            .take_while(|&index| (self.item_start(index) as f32) < viewport_end)
            .map(|index| {
                let offset = (self.item_start(index) as f32 - scroll).round() as i32;
                Item::new(index, offset, self.item_size(index))
            })
            .collect()
    }

    fn total_item_count(&self) -> usize {
        self.item_count()
    }

    fn scroll_bounds(&self) -> (i32, i32) {
        (0, self.viewport - self.end_padding)
    }
}

impl ScrollSink for FakeLazyList {
    fn scroll_by(&self, delta: f32) -> f32 {
        let before = self.scroll.get();
        let after = (before + delta * self.consumption_ratio).clamp(0.0, self.max_scroll());
        self.scroll.set(after);
        let consumed = after - before;
        self.calls.borrow_mut().push(ScrollCall {
            requested: delta,
            consumed,
        });
        consumed
    }
}
