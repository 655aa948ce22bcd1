use std::ops::Range;

use super::max_offset;

/// Scroll state for a flat list where every item occupies exactly one line.
///
/// `offset` is the index of the first visible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearViewport {
    offset: usize,
    height: usize,
}

impl Default for LinearViewport {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LinearViewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height: height.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Stores the new height (floor 1). Call `ensure_visible` afterwards.
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
    }

    /// Scrolls the minimum amount needed for `selected` to be visible.
    ///
    /// Returns `selected` clamped into `[0, total)` (0 for an empty list).
    pub fn ensure_visible(&mut self, total: usize, selected: usize) -> usize {
        if total == 0 {
            self.offset = 0;
            return 0;
        }

        let selected = selected.min(total - 1);
        if selected < self.offset {
            self.offset = selected;
        }
        if selected >= self.offset + self.height {
            self.offset = selected + 1 - self.height;
        }
        self.offset = self.offset.min(max_offset(total, self.height));
        selected
    }

    /// Returns the item indices to render.
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        let end = (self.offset + self.height).min(total);
        self.offset.min(end)..end
    }

    /// Moves the selection one full page up (no overlap) and returns it.
    pub fn page_up(&mut self, total: usize, current: usize) -> usize {
        let next = current.saturating_sub(self.height);
        self.ensure_visible(total, next)
    }

    /// Moves the selection one full page down (no overlap) and returns it.
    pub fn page_down(&mut self, total: usize, current: usize) -> usize {
        let next = current.saturating_add(self.height);
        self.ensure_visible(total, next)
    }
}
