use std::ops::Range;

use super::max_offset;

/// Line-offset scroller for a pre-wrapped text buffer.
///
/// There is no selection: the offset is the first visible line. Paging keeps
/// one line of overlap so the reader never loses their place, unlike list
/// paging which jumps a full page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentViewport {
    offset: usize,
    height: usize,
}

impl Default for DocumentViewport {
    fn default() -> Self {
        Self::new(1)
    }
}

impl DocumentViewport {
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

    /// Stores the new height (floor 1). Call `clamp` afterwards.
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
    }

    /// Re-clamps the offset after the height or the line count changed.
    pub fn clamp(&mut self, total: usize) {
        self.offset = self.offset.min(max_offset(total, self.height));
    }

    fn page_step(&self) -> usize {
        self.height.saturating_sub(1).max(1)
    }

    pub fn scroll_line_up(&mut self, total: usize) {
        self.offset = self.offset.saturating_sub(1);
        self.clamp(total);
    }

    pub fn scroll_line_down(&mut self, total: usize) {
        self.offset = self.offset.saturating_add(1);
        self.clamp(total);
    }

    pub fn scroll_page_up(&mut self, total: usize) {
        self.offset = self.offset.saturating_sub(self.page_step());
        self.clamp(total);
    }

    pub fn scroll_page_down(&mut self, total: usize) {
        self.offset = self.offset.saturating_add(self.page_step());
        self.clamp(total);
    }

    pub fn scroll_to_start(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_end(&mut self, total: usize) {
        self.offset = max_offset(total, self.height);
    }

    /// Line indices to render.
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        let end = (self.offset + self.height).min(total);
        self.offset.min(end)..end
    }

    /// Position indicator for the status line: `All`, `Top`, `Bot` or `NN%`.
    ///
    /// Percentages are kept within 1..=99 so `0%` and `100%` never appear
    /// next to the dedicated `Top`/`Bot` labels.
    pub fn scroll_position(&self, total: usize) -> String {
        if total <= self.height {
            return "All".to_string();
        }
        if self.offset == 0 {
            return "Top".to_string();
        }
        let max = max_offset(total, self.height);
        if self.offset >= max {
            return "Bot".to_string();
        }
        let percent = (self.offset * 100 / max).clamp(1, 99);
        format!("{percent}%")
    }
}
