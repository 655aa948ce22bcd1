use super::max_offset;

/// Scroll state for a list whose items span a variable number of lines.
///
/// The offset is measured in lines, not items, because an item's height can
/// change at any time (expand/collapse, re-wrap on resize). Callers pass the
/// current per-item line counts to every operation; nothing derived from them
/// is kept between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultilineViewport {
    offset: usize,
    height: usize,
}

/// Which part of a multiline list is visible.
///
/// Render lines `line_offset..` of `first_item`, then items
/// `first_item + 1 ..= last_item` in full, stopping once the height is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultilineRange {
    pub first_item: usize,
    /// `None` when there is nothing to draw.
    pub last_item: Option<usize>,
    /// Lines of `first_item` scrolled off the top.
    pub line_offset: usize,
}

impl MultilineRange {
    pub const EMPTY: Self = Self {
        first_item: 0,
        last_item: None,
        line_offset: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.last_item.is_none()
    }

    /// Item indices that contribute at least one visible line.
    pub fn items(&self) -> std::ops::Range<usize> {
        match self.last_item {
            Some(last) => self.first_item..last + 1,
            None => 0..0,
        }
    }
}

impl Default for MultilineViewport {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MultilineViewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height: height.max(1),
        }
    }

    /// First visible line.
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

    /// Scrolls the minimum amount needed for the selected item to be visible.
    ///
    /// An item taller than the viewport is bottom-aligned when approached from
    /// above, so it always overlaps the window.
    pub fn ensure_visible(&mut self, line_counts: &[usize], selected: usize) {
        if line_counts.is_empty() {
            self.offset = 0;
            return;
        }

        let selected = selected.min(line_counts.len() - 1);
        let selected_line: usize = line_counts[..selected].iter().sum();
        let item_lines = line_counts[selected];

        if selected_line < self.offset {
            self.offset = selected_line;
        }
        if selected_line + item_lines > self.offset + self.height {
            self.offset = selected_line + item_lines - self.height;
        }

        self.offset = self
            .offset
            .min(max_offset(total_lines(line_counts), self.height));
    }

    /// Computes which items (and which lines of the first one) are visible.
    pub fn visible_range(&self, line_counts: &[usize]) -> MultilineRange {
        let window_end = self.offset + self.height;

        let mut start = 0;
        let mut first = None;
        let mut last = None;
        for (index, &lines) in line_counts.iter().enumerate() {
            if start >= window_end {
                break;
            }
            if first.is_none() && start + lines > self.offset {
                first = Some((index, self.offset - start));
            }
            if first.is_some() {
                last = Some(index);
            }
            start += lines;
        }

        match first {
            Some((first_item, line_offset)) => MultilineRange {
                first_item,
                last_item: last,
                line_offset,
            },
            None => MultilineRange::EMPTY,
        }
    }
}

/// Sum of all line counts.
pub fn total_lines(line_counts: &[usize]) -> usize {
    line_counts.iter().sum()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Flattens items into (item, line) pairs, the way a renderer would draw them.
    fn flatten(line_counts: &[usize]) -> Vec<(usize, usize)> {
        line_counts
            .iter()
            .enumerate()
            .flat_map(|(item, &lines)| (0..lines).map(move |line| (item, line)))
            .collect()
    }

    /// Renders a range following the renderer contract.
    fn render(line_counts: &[usize], range: MultilineRange, height: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for item in range.items() {
            let skip = if item == range.first_item {
                range.line_offset
            } else {
                0
            };
            for line in skip..line_counts[item] {
                if out.len() == height {
                    return out;
                }
                out.push((item, line));
            }
        }
        out
    }

    #[test]
    fn test_empty_list() {
        let mut vp = MultilineViewport::new(4);
        vp.ensure_visible(&[], 3);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(&[]), MultilineRange::EMPTY);
        assert_eq!(
            (
                vp.visible_range(&[]).first_item,
                vp.visible_range(&[]).last_item
            ),
            (0, None)
        );
    }

    #[test]
    fn test_tall_item_scenario() {
        let counts = [1, 1, 5, 1];
        let mut vp = MultilineViewport::new(4);
        vp.ensure_visible(&counts, 2);

        // Item 2 spans lines 2..7; bottom-aligned in a 4-line window.
        assert_eq!(vp.offset(), 3);
        assert_eq!(
            vp.visible_range(&counts),
            MultilineRange {
                first_item: 2,
                last_item: Some(2),
                line_offset: 1,
            }
        );
    }

    #[test]
    fn test_scrolling_back_up_aligns_item_top() {
        let counts = [1, 1, 5, 1];
        let mut vp = MultilineViewport::new(4);
        vp.ensure_visible(&counts, 3);
        assert_eq!(vp.offset(), 4);
        vp.ensure_visible(&counts, 1);
        assert_eq!(vp.offset(), 1);
        assert_eq!(
            vp.visible_range(&counts),
            MultilineRange {
                first_item: 1,
                last_item: Some(2),
                line_offset: 0,
            }
        );
    }

    #[test]
    fn test_everything_fits() {
        let counts = [2, 1, 3];
        let mut vp = MultilineViewport::new(10);
        vp.ensure_visible(&counts, 2);
        assert_eq!(vp.offset(), 0);
        assert_eq!(
            vp.visible_range(&counts),
            MultilineRange {
                first_item: 0,
                last_item: Some(2),
                line_offset: 0,
            }
        );
    }

    #[test]
    fn test_expanding_selected_item_keeps_its_start_visible() {
        let mut counts = vec![1; 12];
        let mut vp = MultilineViewport::new(8);
        vp.ensure_visible(&counts, 9);
        assert_eq!(vp.offset(), 2);

        counts[9] = 6;
        vp.ensure_visible(&counts, 9);
        let start = 9;
        assert!(vp.offset() <= start);
        assert!(start < vp.offset() + vp.height());
        assert_eq!(vp.offset(), 7);
    }

    #[test]
    fn test_expanding_past_viewport_height_stays_on_screen() {
        let mut counts = vec![1; 6];
        let mut vp = MultilineViewport::new(3);
        vp.ensure_visible(&counts, 2);

        counts[2] = 6;
        vp.ensure_visible(&counts, 2);
        let range = vp.visible_range(&counts);
        assert!(range.items().contains(&2));
        assert!(vp.offset() <= 2 + 6);
    }

    #[test]
    fn test_collapsing_clamps_offset() {
        let mut counts = vec![1, 1, 10];
        let mut vp = MultilineViewport::new(4);
        vp.ensure_visible(&counts, 2);
        assert_eq!(vp.offset(), 8);

        counts[2] = 1;
        vp.ensure_visible(&counts, 2);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_ensure_visible_is_idempotent() {
        let counts = [3, 1, 4, 1, 5, 9, 2, 6];
        let mut vp = MultilineViewport::new(5);
        vp.ensure_visible(&counts, 5);
        let first = vp;
        vp.ensure_visible(&counts, 5);
        assert_eq!(vp, first);
    }

    fn line_counts_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..8, 0..40)
    }

    proptest! {
        #[test]
        fn selected_span_intersects_window(
            counts in line_counts_strategy(),
            height in 0usize..20,
            prior in 0usize..40,
            selected in 0usize..40,
        ) {
            let mut vp = MultilineViewport::new(height);
            vp.ensure_visible(&counts, prior);
            vp.ensure_visible(&counts, selected);

            let total = total_lines(&counts);
            prop_assert!(vp.offset() <= max_offset(total, vp.height()));

            if counts.is_empty() {
                prop_assert_eq!(vp.offset(), 0);
            } else {
                let selected = selected.min(counts.len() - 1);
                let start: usize = counts[..selected].iter().sum();
                let end = start + counts[selected];
                prop_assert!(start < vp.offset() + vp.height());
                prop_assert!(end > vp.offset());
                if counts[selected] <= vp.height() {
                    prop_assert!(vp.offset() <= start);
                }
            }

            let before = vp;
            vp.ensure_visible(&counts, selected);
            prop_assert_eq!(vp, before);
        }

        #[test]
        fn rendered_range_reconstructs_window(
            counts in line_counts_strategy(),
            height in 1usize..20,
            selected in 0usize..40,
        ) {
            let mut vp = MultilineViewport::new(height);
            vp.ensure_visible(&counts, selected);

            let range = vp.visible_range(&counts);
            let flat = flatten(&counts);
            let window_end = (vp.offset() + vp.height()).min(flat.len());
            let expected = &flat[vp.offset().min(window_end)..window_end];

            prop_assert_eq!(render(&counts, range, vp.height()), expected.to_vec());
            if let Some(last) = range.last_item {
                prop_assert!(range.line_offset < counts[range.first_item]);
                prop_assert!(range.first_item <= last);
            } else {
                prop_assert!(expected.is_empty());
            }
        }
    }
}
