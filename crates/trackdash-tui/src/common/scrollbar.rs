//! Scrollbar widget with a stable thumb size.
//!
//! ratatui's built-in Scrollbar rounds the thumb start and end separately,
//! so the thumb grows and shrinks as you scroll. Here the thumb length is
//! computed once from the content/viewport ratio and only its position moves.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

/// Vertical scrollbar drawn in the rightmost column of its area.
#[derive(Debug, Clone)]
pub struct Scrollbar {
    /// Total lines (or items) of content.
    content_len: usize,
    /// Lines (or items) visible at once.
    viewport_len: usize,
    /// First visible line (or item).
    position: usize,
    thumb_style: Style,
    track_style: Style,
}

impl Scrollbar {
    pub fn new(content_len: usize, viewport_len: usize, position: usize) -> Self {
        Self {
            content_len,
            viewport_len,
            position,
            thumb_style: Style::default(),
            track_style: Style::default(),
        }
    }

    #[must_use]
    pub fn thumb_style(mut self, style: Style) -> Self {
        self.thumb_style = style;
        self
    }

    #[must_use]
    pub fn track_style(mut self, style: Style) -> Self {
        self.track_style = style;
        self
    }

    /// Only drawn when there is something to scroll.
    pub fn is_needed(&self) -> bool {
        self.content_len > self.viewport_len
    }

    /// Returns `(thumb_start, thumb_len)` for a track of `track_len` cells.
    fn thumb(&self, track_len: usize) -> Option<(usize, usize)> {
        let max_position = self.content_len.saturating_sub(self.viewport_len);
        if !self.is_needed() || track_len == 0 || max_position == 0 {
            return None;
        }

        let viewport_len = self.viewport_len.min(track_len);
        // round(track * viewport / (content - 1 + viewport))
        let denom = (self.content_len - 1 + viewport_len) as u64;
        let thumb_len = ((track_len as u64 * viewport_len as u64 + denom / 2) / denom) as usize;
        let thumb_len = thumb_len.clamp(1, track_len);

        // Reaches the bottom exactly at max scroll.
        let travel = track_len - thumb_len;
        let position = self.position.min(max_position);
        let thumb_start = (position as u64 * travel as u64 / max_position as u64) as usize;
        Some((thumb_start, thumb_len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((thumb_start, thumb_len)) = self.thumb(area.height as usize) else {
            return;
        };

        let x = area.x + area.width.saturating_sub(1);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            if idx >= thumb_start && idx < thumb_start + thumb_len {
                buf.set_string(x, y, THUMB_SYMBOL, self.thumb_style);
            } else {
                buf.set_string(x, y, TRACK_SYMBOL, self.track_style);
            }
        }
    }
}
