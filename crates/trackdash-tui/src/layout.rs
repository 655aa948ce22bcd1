//! Screen layout shared by rendering and the reducer.
//!
//! The reducer sizes viewports from the same rectangles the renderer draws
//! into, so a resize and the next frame always agree on the body height.

use ratatui::layout::{Constraint, Layout, Rect};

const HEADER_HEIGHT: u16 = 1;
const TAB_BAR_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;

/// Horizontal padding on each side of the body.
pub const BODY_MARGIN: u16 = 1;

/// Column reserved for the scrollbar on the right of the body.
pub const SCROLLBAR_WIDTH: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Present only for screens with sub-lists.
    pub tabs: Option<Rect>,
    pub body: Rect,
    /// Body minus margins and the scrollbar column.
    pub content: Rect,
    pub scrollbar: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, with_tabs: bool) -> Self {
        let tab_height = if with_tabs { TAB_BAR_HEIGHT } else { 0 };
        let [header, tabs, body, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(tab_height),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        let content = Rect::new(
            body.x + BODY_MARGIN,
            body.y,
            body.width
                .saturating_sub(BODY_MARGIN * 2 + SCROLLBAR_WIDTH),
            body.height,
        );
        let scrollbar = Rect::new(
            body.right().saturating_sub(BODY_MARGIN + SCROLLBAR_WIDTH),
            body.y,
            SCROLLBAR_WIDTH.min(body.width),
            body.height,
        );

        Self {
            header,
            tabs: with_tabs.then_some(tabs),
            body,
            content,
            scrollbar,
            footer,
        }
    }

    /// Content size as `(width, height)` for a terminal of the given size.
    pub fn content_size(width: u16, height: u16, with_tabs: bool) -> (usize, usize) {
        let layout = Self::new(Rect::new(0, 0, width, height), with_tabs);
        (
            layout.content.width as usize,
            layout.content.height as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_takes_remaining_rows() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24), false);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.body.height, 22);
        assert!(layout.tabs.is_none());
        assert_eq!(layout.content.width, 77);
    }

    #[test]
    fn test_tab_bar_shrinks_body() {
        assert_eq!(ScreenLayout::content_size(80, 24, true), (77, 21));
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        let (width, _) = ScreenLayout::content_size(2, 1, true);
        assert_eq!(width, 0);
    }
}
