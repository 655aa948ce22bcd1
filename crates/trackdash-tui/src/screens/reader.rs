//! Scrolling reader for documents and task descriptions.

use crate::command::NavCommand;
use crate::common::wrap_text;
use crate::viewport::DocumentViewport;

#[derive(Debug)]
pub struct ReaderScreen {
    title: String,
    body: String,
    /// `body` wrapped at `width`.
    lines: Vec<String>,
    width: usize,
    viewport: DocumentViewport,
}

impl ReaderScreen {
    pub fn new(title: String, body: String, width: usize, height: usize) -> Self {
        let lines = wrap_text(&body, width);
        Self {
            title,
            body,
            lines,
            width,
            viewport: DocumentViewport::new(height),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn viewport(&self) -> &DocumentViewport {
        &self.viewport
    }

    pub fn handle_nav(&mut self, cmd: NavCommand) {
        let total = self.lines.len();
        match cmd {
            NavCommand::Up => self.viewport.scroll_line_up(total),
            NavCommand::Down => self.viewport.scroll_line_down(total),
            NavCommand::PageUp => self.viewport.scroll_page_up(total),
            NavCommand::PageDown => self.viewport.scroll_page_down(total),
            NavCommand::JumpStart => self.viewport.scroll_to_start(),
            NavCommand::JumpEnd => self.viewport.scroll_to_end(total),
            NavCommand::Tab | NavCommand::Enter => {}
        }
    }

    /// Re-wraps only when the width changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width {
            self.width = width;
            self.lines = wrap_text(&self.body, width);
        }
        self.viewport.set_height(height);
        self.viewport.clamp(self.lines.len());
    }

    pub fn position(&self) -> String {
        self.viewport.scroll_position(self.lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (1..=n)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_short_document_shows_all() {
        let reader = ReaderScreen::new("t".into(), numbered(3), 40, 10);
        assert_eq!(reader.position(), "All");
    }

    #[test]
    fn test_paging_overlaps_one_line() {
        let mut reader = ReaderScreen::new("t".into(), numbered(20), 40, 10);
        assert_eq!(reader.position(), "Top");
        reader.handle_nav(NavCommand::PageDown);
        assert_eq!(reader.viewport().offset(), 9);
        assert_eq!(reader.position(), "90%");
        reader.handle_nav(NavCommand::PageDown);
        assert_eq!(reader.viewport().offset(), 10);
        assert_eq!(reader.position(), "Bot");
        reader.handle_nav(NavCommand::JumpStart);
        assert_eq!(reader.viewport().offset(), 0);
    }

    #[test]
    fn test_line_scrolling_stops_at_bounds() {
        let mut reader = ReaderScreen::new("t".into(), numbered(12), 40, 10);
        reader.handle_nav(NavCommand::Up);
        assert_eq!(reader.viewport().offset(), 0);
        for _ in 0..5 {
            reader.handle_nav(NavCommand::Down);
        }
        assert_eq!(reader.viewport().offset(), 2);
    }

    #[test]
    fn test_narrowing_rewraps_and_clamps() {
        let body = "word ".repeat(40);
        let mut reader = ReaderScreen::new("t".into(), body, 100, 5);
        let wide = reader.lines().len();
        reader.handle_nav(NavCommand::JumpEnd);
        reader.resize(20, 5);
        assert!(reader.lines().len() > wide);
        reader.handle_nav(NavCommand::JumpEnd);
        reader.resize(100, 50);
        assert_eq!(reader.viewport().offset(), 0);
        assert_eq!(reader.position(), "All");
    }
}
