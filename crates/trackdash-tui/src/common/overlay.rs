//! Shared drawing helpers for modal overlays and footers.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::text::truncate_start_with_ellipsis;
use crate::theme::Theme;

/// Centers a `width` x `height` box inside `area`, shrinking it to fit.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Clears the popup, draws the border with its title and returns the inner rect.
pub fn render_overlay_container(frame: &mut Frame, popup: Rect, title: &str, theme: &Theme) -> Rect {
    frame.render_widget(Clear, popup);

    let border = theme.accent();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
        .title_style(border.add_modifier(Modifier::BOLD));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    inner
}

/// One `key action` pair in a hint row.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub const fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Builds a hint row: `key action • key action`.
pub fn hints_line<'a>(hints: &[InputHint<'a>], theme: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", theme.muted()));
        }
        spans.push(Span::styled(hint.key, theme.accent()));
        spans.push(Span::styled(format!(" {}", hint.action), theme.muted()));
    }
    Line::from(spans)
}

/// Renders hints centered on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint<'_>], theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let para = Paragraph::new(hints_line(hints, theme)).alignment(Alignment::Center);
    frame.render_widget(para, row);
}

/// Renders a prompt-style input line: `> text█`.
///
/// Long input keeps its tail visible so the cursor never scrolls away.
pub fn render_input_line(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: &str,
    theme: &Theme,
) {
    const PROMPT: &str = "> ";
    let max_text_width = area.width.saturating_sub(PROMPT.len() as u16 + 1) as usize;
    let cursor = Span::styled("█", theme.accent());

    let mut spans = vec![Span::styled(PROMPT, theme.muted())];
    if value.is_empty() {
        spans.push(cursor);
        spans.push(Span::styled(
            truncate_start_with_ellipsis(placeholder, max_text_width),
            theme.muted(),
        ));
    } else {
        spans.push(Span::styled(
            truncate_start_with_ellipsis(value, max_text_width),
            Style::default(),
        ));
        spans.push(cursor);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws a horizontal rule `y_offset` rows below the top of `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16, theme: &Theme) {
    if y_offset >= area.height {
        return;
    }
    let rule = "─".repeat(area.width as usize);
    let row = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(Paragraph::new(Span::styled(rule, theme.muted())), row);
}
