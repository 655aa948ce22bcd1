//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects. Viewport ranges are read, not computed
//! ahead of time: every frame asks the screen's viewport what to draw.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::common::overlay::{InputHint, hints_line};
use crate::common::{Scrollbar, truncate_with_ellipsis};
use crate::layout::ScreenLayout;
use crate::screens::track::{BLOCK_INDENT, BlockLine, criterion_block};
use crate::screens::{
    ActiveScreen, ListScreen, Phase, ReaderScreen, RowMarker, ScreenView, TrackScreen, TrackTab,
};
use crate::state::AppState;
use crate::theme::Theme;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let screen = &app.screen;
    let theme = &app.theme;
    let layout = ScreenLayout::new(frame.area(), screen.route.has_tabs());

    render_header(app, frame, layout.header);

    if let (Some(tabs), Some(ScreenView::Track(track))) = (layout.tabs, &screen.view) {
        render_tabs(track, frame, tabs, theme);
    }

    match (&screen.phase, &screen.view) {
        (Phase::Error(error), _) => render_error(error, frame, layout.content, theme),
        (Phase::Loading, _) | (_, None) => {
            let text = Paragraph::new(Span::styled("Loading…", theme.muted()))
                .alignment(Alignment::Center);
            frame.render_widget(text, layout.content);
        }
        (_, Some(view)) => render_view(view, frame, &layout, theme),
    }

    render_footer(app, frame, layout.footer);

    if let Phase::ActionInput(input) = &screen.phase {
        input.render(frame, layout.body, theme);
    }
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let screen = &app.screen;
    let theme = &app.theme;

    let title = match &screen.view {
        Some(ScreenView::Reader(reader)) => {
            format!("{} › {}", screen.route.title(), reader.title())
        }
        _ => screen.route.title(),
    };

    let mut right = String::new();
    if screen.is_loading() || screen.saving {
        right.push_str(SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()]);
    }
    if let Some(position) = screen.view.as_ref().and_then(ScreenView::position) {
        if !right.is_empty() {
            right.push(' ');
        }
        right.push_str(&position);
    }

    let right_width = right.width();
    let title_width = (area.width as usize).saturating_sub(right_width + 3);
    let title = truncate_with_ellipsis(&title, title_width);
    let gap = (area.width as usize).saturating_sub(title.width() + right_width + 2);

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(title, theme.title()),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, theme.muted()),
        Span::raw(" "),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(track: &TrackScreen, frame: &mut Frame, area: Rect, theme: &Theme) {
    let titles = [TrackTab::Tasks, TrackTab::Criteria].map(|tab| {
        let count = match tab {
            TrackTab::Tasks => track.track().tasks.len(),
            TrackTab::Criteria => track.track().criteria.len(),
        };
        format!("{} ({count})", tab.label())
    });
    let selected = match track.tab() {
        TrackTab::Tasks => 0,
        TrackTab::Criteria => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme.muted())
        .highlight_style(theme.title().add_modifier(Modifier::UNDERLINED));
    frame.render_widget(tabs, area);
}

fn render_error(error: &str, frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled("Something went wrong", theme.error().add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from(Span::styled(error, theme.error())),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}

fn render_view(view: &ScreenView, frame: &mut Frame, layout: &ScreenLayout, theme: &Theme) {
    let (total, height, offset) = match view {
        ScreenView::List(list) => {
            render_list(list, frame, layout.content, theme);
            let vp = list.viewport();
            (list.rows().len(), vp.height(), vp.offset())
        }
        ScreenView::Track(track) => {
            render_track(track, frame, layout.content, theme);
            match track.tab() {
                TrackTab::Tasks => {
                    let vp = track.tasks_view();
                    (track.track().tasks.len(), vp.height(), vp.offset())
                }
                TrackTab::Criteria => {
                    let vp = track.criteria_view();
                    let total = track.line_counts().iter().sum();
                    (total, vp.height(), vp.offset())
                }
            }
        }
        ScreenView::Reader(reader) => {
            render_reader(reader, frame, layout.content);
            let vp = reader.viewport();
            (reader.lines().len(), vp.height(), vp.offset())
        }
    };

    if theme.show_scrollbar {
        let scrollbar = Scrollbar::new(total, height, offset)
            .thumb_style(theme.accent())
            .track_style(theme.muted());
        frame.render_widget(scrollbar, layout.scrollbar);
    }
}

/// `icon title ......... detail`, truncated to `width`.
fn row_line<'a>(
    icon: (&'a str, Style),
    title: &str,
    detail: &str,
    width: usize,
    theme: &Theme,
) -> Line<'a> {
    let detail_width = detail.width();
    let icon_width = icon.0.width() + 1;
    let title_room = width.saturating_sub(icon_width + detail_width + 1);
    let title = truncate_with_ellipsis(title, title_room);
    let gap = width.saturating_sub(icon_width + title.width() + detail_width);

    Line::from(vec![
        Span::styled(icon.0, icon.1),
        Span::raw(" "),
        Span::raw(title),
        Span::raw(" ".repeat(gap)),
        Span::styled(detail.to_string(), theme.muted()),
    ])
}

fn render_list(list: &ListScreen, frame: &mut Frame, area: Rect, theme: &Theme) {
    let rows = list.rows();
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(list.empty_message(), theme.muted())),
            area,
        );
        return;
    }

    let width = area.width as usize;
    let lines: Vec<Line> = list
        .viewport()
        .visible_range(rows.len())
        .map(|index| {
            let row = &rows[index];
            let icon = match row.marker {
                RowMarker::Track(status) => theme.track_status(status),
                RowMarker::Document(kind) => (kind.label(), theme.accent()),
            };
            let line = row_line(icon, &row.title, &row.detail, width, theme);
            if index == list.selected() {
                line.style(theme.selected())
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_track(track: &TrackScreen, frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = match track.tab() {
        TrackTab::Tasks => task_lines(track, area, theme),
        TrackTab::Criteria => criteria_lines(track, area, theme),
    };
    if lines.is_empty() {
        let empty = match track.tab() {
            TrackTab::Tasks => "No tasks",
            TrackTab::Criteria => "No acceptance criteria",
        };
        frame.render_widget(Paragraph::new(Span::styled(empty, theme.muted())), area);
        return;
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn task_lines<'a>(track: &'a TrackScreen, area: Rect, theme: &Theme) -> Vec<Line<'a>> {
    let tasks = &track.track().tasks;
    let width = area.width as usize;
    track
        .tasks_view()
        .visible_range(tasks.len())
        .map(|index| {
            let task = &tasks[index];
            let line = row_line(
                theme.task_status(task.status),
                &task.title,
                &task.id,
                width,
                theme,
            );
            if index == track.selected() {
                line.style(theme.selected())
            } else {
                line
            }
        })
        .collect()
}

/// Draws `line_offset..` of the first visible criterion, then whole
/// criteria, stopping at the viewport height.
fn criteria_lines<'a>(track: &'a TrackScreen, area: Rect, theme: &Theme) -> Vec<Line<'a>> {
    let criteria = &track.track().criteria;
    let counts = track.line_counts();
    let viewport = track.criteria_view();
    let range = viewport.visible_range(&counts);
    let width = track.width();
    let indent = " ".repeat(BLOCK_INDENT);

    let mut lines = Vec::with_capacity(viewport.height());
    for index in range.items() {
        let criterion = &criteria[index];
        let expanded = track.is_expanded(index);
        let selected = index == track.selected();
        let skip = if index == range.first_item {
            range.line_offset
        } else {
            0
        };

        for block_line in criterion_block(criterion, expanded, width)
            .into_iter()
            .skip(skip)
        {
            if lines.len() >= viewport.height() || lines.len() >= area.height as usize {
                return lines;
            }
            let line = match block_line {
                BlockLine::Header => {
                    let (icon, icon_style) = theme.criterion_status(criterion.status);
                    let arrow = if expanded { "▾" } else { "▸" };
                    let detail = if expanded {
                        criterion.status.label().to_string()
                    } else {
                        criterion.description.replace('\n', " ")
                    };
                    let prefix = format!("{arrow} {icon} {} ", criterion.id);
                    let detail =
                        truncate_with_ellipsis(&detail, width.saturating_sub(prefix.width()));
                    let line = Line::from(vec![
                        Span::raw(format!("{arrow} ")),
                        Span::styled(icon, icon_style),
                        Span::styled(format!(" {} ", criterion.id), theme.accent()),
                        Span::raw(detail),
                    ]);
                    if selected {
                        line.style(theme.selected())
                    } else {
                        line
                    }
                }
                BlockLine::Text(text) => Line::from(format!("{indent}{text}")),
                BlockLine::Note(text) => Line::from(Span::styled(
                    format!("{indent}{text}"),
                    theme.muted().add_modifier(Modifier::ITALIC),
                )),
            };
            lines.push(line);
        }
    }
    lines
}

fn render_reader(reader: &ReaderScreen, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = reader.lines()[reader.viewport().visible_range(reader.lines().len())]
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let theme = &app.theme;
    if let Some(status) = &app.status {
        let line = Line::from(Span::styled(format!(" {status}"), theme.accent()));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints = footer_hints(&app.screen);
    let mut line = hints_line(hints, theme);
    line.spans.insert(0, Span::raw(" "));
    frame.render_widget(Paragraph::new(line), area);
}

fn footer_hints(screen: &ActiveScreen) -> &'static [InputHint<'static>] {
    const LOADING: &[InputHint<'static>] = &[InputHint::new("Esc", "back"), InputHint::new("q", "quit")];
    const ERROR: &[InputHint<'static>] = &[
        InputHint::new("r", "retry"),
        InputHint::new("Esc", "back"),
        InputHint::new("q", "quit"),
    ];
    const LIST: &[InputHint<'static>] = &[
        InputHint::new("↑↓", "move"),
        InputHint::new("Enter", "open"),
        InputHint::new("t/d", "tracks/docs"),
        InputHint::new("q", "quit"),
    ];
    const TRACK: &[InputHint<'static>] = &[
        InputHint::new("Tab", "switch"),
        InputHint::new("Enter", "open/expand"),
        InputHint::new("v/s/f", "verify/skip/fail"),
        InputHint::new("Esc", "back"),
    ];
    const READER: &[InputHint<'static>] = &[
        InputHint::new("↑↓", "scroll"),
        InputHint::new("PgUp/PgDn", "page"),
        InputHint::new("Esc", "back"),
    ];
    const MODAL: &[InputHint<'static>] = &[];

    match (&screen.phase, &screen.view) {
        (Phase::Error(_), _) => ERROR,
        (Phase::ActionInput(_), _) => MODAL,
        (Phase::Loading, _) | (_, None) => LOADING,
        (_, Some(ScreenView::List(_))) => LIST,
        (_, Some(ScreenView::Track(_))) => TRACK,
        (_, Some(ScreenView::Reader(_))) => READER,
    }
}
