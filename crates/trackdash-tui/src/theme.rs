//! Immutable render theme.
//!
//! Built once from `ThemeConfig` at startup and passed by reference into
//! every render function. Nothing here is mutated after construction.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use trackdash_core::config::{ThemeConfig, UiConfig};
use trackdash_core::model::{CriterionStatus, TaskStatus, TrackStatus};

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub selection_bg: Color,
    pub muted: Color,
    pub error: Color,
    pub show_scrollbar: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(&ThemeConfig::default(), &UiConfig::default())
    }
}

impl Theme {
    pub fn new(theme: &ThemeConfig, ui: &UiConfig) -> Self {
        Self {
            accent: parse_color(&theme.accent, Color::Cyan),
            selection_bg: parse_color(&theme.selection_bg, Color::Blue),
            muted: parse_color(&theme.muted, Color::DarkGray),
            error: parse_color(&theme.error, Color::Red),
            show_scrollbar: ui.show_scrollbar,
        }
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn track_status(&self, status: TrackStatus) -> (&'static str, Style) {
        match status {
            TrackStatus::NotStarted => ("○", self.muted()),
            TrackStatus::InProgress => ("◐", Style::default().fg(Color::Yellow)),
            TrackStatus::Complete => ("●", Style::default().fg(Color::Green)),
            TrackStatus::Blocked => ("✗", self.error()),
            TrackStatus::Waiting => ("◌", Style::default().fg(Color::Magenta)),
        }
    }

    pub fn task_status(&self, status: TaskStatus) -> (&'static str, Style) {
        match status {
            TaskStatus::Todo => ("[ ]", self.muted()),
            TaskStatus::InProgress => ("[~]", Style::default().fg(Color::Yellow)),
            TaskStatus::Done => ("[x]", Style::default().fg(Color::Green)),
            TaskStatus::Blocked => ("[!]", self.error()),
        }
    }

    pub fn criterion_status(&self, status: CriterionStatus) -> (&'static str, Style) {
        match status {
            CriterionStatus::Pending => ("·", self.muted()),
            CriterionStatus::Verified => ("✓", Style::default().fg(Color::Green)),
            CriterionStatus::Skipped => ("»", Style::default().fg(Color::Yellow)),
            CriterionStatus::Failed => ("✗", self.error()),
        }
    }
}

fn parse_color(name: &str, fallback: Color) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        tracing::warn!(color = name, "unknown theme color, using default");
        fallback
    })
}
