//! Note input for recording a verify / skip / fail outcome.
//!
//! While open, this modal receives every key; navigation is suspended until
//! the note is submitted or the modal is cancelled.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use trackdash_core::model::{AcceptanceCriterion, CriterionOutcome};

use crate::common::overlay::{
    InputHint, centered_area, render_hints, render_input_line, render_overlay_container,
    render_separator,
};
use crate::common::truncate_with_ellipsis;
use crate::theme::Theme;

const OVERLAY_WIDTH: u16 = 60;
const OVERLAY_HEIGHT: u16 = 7;

#[derive(Debug, Clone)]
pub struct ActionInputState {
    track_id: String,
    /// Index of the criterion within its track.
    position: usize,
    criterion_id: String,
    /// Criterion description, shown as context.
    description: String,
    outcome: CriterionOutcome,
    input: String,
    error: Option<String>,
}

/// Result of feeding a key to the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionInputUpdate {
    Stay,
    Cancel,
    Submit { note: Option<String> },
}

impl ActionInputState {
    pub fn new(
        track_id: String,
        position: usize,
        criterion: &AcceptanceCriterion,
        outcome: CriterionOutcome,
    ) -> Self {
        Self {
            track_id,
            position,
            criterion_id: criterion.id.clone(),
            description: criterion.description.clone(),
            outcome,
            input: String::new(),
            error: None,
        }
    }

    pub fn track_id(&self) -> &str {
        &self.track_id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn criterion_id(&self) -> &str {
        &self.criterion_id
    }

    pub fn outcome(&self) -> CriterionOutcome {
        self.outcome
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ActionInputUpdate {
        if key.kind == KeyEventKind::Release {
            return ActionInputUpdate::Stay;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => ActionInputUpdate::Cancel,
            KeyCode::Char('c') if ctrl => ActionInputUpdate::Cancel,
            KeyCode::Enter => {
                let note = self.input.trim();
                // Failures must carry a note.
                if note.is_empty() && self.outcome == CriterionOutcome::Fail {
                    self.error = Some("A failure needs a note".to_string());
                    return ActionInputUpdate::Stay;
                }
                ActionInputUpdate::Submit {
                    note: (!note.is_empty()).then(|| note.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                ActionInputUpdate::Stay
            }
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                ActionInputUpdate::Stay
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                ActionInputUpdate::Stay
            }
            _ => ActionInputUpdate::Stay,
        }
    }

    /// Inserts pasted text, flattening newlines to spaces.
    pub fn handle_paste(&mut self, text: &str) {
        self.error = None;
        self.input
            .extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_area(area, OVERLAY_WIDTH, OVERLAY_HEIGHT);
        let title = format!("{} {}", self.outcome.verb(), self.criterion_id);
        let inner = render_overlay_container(frame, popup, &title, theme);
        if inner.height == 0 {
            return;
        }

        let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let width = inner.width as usize;

        let context = Line::from(Span::styled(
            truncate_with_ellipsis(&self.description, width),
            theme.muted(),
        ));
        frame.render_widget(Paragraph::new(context), row(0));
        render_separator(frame, inner, 1, theme);

        if inner.height > 2 {
            let placeholder = match self.outcome {
                CriterionOutcome::Fail => "Why did it fail?",
                _ => "Optional note...",
            };
            render_input_line(frame, row(2), &self.input, placeholder, theme);
        }
        if inner.height > 3
            && let Some(error) = &self.error
        {
            frame.render_widget(
                Paragraph::new(Span::styled(error.as_str(), theme.error())),
                row(3),
            );
        }

        let hints = [
            InputHint::new("Enter", "record"),
            InputHint::new("Esc", "cancel"),
        ];
        render_hints(frame, inner, &hints, theme);
    }
}
