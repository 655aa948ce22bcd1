//! Flat list screens: tracks and documents.

use trackdash_core::model::{DocumentKind, DocumentSummary, TrackStatus, TrackSummary};

use super::{Route, format_date};
use crate::command::NavCommand;
use crate::viewport::LinearViewport;

/// Leading marker of a row, styled by the theme at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    Track(TrackStatus),
    Document(DocumentKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub marker: RowMarker,
    pub title: String,
    /// Right-aligned secondary text.
    pub detail: String,
    /// Opened on Enter.
    pub route: Route,
}

#[derive(Debug)]
pub struct ListScreen {
    rows: Vec<ListRow>,
    selected: usize,
    viewport: LinearViewport,
    empty_message: &'static str,
}

impl ListScreen {
    pub fn new(rows: Vec<ListRow>, height: usize, empty_message: &'static str) -> Self {
        let mut screen = Self {
            rows,
            selected: 0,
            viewport: LinearViewport::new(height),
            empty_message,
        };
        screen.selected = screen.viewport.ensure_visible(screen.rows.len(), 0);
        screen
    }

    pub fn tracks(tracks: Vec<TrackSummary>, height: usize) -> Self {
        let rows = tracks
            .into_iter()
            .map(|track| {
                let mut detail = format!("{}/{} tasks", track.done_count, track.task_count);
                if let Some(iteration) = track.iteration {
                    detail.push_str(&format!(" · it.{iteration}"));
                }
                ListRow {
                    marker: RowMarker::Track(track.status),
                    title: track.title,
                    detail,
                    route: Route::Track { id: track.id },
                }
            })
            .collect();
        Self::new(rows, height, "No tracks yet")
    }

    pub fn documents(docs: Vec<DocumentSummary>, height: usize) -> Self {
        let rows = docs
            .into_iter()
            .map(|doc| ListRow {
                marker: RowMarker::Document(doc.kind),
                title: doc.title,
                detail: doc.updated_at.map(format_date).unwrap_or_default(),
                route: Route::Document { id: doc.id },
            })
            .collect();
        Self::new(rows, height, "No documents yet")
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn viewport(&self) -> &LinearViewport {
        &self.viewport
    }

    pub fn empty_message(&self) -> &'static str {
        self.empty_message
    }

    pub fn handle_nav(&mut self, cmd: NavCommand) -> Option<Route> {
        let total = self.rows.len();
        let last = total.saturating_sub(1);
        let target = match cmd {
            NavCommand::Up => self.selected.saturating_sub(1),
            NavCommand::Down => (self.selected + 1).min(last),
            NavCommand::PageUp => self.viewport.page_up(total, self.selected),
            NavCommand::PageDown => self.viewport.page_down(total, self.selected),
            NavCommand::JumpStart => 0,
            NavCommand::JumpEnd => last,
            NavCommand::Tab => return None,
            NavCommand::Enter => return self.rows.get(self.selected).map(|row| row.route.clone()),
        };
        self.selected = self.viewport.ensure_visible(total, target);
        None
    }

    pub fn resize(&mut self, height: usize) {
        self.viewport.set_height(height);
        self.selected = self.viewport.ensure_visible(self.rows.len(), self.selected);
    }

    pub fn position(&self) -> Option<String> {
        (!self.rows.is_empty()).then(|| format!("{}/{}", self.selected + 1, self.rows.len()))
    }
}
