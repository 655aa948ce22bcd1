//! Screens (presenters) and the routes that open them.
//!
//! A screen is created in `Loading` for a `Route`, becomes `Ready` once its
//! data arrives, and is discarded when the router navigates away. Each
//! instance gets a fresh `ScreenId`; async completions carry the id that
//! requested them so results for a replaced screen can be dropped.
//!
//! ## Module Structure
//!
//! - `list.rs`: flat track and document lists
//! - `track.rs`: track detail with task and acceptance-criteria tabs
//! - `reader.rs`: scrolling reader for documents and task descriptions
//! - `action_input.rs`: modal note input for verify / skip / fail

pub mod action_input;
pub mod list;
pub mod reader;
pub mod track;

pub use action_input::{ActionInputState, ActionInputUpdate};
use chrono::{DateTime, Utc};
pub use list::{ListRow, ListScreen, RowMarker};
pub use reader::ReaderScreen;
use tokio_util::sync::CancellationToken;
pub use track::{TrackScreen, TrackTab};
use trackdash_core::model::{Document, DocumentSummary, Task, Track, TrackSummary};

use crate::command::NavCommand;
use crate::effects::UiEffect;

/// Identity of one screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(pub u64);

/// Monotonic source of `ScreenId`s.
#[derive(Debug, Default)]
pub struct ScreenSeq {
    next: u64,
}

impl ScreenSeq {
    pub fn next_id(&mut self) -> ScreenId {
        let id = ScreenId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Where a screen points. History stores routes, never screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Tracks,
    Documents,
    Track { id: String },
    Task { track_id: String, task_id: String },
    Document { id: String },
}

impl Route {
    /// Breadcrumb label shown in the header.
    pub fn title(&self) -> String {
        match self {
            Route::Tracks => "Tracks".to_string(),
            Route::Documents => "Documents".to_string(),
            Route::Track { id } => format!("Tracks › {id}"),
            Route::Task { track_id, task_id } => format!("Tracks › {track_id} › {task_id}"),
            Route::Document { id } => format!("Documents › {id}"),
        }
    }

    /// Screens with a tab bar above the body.
    pub fn has_tabs(&self) -> bool {
        matches!(self, Route::Track { .. })
    }
}

/// Data fetched for a route, sent back through the inbox.
#[derive(Debug, Clone)]
pub enum ScreenData {
    Tracks(Vec<TrackSummary>),
    Documents(Vec<DocumentSummary>),
    Track(Track),
    Reader { title: String, body: String },
}

impl ScreenData {
    pub fn task_reader(track: &Track, task: &Task) -> Self {
        let mut body = format!("Status: {}\nTrack: {}\n", task.status.label(), track.title);
        if !task.description.trim().is_empty() {
            body.push('\n');
            body.push_str(&task.description);
        }
        ScreenData::Reader {
            title: format!("{} · {}", task.id, task.title),
            body,
        }
    }

    pub fn document_reader(doc: &Document) -> Self {
        let mut body = format!("Kind: {}", doc.kind.label());
        if let Some(updated) = doc.updated_at {
            body.push_str(&format!("\nUpdated: {}", format_date(updated)));
        }
        body.push_str("\n\n");
        body.push_str(&doc.body);
        ScreenData::Reader {
            title: doc.title.clone(),
            body,
        }
    }
}

pub(crate) fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Presenter state for a loaded screen.
#[derive(Debug)]
pub enum ScreenView {
    List(ListScreen),
    Track(TrackScreen),
    Reader(ReaderScreen),
}

impl ScreenView {
    /// Builds the presenter for freshly loaded data at the given content size.
    pub fn from_data(data: ScreenData, width: usize, height: usize) -> Self {
        match data {
            ScreenData::Tracks(tracks) => ScreenView::List(ListScreen::tracks(tracks, height)),
            ScreenData::Documents(docs) => {
                ScreenView::List(ListScreen::documents(docs, height))
            }
            ScreenData::Track(track) => ScreenView::Track(TrackScreen::new(track, width, height)),
            ScreenData::Reader { title, body } => {
                ScreenView::Reader(ReaderScreen::new(title, body, width, height))
            }
        }
    }

    /// Applies a navigation command; returns a route to open, if any.
    pub fn handle_nav(&mut self, cmd: NavCommand) -> Option<Route> {
        match self {
            ScreenView::List(list) => list.handle_nav(cmd),
            ScreenView::Track(track) => track.handle_nav(cmd),
            ScreenView::Reader(reader) => {
                reader.handle_nav(cmd);
                None
            }
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        match self {
            ScreenView::List(list) => list.resize(height),
            ScreenView::Track(track) => track.resize(width, height),
            ScreenView::Reader(reader) => reader.resize(width, height),
        }
    }

    /// Position indicator for the header (`3/10`, `Top`, `42%`...).
    pub fn position(&self) -> Option<String> {
        match self {
            ScreenView::List(list) => list.position(),
            ScreenView::Track(track) => track.position(),
            ScreenView::Reader(reader) => Some(reader.position()),
        }
    }
}

/// Lifecycle of a screen instance.
#[derive(Debug)]
pub enum Phase {
    Loading,
    Ready,
    ActionInput(ActionInputState),
    Error(String),
}

/// The screen currently owning the body of the terminal.
#[derive(Debug)]
pub struct ActiveScreen {
    pub id: ScreenId,
    pub route: Route,
    pub phase: Phase,
    /// Set once the first load succeeds.
    pub view: Option<ScreenView>,
    /// Cancels the in-flight load when the screen is replaced.
    pub cancel: CancellationToken,
    /// A recorded outcome is being written.
    pub saving: bool,
}

impl ActiveScreen {
    /// Creates a screen in `Loading` along with the effect that fetches its data.
    pub fn open(id: ScreenId, route: Route) -> (Self, UiEffect) {
        let cancel = CancellationToken::new();
        let effect = UiEffect::Load {
            screen: id,
            route: route.clone(),
            cancel: cancel.clone(),
        };
        let screen = Self {
            id,
            route,
            phase: Phase::Loading,
            view: None,
            cancel,
            saving: false,
        };
        (screen, effect)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }
}

#[cfg(test)]
mod tests {
    use trackdash_core::model::TaskStatus;

    use super::*;

    #[test]
    fn test_screen_ids_are_monotonic() {
        let mut seq = ScreenSeq::default();
        let a = seq.next_id();
        let b = seq.next_id();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn test_open_starts_loading_with_matching_effect() {
        let (screen, effect) = ActiveScreen::open(ScreenId(7), Route::Tracks);
        assert!(screen.is_loading());
        match effect {
            UiEffect::Load { screen: id, route, .. } => {
                assert_eq!(id, ScreenId(7));
                assert_eq!(route, Route::Tracks);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn test_task_reader_includes_status_and_description() {
        let track = Track {
            id: "core".into(),
            title: "Core".into(),
            ..Track::default()
        };
        let task = Task {
            id: "t1".into(),
            title: "Parse config".into(),
            status: TaskStatus::Done,
            description: "Read the TOML file.".into(),
            ..Task::default()
        };
        let ScreenData::Reader { title, body } = ScreenData::task_reader(&track, &task) else {
            panic!("expected reader data");
        };
        assert_eq!(title, "t1 · Parse config");
        assert!(body.starts_with("Status: done"));
        assert!(body.ends_with("Read the TOML file."));
    }
}
