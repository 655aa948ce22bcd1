//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Key routing depends on the active screen's phase:
//!
//! - `ActionInput`: the modal captures every key
//! - `Loading`: only app-level keys (quit, back, jump to tracks/documents)
//! - `Error`: app-level keys plus retry
//! - `Ready`: app-level keys, navigation and start-action

use crossterm::event::{Event, KeyEvent};
use trackdash_core::model::{CriterionOutcome, Track};

use crate::command::{KeyAction, NavCommand};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::screens::{ActionInputUpdate, Phase, Route, ScreenData, ScreenId, ScreenView};
use crate::state::AppState;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Loaded { screen, result } => handle_loaded(app, screen, result),
        UiEvent::OutcomeRecorded { screen, result } => {
            handle_outcome_recorded(app, screen, result)
        }
    }
}

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    if app.size == (width, height) {
        return;
    }
    app.size = (width, height);
    let (content_width, content_height) = app.content_size(&app.screen.route);
    if let Some(view) = app.screen.view.as_mut() {
        view.resize(content_width, content_height);
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            if let Phase::ActionInput(input) = &mut app.screen.phase {
                input.handle_paste(&text);
            }
            vec![]
        }
        // Size changes arrive through the Frame event prepended each loop.
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if matches!(app.screen.phase, Phase::ActionInput(_)) {
        return handle_action_input_key(app, key);
    }

    app.status = None;
    let Some(action) = app.keymap.action(key) else {
        return vec![];
    };

    match action {
        KeyAction::Quit => vec![UiEffect::Quit],
        KeyAction::Back => app.back(),
        KeyAction::GoTracks => app.go_root(Route::Tracks),
        KeyAction::GoDocuments => app.go_root(Route::Documents),
        KeyAction::Retry => {
            if matches!(app.screen.phase, Phase::Error(_)) {
                app.retry()
            } else {
                vec![]
            }
        }
        KeyAction::Nav(cmd) => handle_nav(app, cmd),
        KeyAction::StartAction(outcome) => {
            start_action(app, outcome);
            vec![]
        }
    }
}

fn handle_nav(app: &mut AppState, cmd: NavCommand) -> Vec<UiEffect> {
    if !matches!(app.screen.phase, Phase::Ready) {
        return vec![];
    }
    let Some(view) = app.screen.view.as_mut() else {
        return vec![];
    };
    match view.handle_nav(cmd) {
        Some(route) => app.navigate(route),
        None => vec![],
    }
}

fn start_action(app: &mut AppState, outcome: CriterionOutcome) {
    if !matches!(app.screen.phase, Phase::Ready) || app.screen.saving {
        return;
    }
    let Some(ScreenView::Track(track)) = &app.screen.view else {
        return;
    };
    if let Some(input) = track.start_action(outcome) {
        tracing::debug!(
            criterion = input.criterion_id(),
            outcome = outcome.verb(),
            "action input opened"
        );
        app.screen.phase = Phase::ActionInput(input);
    }
}

fn handle_action_input_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Phase::ActionInput(input) = &mut app.screen.phase else {
        return vec![];
    };

    match input.handle_key(key) {
        ActionInputUpdate::Stay => vec![],
        ActionInputUpdate::Cancel => {
            app.screen.phase = Phase::Ready;
            vec![]
        }
        ActionInputUpdate::Submit { note } => {
            let effect = UiEffect::RecordOutcome {
                screen: app.screen.id,
                track_id: input.track_id().to_string(),
                position: input.position(),
                criterion_id: input.criterion_id().to_string(),
                outcome: input.outcome(),
                note,
            };
            app.screen.phase = Phase::Ready;
            app.screen.saving = true;
            vec![effect]
        }
    }
}

fn handle_loaded(
    app: &mut AppState,
    screen: ScreenId,
    result: Result<ScreenData, String>,
) -> Vec<UiEffect> {
    if screen != app.screen.id || !app.screen.is_loading() {
        tracing::debug!(?screen, active = ?app.screen.id, "dropping stale load result");
        return vec![];
    }

    match result {
        Ok(data) => {
            let (width, height) = app.content_size(&app.screen.route);
            app.screen.view = Some(ScreenView::from_data(data, width, height));
            app.screen.phase = Phase::Ready;
        }
        Err(error) => {
            tracing::warn!(route = ?app.screen.route, %error, "load failed");
            app.screen.phase = Phase::Error(error);
        }
    }
    vec![]
}

fn handle_outcome_recorded(
    app: &mut AppState,
    screen: ScreenId,
    result: Result<Track, String>,
) -> Vec<UiEffect> {
    if screen != app.screen.id {
        tracing::debug!(?screen, active = ?app.screen.id, "dropping stale outcome result");
        return vec![];
    }
    app.screen.saving = false;

    match result {
        Ok(track) => {
            if let Some(ScreenView::Track(view)) = app.screen.view.as_mut() {
                view.replace_track(track);
            }
            app.status = Some("Outcome recorded".to_string());
        }
        Err(error) => {
            tracing::error!(%error, "recording outcome failed");
            app.screen.phase = Phase::Error(error);
        }
    }
    vec![]
}
