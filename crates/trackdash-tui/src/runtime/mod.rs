//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s to `inbox_tx`
//! - The loop drains `inbox_rx` every iteration
//! - A `Frame` event with the current terminal size is prepended so layout
//!   settles before keys and completions are applied

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use trackdash_core::Repository;
use trackdash_core::config::Config;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::screens::Route;
use crate::state::AppState;
use crate::{render, terminal, update};

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Lower bound for the configured tick interval.
const MIN_TICK: Duration = Duration::from_millis(16);

/// Full-screen dashboard runtime.
///
/// Terminal state is restored on drop, so an early `?` return or a panic
/// never leaves the shell in raw mode.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    repo: Arc<dyn Repository>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    tick_interval: Duration,
    last_tick: Instant,
    /// Effects produced while building the initial state.
    pending: Vec<UiEffect>,
}

impl TuiRuntime {
    pub fn new(config: &Config, repo: Arc<dyn Repository>) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (state, pending) = AppState::new(config, Route::Tracks);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            repo,
            inbox_tx,
            inbox_rx,
            tick_interval: Duration::from_millis(config.ui.tick_ms).max(MIN_TICK),
            last_tick: Instant::now(),
            pending,
        })
    }

    /// Runs the main event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        let initial = std::mem::take(&mut self.pending);
        self.execute_effects(initial);

        // Start dirty to ensure the first frame is drawn.
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if needs_redraw(&self.state, &event) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        tracing::info!("dashboard closed");
        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick only when nothing is waiting.
        let poll_duration = if events.is_empty() {
            self.tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= self.tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and forwards its event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Load {
                screen,
                route,
                cancel,
            } => {
                tracing::debug!(?screen, ?route, "loading screen");
                let repo = Arc::clone(&self.repo);
                self.spawn_effect(move || handlers::load_screen(repo, screen, route, cancel));
            }
            UiEffect::CancelLoad { cancel } => {
                cancel.cancel();
            }
            UiEffect::RecordOutcome {
                screen,
                track_id,
                position,
                criterion_id,
                outcome,
                note,
            } => {
                tracing::info!(
                    track = %track_id,
                    criterion = %criterion_id,
                    outcome = outcome.verb(),
                    "recording outcome"
                );
                let repo = Arc::clone(&self.repo);
                self.spawn_effect(move || {
                    handlers::record_outcome(
                        repo,
                        screen,
                        track_id,
                        position,
                        criterion_id,
                        outcome,
                        note,
                    )
                });
            }
        }
    }
}

/// Whether `event` can change what is on screen.
///
/// Frame alone changes nothing visible unless the size changed, which
/// crossterm also reports as a Resize terminal event. Ticks only animate the
/// spinner.
fn needs_redraw(state: &AppState, event: &UiEvent) -> bool {
    match event {
        UiEvent::Frame { .. } => false,
        UiEvent::Tick => state.screen.is_loading() || state.screen.saving,
        _ => true,
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
