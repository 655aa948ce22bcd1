//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! the per-iteration frame size, timer ticks, and async completions sent
//! through the runtime inbox.

use crossterm::event::Event;
use trackdash_core::model::Track;

use crate::screens::{ScreenData, ScreenId};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation).
    Tick,

    /// Current terminal size, prepended to every loop iteration.
    Frame { width: u16, height: u16 },

    /// Raw terminal input.
    Terminal(Event),

    /// Data for the screen that requested it.
    Loaded {
        screen: ScreenId,
        result: Result<ScreenData, String>,
    },

    /// A criterion outcome was written; carries the re-read track.
    OutcomeRecorded {
        screen: ScreenId,
        result: Result<Track, String>,
    },
}
