//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never touches the repository or spawns tasks itself.
//!
//! Cancellation is decided by the reducer (`CancelLoad`) and carried out by
//! the runtime calling `cancel()` on the token.

use tokio_util::sync::CancellationToken;
use trackdash_core::model::CriterionOutcome;

use crate::screens::{Route, ScreenId};

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch data for a freshly opened screen.
    Load {
        screen: ScreenId,
        route: Route,
        cancel: CancellationToken,
    },

    /// Abandon the load of a screen that was replaced.
    CancelLoad { cancel: CancellationToken },

    /// Persist a verify / skip / fail outcome.
    RecordOutcome {
        screen: ScreenId,
        track_id: String,
        position: usize,
        criterion_id: String,
        outcome: CriterionOutcome,
        note: Option<String>,
    },
}
