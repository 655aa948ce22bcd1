//! Viewport scrolling and selection engine.
//!
//! Three independent scrollers, one per kind of content:
//!
//! - `LinearViewport`: flat lists, one line per item, offset in items
//! - `MultilineViewport`: lists whose items span a variable number of lines,
//!   offset in lines
//! - `DocumentViewport`: continuous pre-wrapped text, offset in lines
//!
//! All operations are pure state transforms. Inputs are clamped, never
//! rejected: an empty list, an out-of-range index or a zero height all map
//! to the nearest valid state. After every call:
//!
//! ```text
//! 0 <= offset <= max(0, total - height)
//! ```
//!
//! and the selected item (when there is one) overlaps the visible window.
//! Selection itself is owned by the presenter, not the viewport.

mod document;
mod linear;
mod multiline;

pub use document::DocumentViewport;
pub use linear::LinearViewport;
pub use multiline::{MultilineRange, MultilineViewport};

/// Largest valid offset when `total` lines/items are shown `height` at a time.
pub(crate) fn max_offset(total: usize, height: usize) -> usize {
    total.saturating_sub(height)
}
