pub mod overlay;
mod scrollbar;
mod text;

pub use scrollbar::Scrollbar;
pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis, wrap_text};
