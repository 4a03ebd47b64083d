//! Terminal UI components.
//!
//! - [`layout`]: Pane geometry and display-column arithmetic
//! - [`style`]: Colors for the editor chrome
//!
//! The left pane holds the tabbed source editors, the right pane the
//! composed document.

pub mod layout;
pub mod style;

mod overlays;
mod render;
mod status;

pub use layout::{
    PaneRects, char_at_display_col, display_col, editor_text_cols, editor_text_rect,
    editor_text_rows, line_number_width, pane_rects,
};
pub use render::render;
pub use status::status_text;

#[cfg(test)]
mod tests;
