//! Document composition.
//!
//! This module merges the three source buffers into one HTML document:
//! - Implicit mode wraps the markup in a generated HTML5 skeleton
//! - Explicit mode splices styles and script into marker elements the
//!   markup already contains
//!
//! Composition is textual. Nothing is parsed, escaped or validated, so the
//! preview shows exactly what was typed.

mod compose;

pub use compose::{
    CompositionMode, SCRIPT_MARKER, SCRIPT_TAG, STYLE_MARKER, STYLE_TAG, compose,
    composition_mode,
};
