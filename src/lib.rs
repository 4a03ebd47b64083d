// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorError)
    clippy::module_name_repetitions
)]

//! # wysi
//!
//! A terminal scratchpad for HTML, CSS and JavaScript with a live preview.
//!
//! wysi keeps three source buffers side by side with the document they
//! compose into:
//! - Tabbed, syntax-highlighted editors for markup, styles and script
//! - An embedded preview that refreshes after a quiet period
//! - On-demand hand-off to the system browser
//! - Save/discard prompts before anything unsaved is lost
//!
//! ## Architecture
//!
//! wysi uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Composition of the three buffers into one page
//! - [`editor`]: Text buffers and cursors
//! - [`session`]: Buffers, file binding and dirty tracking
//! - [`scheduler`]: Debounced preview refresh
//! - [`preview`]: Embedded pane and browser render sinks
//! - [`ui`]: Terminal UI components
//! - [`highlight`]: Syntax highlighting
//! - [`logging`]: Log output that stays off the UI's screen

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod perf;
pub mod preview;
pub mod scheduler;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{CompositionMode, compose};
    pub use crate::editor::BufferKind;
    pub use crate::error::EditorError;
    pub use crate::session::{Session, SessionState};
}
