//! Editing surfaces for the three source buffers.
//!
//! Provides a rope-backed text buffer with a cursor, tagged with the kind of
//! source it holds (markup, styles or script).

mod buffer;

pub use buffer::{BufferKind, Cursor, Direction, SourceBuffer, TAB_WIDTH};
