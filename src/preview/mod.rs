//! Render sinks for the composed document.
//!
//! - [`PreviewPane`]: the embedded preview, fed in memory
//! - [`BrowserSink`]: the system browser, fed through a temporary file that
//!   is reaped after a grace period

mod artifacts;
mod browser;
mod pane;

pub use artifacts::{ArtifactReaper, BROWSER_GRACE};
pub use browser::{BrowserSink, Opener, file_url, open_external};
pub use pane::PreviewPane;

use crate::error::Result;
use crate::session::Session;

/// Something that can display a composed document.
pub trait RenderSink {
    /// Display `document`, replacing whatever was shown before.
    ///
    /// # Errors
    /// Returns [`crate::error::EditorError::RenderSetup`] if the document
    /// could not be handed over.
    fn present(&mut self, document: &str) -> Result<()>;
}

/// Compose the session's buffers and hand the result to `sink`.
///
/// # Errors
/// Propagates the sink's hand-off failure. The session is never modified.
pub fn refresh(session: &Session, sink: &mut dyn RenderSink) -> Result<()> {
    let _scope = crate::perf::scope("preview.refresh");
    let document = session.document();
    sink.present(&document)
}
