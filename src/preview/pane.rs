use crate::error::Result;

use super::RenderSink;

/// The embedded preview surface.
///
/// Holds the most recently presented document and a scroll offset. Each
/// presentation bumps the revision so the view can tell a refresh happened.
#[derive(Debug, Default, Clone)]
pub struct PreviewPane {
    document: String,
    revision: u64,
    scroll: usize,
}

impl PreviewPane {
    pub fn document(&self) -> &str {
        &self.document
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn line_count(&self) -> usize {
        self.document.lines().count().max(1)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.line_count().saturating_sub(1)
    }
}

impl RenderSink for PreviewPane {
    fn present(&mut self, document: &str) -> Result<()> {
        document.clone_into(&mut self.document);
        self.revision += 1;
        self.scroll = self.scroll.min(self.max_scroll());
        tracing::debug!(revision = self.revision, bytes = document.len(), "preview updated");
        Ok(())
    }
}
