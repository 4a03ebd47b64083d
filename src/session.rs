//! Editing session: the three source buffers, the file binding and the
//! modified flag.
//!
//! One `Session` exists per editor window. It is owned by the app model and
//! passed by reference to whatever needs it.

use std::path::{Path, PathBuf};

use crate::document::{CompositionMode, compose, composition_mode};
use crate::editor::{BufferKind, SourceBuffer};
use crate::error::{EditorError, Result};

pub const APP_TITLE: &str = "wysi";

/// Where the session sits in the clean/dirty, bound/unbound lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    Clean(Option<&'a Path>),
    Dirty(Option<&'a Path>),
}

/// A transition that throws away the current buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    New,
    Open,
    Exit,
}

impl PendingAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Open => "Open",
            Self::Exit => "Exit",
        }
    }

    /// Question shown before the action runs over unsaved changes.
    pub const fn question(self) -> &'static str {
        match self {
            Self::New => "Do you want to save changes before creating a new file?",
            Self::Open => "Do you want to save changes before opening a file?",
            Self::Exit => "Do you want to save changes before exiting?",
        }
    }
}

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    Save,
    Discard,
    Cancel,
}

/// What has to happen before a pending action may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proceed {
    /// Run the action now.
    Now,
    /// Save first; run the action only if the save succeeds.
    AfterSave,
}

pub struct Session {
    buffers: [SourceBuffer; 3],
    path: Option<PathBuf>,
    modified: bool,
}

impl Session {
    /// An unbound session with default (empty) buffers.
    pub fn new() -> Self {
        Self {
            buffers: BufferKind::ALL.map(SourceBuffer::new),
            path: None,
            modified: false,
        }
    }

    /// A clean session bound to `path` that has not been written yet.
    pub fn bound_to(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new()
        }
    }

    pub const fn buffer(&self, kind: BufferKind) -> &SourceBuffer {
        &self.buffers[kind.index()]
    }

    /// Apply an edit to one buffer. The session turns dirty only when the
    /// edit reports that the text changed.
    pub fn edit(&mut self, kind: BufferKind, edit: impl FnOnce(&mut SourceBuffer) -> bool) -> bool {
        let changed = edit(&mut self.buffers[kind.index()]);
        if changed {
            self.modified = true;
        }
        changed
    }

    /// Move a buffer's cursor without touching the modified flag.
    pub fn navigate(&mut self, kind: BufferKind, nav: impl FnOnce(&mut SourceBuffer)) {
        nav(&mut self.buffers[kind.index()]);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn state(&self) -> SessionState<'_> {
        if self.modified {
            SessionState::Dirty(self.path())
        } else {
            SessionState::Clean(self.path())
        }
    }

    /// Whether New, Open or Exit must ask before discarding the buffers.
    pub const fn needs_confirmation(&self) -> bool {
        self.modified
    }

    /// Turn the user's answer to the unsaved-changes prompt into a plan.
    ///
    /// # Errors
    /// Returns [`EditorError::UserCancelled`] when the user cancelled; the
    /// pending action must then be dropped.
    pub fn resolve_unsaved(&self, action: PendingAction, choice: UnsavedChoice) -> Result<Proceed> {
        match choice {
            UnsavedChoice::Save => Ok(Proceed::AfterSave),
            UnsavedChoice::Discard => {
                tracing::debug!(?action, "discarding unsaved changes");
                Ok(Proceed::Now)
            }
            UnsavedChoice::Cancel => Err(EditorError::UserCancelled),
        }
    }

    /// The composed document for the current buffers.
    pub fn document(&self) -> String {
        compose(
            &self.buffer(BufferKind::Markup).text(),
            &self.buffer(BufferKind::Styles).text(),
            &self.buffer(BufferKind::Script).text(),
        )
    }

    pub fn composition_mode(&self) -> CompositionMode {
        composition_mode(&self.buffer(BufferKind::Markup).text())
    }

    /// File name shown in the title, or "untitled".
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "untitled".to_string(), |n| n.to_string_lossy().to_string())
    }

    /// Window title: app name, file name when bound, `*` when modified.
    pub fn title(&self) -> String {
        let mut title = APP_TITLE.to_string();
        if self.path.is_some() {
            title.push_str(" - ");
            title.push_str(&self.display_name());
        }
        if self.modified {
            title.push_str(" *");
        }
        title
    }

    /// Start over: default buffers, unbound, clean.
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
        self.path = None;
        self.modified = false;
    }

    /// Load `path` into the markup buffer and clear styles and script.
    ///
    /// # Errors
    /// Returns [`EditorError::FileIo`] if the file cannot be read as UTF-8;
    /// the session is left untouched.
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        let content =
            std::fs::read_to_string(path).map_err(|err| EditorError::file_io(path, err))?;
        for buffer in &mut self.buffers {
            buffer.clear();
        }
        self.buffers[BufferKind::Markup.index()].replace_text(&content);
        self.path = Some(path.to_path_buf());
        self.modified = false;
        tracing::info!(path = %path.display(), bytes = content.len(), "loaded document");
        Ok(())
    }

    /// Write the composed document to `path` and bind the session to it.
    ///
    /// # Errors
    /// Returns [`EditorError::FileIo`] if the write fails; the binding and
    /// modified flag are left as they were.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        let document = self.document();
        std::fs::write(path, &document).map_err(|err| EditorError::file_io(path, err))?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        tracing::info!(path = %path.display(), bytes = document.len(), "saved document");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.path)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}
