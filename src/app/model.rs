use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::{BufferKind, SourceBuffer};
use crate::error::EditorError;
use crate::preview::{self, PreviewPane};
use crate::scheduler::RefreshScheduler;
use crate::session::{PendingAction, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What a path prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPurpose {
    Open,
    SaveAs,
}

impl PathPurpose {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Open => "Open HTML File",
            Self::SaveAs => "Save HTML File",
        }
    }
}

/// A modal dialog. While one is showing it receives every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Save, discard or cancel before `action` throws the buffers away.
    Unsaved { action: PendingAction },
    /// Ask for a file path. `then` runs after a successful Save As.
    Path {
        purpose: PathPurpose,
        input: String,
        then: Option<PendingAction>,
    },
    /// Blocking error report, dismissed by any key.
    Alert { title: String, message: String },
}

/// Scroll offsets of one editor tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorScroll {
    /// First visible line.
    pub row: usize,
    /// First visible display column.
    pub col: usize,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Buffers, file binding and modified flag
    pub session: Session,
    /// Debounced auto-refresh policy
    pub scheduler: RefreshScheduler,
    /// Embedded preview of the composed document
    pub preview: PreviewPane,
    /// Tab shown in the editor pane
    pub active: BufferKind,
    /// Per-tab scroll offsets, indexed by [`BufferKind::index`]
    pub scroll: [EditorScroll; 3],
    /// Open modal dialog, if any
    pub prompt: Option<Prompt>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Set by text-changing edits until the event loop arms the scheduler
    edited: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("session", &self.session)
            .field("active", &self.active)
            .field("prompt", &self.prompt)
            .field("auto_refresh", &self.scheduler.auto_refresh_enabled())
            .field("preview_revision", &self.preview.revision())
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model around an existing session.
    pub fn new(session: Session, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            scheduler: RefreshScheduler::default(),
            preview: PreviewPane::default(),
            active: BufferKind::Markup,
            scroll: [EditorScroll::default(); 3],
            prompt: None,
            help_visible: false,
            should_quit: false,
            terminal_size,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            edited: false,
        }
    }

    /// Use a configured scheduler (quiescence window, auto-refresh flag).
    pub fn with_scheduler(mut self, scheduler: RefreshScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub const fn active_buffer(&self) -> &SourceBuffer {
        self.session.buffer(self.active)
    }

    pub const fn active_scroll(&self) -> EditorScroll {
        self.scroll[self.active.index()]
    }

    /// Apply a text edit to the active buffer and record it for the scheduler.
    pub(super) fn edit_active(&mut self, edit: impl FnOnce(&mut SourceBuffer) -> bool) {
        if self.session.edit(self.active, edit) {
            self.edited = true;
            let message = if self.scheduler.auto_refresh_enabled() {
                "Modified - Auto-refresh enabled"
            } else {
                "Modified"
            };
            self.show_toast(ToastLevel::Info, message);
        }
        self.follow_cursor();
    }

    /// Move within the active buffer.
    pub(super) fn navigate_active(&mut self, nav: impl FnOnce(&mut SourceBuffer)) {
        self.session.navigate(self.active, nav);
        self.follow_cursor();
    }

    /// Whether an edit happened since the last call. Clears the flag.
    pub fn take_edit_notice(&mut self) -> bool {
        std::mem::take(&mut self.edited)
    }

    /// Adjust the active tab's scroll so the cursor stays on screen.
    pub(super) fn follow_cursor(&mut self) {
        let (width, height) = self.terminal_size;
        let buffer = self.session.buffer(self.active);
        let rows = crate::ui::editor_text_rows(height).max(1);
        let cols = crate::ui::editor_text_cols(width, buffer.line_count()).max(1);
        let cursor = buffer.cursor();
        let cursor_col = buffer
            .line_at(cursor.line)
            .map_or(0, |line| crate::ui::display_col(&line, cursor.col));

        let scroll = &mut self.scroll[self.active.index()];
        if cursor.line < scroll.row {
            scroll.row = cursor.line;
        } else if cursor.line >= scroll.row + rows {
            scroll.row = cursor.line + 1 - rows;
        }
        if cursor_col < scroll.col {
            scroll.col = cursor_col;
        } else if cursor_col >= scroll.col + cols {
            scroll.col = cursor_col + 1 - cols;
        }
    }

    /// Compose the buffers into the embedded preview.
    ///
    /// A failed hand-off raises an alert and leaves the session alone.
    pub fn refresh_preview(&mut self) -> bool {
        match preview::refresh(&self.session, &mut self.preview) {
            Ok(()) => {
                self.show_toast(ToastLevel::Info, "Preview updated");
                true
            }
            Err(err) => {
                tracing::warn!(%err, "preview refresh failed");
                self.alert(&err);
                false
            }
        }
    }

    /// Show a blocking alert for `err`.
    pub fn alert(&mut self, err: &EditorError) {
        self.prompt = Some(Prompt::Alert {
            title: err.title().to_string(),
            message: err.to_string(),
        });
    }

    /// Path to pre-fill in a Save As prompt.
    pub(super) fn save_as_default(&self) -> String {
        self.session
            .path()
            .map(|path| path.display().to_string())
            .unwrap_or_default()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Session::new(), (80, 24))
    }
}
