//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File and browser I/O runs in a side-effect step after `update`.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{EditorScroll, Model, PathPurpose, Prompt, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::time::Duration;

use crate::scheduler::DEFAULT_QUIESCENCE;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    auto_refresh: bool,
    refresh_delay: Duration,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application, optionally opening `file_path` at startup.
    pub const fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            auto_refresh: true,
            refresh_delay: DEFAULT_QUIESCENCE,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable debounced auto-refresh.
    pub const fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    /// Quiet period after the last edit before the preview refreshes.
    pub const fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
