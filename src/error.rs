//! Errors surfaced to the user.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing a document failed.
    #[error("{}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A preview artifact could not be written or handed to the browser.
    #[error("could not prepare preview: {0}")]
    RenderSetup(#[source] std::io::Error),
    /// The user backed out of a save/discard prompt.
    #[error("cancelled")]
    UserCancelled,
}

impl EditorError {
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Title for the alert that reports this error.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::FileIo { .. } => "File Error",
            Self::RenderSetup(_) => "Preview Error",
            Self::UserCancelled => "Cancelled",
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
