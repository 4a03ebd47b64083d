//! Log output setup.
//!
//! Events go to `--log-file` when one is given. Otherwise they go to stderr,
//! but only while the terminal UI does not own the screen; events raised
//! while it does are dropped so they cannot draw over a frame.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::EitherWriter;

static SCREEN_OWNED: AtomicBool = AtomicBool::new(false);

/// Marks the screen as owned by the UI until dropped.
#[derive(Debug)]
pub struct ScreenGuard(());

impl ScreenGuard {
    pub fn acquire() -> Self {
        SCREEN_OWNED.store(true, Ordering::Relaxed);
        Self(())
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        SCREEN_OWNED.store(false, Ordering::Relaxed);
    }
}

pub fn screen_owned() -> bool {
    SCREEN_OWNED.load(Ordering::Relaxed)
}

/// Stderr writer that goes quiet while a [`ScreenGuard`] is held.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrOutsideUi;

impl<'a> MakeWriter<'a> for StderrOutsideUi {
    type Writer = EitherWriter<io::Stderr, io::Sink>;

    fn make_writer(&'a self) -> Self::Writer {
        if screen_owned() {
            EitherWriter::B(io::sink())
        } else {
            EitherWriter::A(io::stderr())
        }
    }
}

/// Install the global subscriber. The default level is `warn`; `perf`
/// additionally enables the timing scopes.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn init(log_file: Option<&Path>, perf: bool) -> Result<()> {
    let mut filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    if perf {
        filter = filter.add_directive("wysi::perf=debug".parse()?);
    }
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(StderrOutsideUi)
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_is_silenced_while_screen_is_owned() {
        let writer = StderrOutsideUi;
        assert!(matches!(writer.make_writer(), EitherWriter::A(_)));

        let guard = ScreenGuard::acquire();
        assert!(screen_owned());
        assert!(matches!(writer.make_writer(), EitherWriter::B(_)));

        drop(guard);
        assert!(!screen_owned());
        assert!(matches!(writer.make_writer(), EitherWriter::A(_)));
    }
}
