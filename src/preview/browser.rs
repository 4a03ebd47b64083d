use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::error::{EditorError, Result};

use super::{ArtifactReaper, RenderSink};

/// Launches a viewer for a URL.
pub type Opener = Box<dyn FnMut(&str) -> std::io::Result<()>>;

/// Out-of-process preview in the system browser.
///
/// Each presentation writes the document to a fresh temporary `.html` file,
/// hands its `file://` URL to the opener and leaves the file to the reaper.
pub struct BrowserSink {
    opener: Opener,
    reaper: ArtifactReaper,
}

impl BrowserSink {
    /// A sink that uses the platform's default opener.
    pub fn system() -> Self {
        Self::with_opener(Box::new(open_external))
    }

    pub fn with_opener(opener: Opener) -> Self {
        Self {
            opener,
            reaper: ArtifactReaper::default(),
        }
    }

    /// Delete artifacts whose grace period has run out.
    pub fn sweep(&mut self, now: Instant) -> usize {
        self.reaper.sweep(now)
    }

    pub fn pending_artifacts(&self) -> usize {
        self.reaper.pending()
    }
}

impl RenderSink for BrowserSink {
    fn present(&mut self, document: &str) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("wysi-preview-")
            .suffix(".html")
            .tempfile()
            .map_err(EditorError::RenderSetup)?;
        file.write_all(document.as_bytes())
            .and_then(|()| file.flush())
            .map_err(EditorError::RenderSetup)?;
        let path = file.into_temp_path();
        let url = file_url(&path);

        (self.opener)(&url).map_err(EditorError::RenderSetup)?;
        tracing::info!(%url, "opened preview in browser");
        self.reaper.track(path, Instant::now());
        Ok(())
    }
}

impl std::fmt::Debug for BrowserSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSink")
            .field("reaper", &self.reaper)
            .finish_non_exhaustive()
    }
}

/// `file://` URL for a local path, made absolute first.
pub fn file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

/// Open `url` with the platform's default handler.
///
/// # Errors
/// Returns an error if the opener process cannot be spawned or exits with a
/// failure status.
pub fn open_external(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        run_opener(std::process::Command::new("open").arg(url))
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        // `start` detaches, so only a failure to spawn is visible
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        run_opener(std::process::Command::new("xdg-open").arg(url))
    }
}

/// Run an opener to completion and turn a failure status into an error.
#[cfg_attr(target_os = "windows", allow(dead_code))]
fn run_opener(command: &mut std::process::Command) -> std::io::Result<()> {
    use std::process::Stdio;
    let program = command.get_program().to_string_lossy().to_string();
    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{program} failed ({status})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_sink() -> (BrowserSink, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let sink = BrowserSink::with_opener(Box::new(move |url: &str| {
            log.borrow_mut().push(url.to_string());
            Ok(())
        }));
        (sink, seen)
    }

    #[test]
    fn test_present_writes_html_file_and_opens_it() {
        let (mut sink, seen) = recording_sink();
        sink.present("<p>browser</p>").unwrap();

        let urls = seen.borrow();
        assert_eq!(urls.len(), 1);
        let path = urls[0].strip_prefix("file://").unwrap();
        assert!(path.ends_with(".html"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>browser</p>");
        assert_eq!(sink.pending_artifacts(), 1);
    }

    #[test]
    fn test_each_present_gets_its_own_artifact() {
        let (mut sink, seen) = recording_sink();
        sink.present("one").unwrap();
        sink.present("two").unwrap();
        let urls = seen.borrow();
        assert_ne!(urls[0], urls[1]);
        assert_eq!(sink.pending_artifacts(), 2);
    }

    #[test]
    fn test_opener_failure_is_render_setup_error_and_file_is_removed() {
        let path_seen = Rc::new(RefCell::new(None::<String>));
        let log = Rc::clone(&path_seen);
        let mut sink = BrowserSink::with_opener(Box::new(move |url: &str| {
            *log.borrow_mut() = Some(url.to_string());
            Err(std::io::Error::other("no browser"))
        }));

        let err = sink.present("x").unwrap_err();

        assert!(matches!(err, EditorError::RenderSetup(_)));
        assert_eq!(sink.pending_artifacts(), 0);
        let url = path_seen.borrow().clone().unwrap();
        assert!(!Path::new(url.strip_prefix("file://").unwrap()).exists());
    }

    #[test]
    fn test_sweep_after_grace_removes_artifact() {
        let (mut sink, seen) = recording_sink();
        sink.present("bye").unwrap();
        let url = seen.borrow()[0].clone();

        let later = Instant::now() + super::super::BROWSER_GRACE;
        assert_eq!(sink.sweep(later), 1);
        assert!(!Path::new(url.strip_prefix("file://").unwrap()).exists());
    }

    #[test]
    fn test_file_url_is_absolute() {
        let url = file_url(Path::new("relative.html"));
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("relative.html"));
        assert!(Path::new(url.strip_prefix("file://").unwrap()).is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_opener_exit_status_is_checked() {
        use std::process::Command;

        assert!(run_opener(Command::new("sh").args(["-c", "exit 0"])).is_ok());
        let err = run_opener(Command::new("sh").args(["-c", "exit 3"])).unwrap_err();
        assert!(err.to_string().contains("sh failed"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_opener_command_surfaces_as_render_setup_error() {
        use std::process::Command;

        let mut sink = BrowserSink::with_opener(Box::new(|url: &str| {
            run_opener(Command::new("sh").args(["-c", "exit 3", "opener"]).arg(url))
        }));
        let err = sink.present("<p>x</p>").unwrap_err();
        assert!(matches!(err, EditorError::RenderSetup(_)));
        assert_eq!(sink.pending_artifacts(), 0);
    }
}
