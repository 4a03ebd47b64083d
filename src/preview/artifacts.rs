use std::time::{Duration, Instant};

use tempfile::TempPath;

/// How long a browser preview file outlives its hand-off.
pub const BROWSER_GRACE: Duration = Duration::from_secs(10);

/// Deletes temporary preview files once the consumer has had time to read
/// them.
///
/// Deletion is best-effort: failures are logged and forgotten. Anything still
/// tracked when the reaper is dropped is deleted then.
#[derive(Debug)]
pub struct ArtifactReaper {
    grace: Duration,
    pending: Vec<(TempPath, Instant)>,
}

impl ArtifactReaper {
    pub const fn new(grace: Duration) -> Self {
        Self {
            grace,
            pending: Vec::new(),
        }
    }

    /// Schedule `path` for deletion one grace period after `now`.
    pub fn track(&mut self, path: TempPath, now: Instant) {
        self.pending.push((path, now + self.grace));
    }

    /// Delete every artifact whose grace period has elapsed. Returns how many
    /// were released.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let (due, keep): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(_, deadline)| *deadline <= now);
        self.pending = keep;
        let released = due.len();
        for (path, _) in due {
            let shown = path.display().to_string();
            if let Err(err) = path.close() {
                tracing::debug!(path = %shown, %err, "preview artifact cleanup failed");
            }
        }
        released
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for ArtifactReaper {
    fn default() -> Self {
        Self::new(BROWSER_GRACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn artifact() -> (TempPath, std::path::PathBuf) {
        let path = NamedTempFile::new().unwrap().into_temp_path();
        let owned = path.to_path_buf();
        (path, owned)
    }

    #[test]
    fn test_sweep_keeps_files_inside_grace_period() {
        let mut reaper = ArtifactReaper::new(Duration::from_secs(5));
        let start = Instant::now();
        let (path, on_disk) = artifact();
        reaper.track(path, start);

        assert_eq!(reaper.sweep(start + Duration::from_secs(4)), 0);
        assert!(on_disk.exists());
        assert_eq!(reaper.pending(), 1);
    }

    #[test]
    fn test_sweep_deletes_expired_files() {
        let mut reaper = ArtifactReaper::new(Duration::from_secs(5));
        let start = Instant::now();
        let (old, old_on_disk) = artifact();
        let (fresh, fresh_on_disk) = artifact();
        reaper.track(old, start);
        reaper.track(fresh, start + Duration::from_secs(3));

        assert_eq!(reaper.sweep(start + Duration::from_secs(5)), 1);
        assert!(!old_on_disk.exists());
        assert!(fresh_on_disk.exists());
    }

    #[test]
    fn test_already_deleted_artifact_is_ignored() {
        let mut reaper = ArtifactReaper::new(Duration::ZERO);
        let start = Instant::now();
        let (path, on_disk) = artifact();
        std::fs::remove_file(&on_disk).unwrap();
        reaper.track(path, start);

        assert_eq!(reaper.sweep(start), 1);
        assert_eq!(reaper.pending(), 0);
    }

    #[test]
    fn test_drop_deletes_remaining_artifacts() {
        let (path, on_disk) = artifact();
        {
            let mut reaper = ArtifactReaper::default();
            reaper.track(path, Instant::now());
        }
        assert!(!on_disk.exists());
    }
}
