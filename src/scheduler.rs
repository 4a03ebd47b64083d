//! Debounced preview refresh policy.
//!
//! The scheduler never looks at a clock. Callers pass milliseconds since the
//! event loop started, which keeps the policy deterministic under test.

use std::time::Duration;

/// Quiescence window used when no configuration overrides it.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(1000);

/// Whether an operation asks for a refresh right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    Immediate,
    Idle,
}

/// Decides when the composed document is pushed to the preview.
///
/// At most one deadline is pending. Every edit re-arms it, so a burst of
/// edits produces a single refresh timed from the last one.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    quiescence_ms: u64,
    auto_refresh: bool,
    deadline: Option<u64>,
}

impl RefreshScheduler {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence_ms: u64::try_from(quiescence.as_millis()).unwrap_or(u64::MAX),
            auto_refresh: true,
            deadline: None,
        }
    }

    pub const fn quiescence_ms(&self) -> u64 {
        self.quiescence_ms
    }

    pub const fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh
    }

    /// Record a buffer edit. Returns `true` if a deadline was armed.
    pub const fn note_edit(&mut self, now_ms: u64) -> bool {
        if !self.auto_refresh {
            return false;
        }
        self.deadline = Some(now_ms.saturating_add(self.quiescence_ms));
        true
    }

    /// Returns true once when the pending deadline has elapsed.
    pub const fn take_due(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Explicit refresh. Always immediate; the pending deadline is dropped
    /// because the refresh already includes every edit it was waiting on.
    pub const fn request_refresh(&mut self) -> RefreshDecision {
        self.deadline = None;
        RefreshDecision::Immediate
    }

    /// Turn auto-refresh on or off.
    ///
    /// Switching on asks for an immediate refresh; switching off cancels the
    /// pending deadline. Setting the current value again does nothing.
    pub const fn set_auto_refresh(&mut self, enabled: bool) -> RefreshDecision {
        if enabled == self.auto_refresh {
            return RefreshDecision::Idle;
        }
        self.auto_refresh = enabled;
        if enabled {
            RefreshDecision::Immediate
        } else {
            self.deadline = None;
            RefreshDecision::Idle
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Milliseconds until the pending deadline, if any.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.deadline.map(|deadline| deadline.saturating_sub(now_ms))
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(scheduler: &mut RefreshScheduler, from_ms: u64, to_ms: u64) -> Vec<u64> {
        (from_ms..=to_ms)
            .filter(|now| scheduler.take_due(*now))
            .collect()
    }

    #[test]
    fn test_new_scheduler_is_idle_with_auto_refresh_on() {
        let scheduler = RefreshScheduler::default();
        assert!(scheduler.auto_refresh_enabled());
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.quiescence_ms(), 1000);
    }

    #[test]
    fn test_single_edit_fires_after_window() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        assert!(scheduler.note_edit(50));
        assert!(!scheduler.take_due(149));
        assert!(scheduler.take_due(150));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_edit_burst_coalesces_into_one_refresh_from_last_edit() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        for now in [0, 30, 60, 90] {
            scheduler.note_edit(now);
            assert!(!scheduler.take_due(now));
        }

        let fired = drive(&mut scheduler, 91, 1000);
        assert_eq!(fired, vec![190]);
    }

    #[test]
    fn test_auto_refresh_off_ignores_edits() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        scheduler.set_auto_refresh(false);
        for now in 0..50 {
            assert!(!scheduler.note_edit(now * 10));
        }

        assert!(drive(&mut scheduler, 0, 2000).is_empty());
    }

    #[test]
    fn test_explicit_refresh_fires_once_per_request_when_disabled() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        scheduler.set_auto_refresh(false);

        assert_eq!(scheduler.request_refresh(), RefreshDecision::Immediate);
        assert_eq!(scheduler.request_refresh(), RefreshDecision::Immediate);
        assert!(drive(&mut scheduler, 0, 1000).is_empty());
    }

    #[test]
    fn test_explicit_refresh_drops_pending_deadline() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        scheduler.note_edit(0);
        assert_eq!(scheduler.request_refresh(), RefreshDecision::Immediate);
        assert!(!scheduler.is_pending());
        assert!(drive(&mut scheduler, 0, 500).is_empty());
    }

    #[test]
    fn test_disabling_cancels_pending_deadline() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        scheduler.note_edit(0);
        assert_eq!(scheduler.set_auto_refresh(false), RefreshDecision::Idle);
        assert!(!scheduler.is_pending());
        assert!(drive(&mut scheduler, 0, 500).is_empty());
    }

    #[test]
    fn test_enabling_requests_immediate_refresh() {
        let mut scheduler = RefreshScheduler::default();
        scheduler.set_auto_refresh(false);
        assert_eq!(scheduler.set_auto_refresh(true), RefreshDecision::Immediate);
    }

    #[test]
    fn test_reasserting_current_state_is_idle() {
        let mut scheduler = RefreshScheduler::default();
        scheduler.note_edit(0);
        assert_eq!(scheduler.set_auto_refresh(true), RefreshDecision::Idle);
        assert!(scheduler.is_pending(), "re-enabling must not drop the deadline");
    }

    #[test]
    fn test_remaining_ms_counts_down() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        assert_eq!(scheduler.remaining_ms(0), None);
        scheduler.note_edit(10);
        assert_eq!(scheduler.remaining_ms(40), Some(70));
        assert_eq!(scheduler.remaining_ms(500), Some(0));
    }
}
