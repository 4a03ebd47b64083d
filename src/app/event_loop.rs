use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::error::EditorError;
use crate::preview::BrowserSink;
use crate::scheduler::RefreshScheduler;
use crate::session::Session;

/// Idle poll interval when nothing is pending.
const IDLE_POLL_MS: u64 = 250;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// How long the loop may block in `poll` before something is due.
pub(super) fn poll_timeout_ms(
    needs_render: bool,
    resize_pending: bool,
    refresh_remaining_ms: Option<u64>,
) -> u64 {
    if needs_render {
        return 0;
    }
    let mut timeout = if resize_pending { 10 } else { IDLE_POLL_MS };
    if let Some(remaining) = refresh_remaining_ms {
        timeout = timeout.min(remaining);
    }
    timeout
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let (session, launch_error) = self.initial_session();

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - wysi requires an interactive terminal")?;
        let screen = crate::logging::ScreenGuard::acquire();
        let size = terminal.size()?;
        drop(init_scope);

        let mut scheduler = RefreshScheduler::new(self.refresh_delay);
        scheduler.set_auto_refresh(self.auto_refresh);
        let mut model = Model::new(session, (size.width, size.height)).with_scheduler(scheduler);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model.refresh_preview();
        if let Some(err) = launch_error {
            model.alert(&err);
        }

        let mut browser = BrowserSink::system();
        let result = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, &mut model, &mut browser));

        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();
        drop(screen);

        let leftover = browser.pending_artifacts();
        drop(browser);
        if leftover > 0 {
            tracing::debug!(leftover, "removed remaining preview artifacts");
        }
        result
    }

    /// The session to start with: the launch file if it exists, a session
    /// bound to it if it does not, and an untitled one otherwise. A launch
    /// file that exists but cannot be read yields an untitled session and
    /// the error, so a later Save cannot clobber it.
    pub(super) fn initial_session(&self) -> (Session, Option<EditorError>) {
        let Some(path) = &self.file_path else {
            return (Session::new(), None);
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "starting new document");
            return (Session::bound_to(path.clone()), None);
        }
        let mut session = Session::new();
        match session.load_from(path) {
            Ok(()) => (session, None),
            Err(err) => {
                tracing::warn!(%err, "could not load launch file");
                (Session::new(), Some(err))
            }
        }
    }

    pub(super) fn dispatch(model: &mut Model, browser: &mut BrowserSink, msg: Message, now_ms: u64) {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, browser, &side_msg);
        if model.take_edit_notice() {
            model.scheduler.note_edit(now_ms);
        }
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        browser: &mut BrowserSink,
    ) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            let now = Instant::now();
            if model.expire_toast(now) {
                needs_render = true;
            }
            browser.sweep(now);

            let now_ms = elapsed_ms();

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if model.scheduler.take_due(now_ms) {
                let _scope = crate::perf::scope("app.auto_refresh");
                model.refresh_preview();
                needs_render = true;
            }

            let poll_ms = poll_timeout_ms(
                needs_render,
                resize_debouncer.is_pending(),
                model.scheduler.remaining_ms(now_ms),
            );
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so debouncers use accurate times.
                let event_ms = elapsed_ms();
                let msg =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    Self::dispatch(model, browser, msg, event_ms);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = elapsed_ms();
                    let msg =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        Self::dispatch(model, browser, msg, drain_ms);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    tracing::trace!(frame = frame_idx, drained, "drained events");
                }
            }

            if needs_render {
                frame_idx += 1;
                let _scope = crate::perf::scope("frame.draw");
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
