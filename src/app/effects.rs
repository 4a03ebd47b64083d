use std::path::{Path, PathBuf};

use crate::app::model::{EditorScroll, PathPurpose, Prompt};
use crate::app::{App, Message, Model, ToastLevel};
use crate::error::EditorError;
use crate::preview::{self, BrowserSink};
use crate::session::{PendingAction, Proceed, UnsavedChoice};

impl App {
    /// Run the I/O that follows `msg`, after [`crate::app::update`] has
    /// applied the pure part.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        browser: &mut BrowserSink,
        msg: &Message,
    ) {
        match msg {
            Message::New => Self::guard(model, PendingAction::New),
            Message::Open => Self::guard(model, PendingAction::Open),
            Message::Quit => Self::guard(model, PendingAction::Exit),
            Message::Save => Self::save(model, None),
            Message::SaveAs => {
                model.prompt = Some(Prompt::Path {
                    purpose: PathPurpose::SaveAs,
                    input: model.save_as_default(),
                    then: None,
                });
            }
            Message::ChooseUnsaved(choice) => Self::choose_unsaved(model, *choice),
            Message::SubmitPath => Self::submit_path(model),
            Message::CancelPrompt => {
                if let Some(Prompt::Path {
                    then: Some(action), ..
                }) = model.prompt.take()
                {
                    Self::abandon(model, action, &EditorError::UserCancelled);
                }
            }
            Message::OpenInBrowser => match preview::refresh(&model.session, browser) {
                Ok(()) => model.show_toast(ToastLevel::Info, "Opened in browser"),
                Err(err) => {
                    tracing::warn!(%err, "browser hand-off failed");
                    model.alert(&err);
                }
            },
            _ => {}
        }
    }

    /// Run `action`, asking first when it would discard unsaved changes.
    fn guard(model: &mut Model, action: PendingAction) {
        if model.session.needs_confirmation() {
            model.prompt = Some(Prompt::Unsaved { action });
        } else {
            Self::proceed(model, action);
        }
    }

    fn proceed(model: &mut Model, action: PendingAction) {
        match action {
            PendingAction::New => {
                model.session.reset();
                model.scroll = [EditorScroll::default(); 3];
                model.scheduler.request_refresh();
                model.refresh_preview();
                model.show_toast(ToastLevel::Info, "New file created");
            }
            PendingAction::Open => {
                model.prompt = Some(Prompt::Path {
                    purpose: PathPurpose::Open,
                    input: String::new(),
                    then: None,
                });
            }
            PendingAction::Exit => model.should_quit = true,
        }
    }

    fn choose_unsaved(model: &mut Model, choice: UnsavedChoice) {
        let Some(Prompt::Unsaved { action }) = model.prompt.take() else {
            return;
        };
        match model.session.resolve_unsaved(action, choice) {
            Ok(Proceed::Now) => Self::proceed(model, action),
            Ok(Proceed::AfterSave) => Self::save(model, Some(action)),
            Err(err) => Self::abandon(model, action, &err),
        }
    }

    /// Save to the bound path, or ask for one. `then` runs only after a
    /// successful save.
    fn save(model: &mut Model, then: Option<PendingAction>) {
        let Some(path) = model.session.path().map(Path::to_path_buf) else {
            model.prompt = Some(Prompt::Path {
                purpose: PathPurpose::SaveAs,
                input: model.save_as_default(),
                then,
            });
            return;
        };
        Self::save_then(model, &path, then);
    }

    fn save_then(model: &mut Model, path: &Path, then: Option<PendingAction>) {
        match model.session.save_to(path) {
            Ok(()) => {
                let name = model.session.display_name();
                model.show_toast(ToastLevel::Info, format!("Saved: {name}"));
                if let Some(action) = then {
                    Self::proceed(model, action);
                }
            }
            Err(err) => match then {
                Some(action) => Self::abandon(model, action, &err),
                None => {
                    tracing::warn!(%err, "save failed");
                    model.alert(&err);
                }
            },
        }
    }

    fn submit_path(model: &mut Model) {
        let Some(Prompt::Path {
            purpose,
            input,
            then,
        }) = model.prompt.take()
        else {
            return;
        };
        let input = input.trim();
        if input.is_empty() {
            if let Some(action) = then {
                Self::abandon(model, action, &EditorError::UserCancelled);
            }
            return;
        }
        let path = PathBuf::from(input);
        match purpose {
            PathPurpose::Open => match model.session.load_from(&path) {
                Ok(()) => {
                    model.scroll = [EditorScroll::default(); 3];
                    model.scheduler.request_refresh();
                    model.refresh_preview();
                    let name = model.session.display_name();
                    model.show_toast(ToastLevel::Info, format!("Opened: {name}"));
                }
                Err(err) => {
                    tracing::warn!(%err, "open failed");
                    model.alert(&err);
                }
            },
            PathPurpose::SaveAs => Self::save_then(model, &path, then),
        }
    }

    /// Drop a pending action whose save step did not go through.
    fn abandon(model: &mut Model, action: PendingAction, err: &EditorError) {
        match err {
            EditorError::UserCancelled => {
                tracing::debug!(?action, "pending action cancelled");
                model.show_toast(ToastLevel::Warning, format!("{} cancelled", action.label()));
            }
            _ => {
                tracing::warn!(?action, %err, "pending action aborted");
                model.alert(err);
            }
        }
    }
}
