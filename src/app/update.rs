use crate::app::Model;
use crate::app::model::Prompt;
use crate::app::ToastLevel;
use crate::editor::{BufferKind, Direction, SourceBuffer};
use crate::scheduler::RefreshDecision;
use crate::session::UnsavedChoice;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // File
    /// Start a new document
    New,
    /// Open a file into the markup buffer
    Open,
    /// Save to the bound file, or ask for one
    Save,
    /// Save under a new path
    SaveAs,
    /// Quit the application
    Quit,

    // Prompts
    /// Answer the unsaved-changes prompt
    ChooseUnsaved(UnsavedChoice),
    /// Replace the text of the path prompt
    PathInput(String),
    /// Accept the path prompt
    SubmitPath,
    /// Dismiss the path prompt
    CancelPrompt,
    /// Dismiss the error alert
    DismissAlert,

    // Preview
    /// Compose and show the document now
    RefreshPreview,
    /// Hand the composed document to the system browser
    OpenInBrowser,
    /// Turn auto-refresh on or off
    ToggleAutoRefresh,
    /// Scroll the preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll the preview down by n lines
    PreviewScrollDown(usize),

    // Tabs
    /// Show the given buffer in the editor pane
    SelectTab(BufferKind),
    /// Cycle to the next buffer
    NextTab,
    /// Cycle to the previous buffer
    PrevTab,

    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert pasted text at the cursor
    EditorPaste(String),
    /// Insert spaces up to the tab width
    EditorInsertTab,
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    /// Move cursor to absolute position (line, col), e.g. from a mouse click
    EditorMoveTo(usize, usize),
    /// Move cursor up one screen
    EditorPageUp,
    /// Move cursor down one screen
    EditorPageDown,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. File and
/// browser I/O happens afterwards in the side-effect handler. Refreshing the
/// embedded preview only composes a string, so it happens here.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Handled with side effects
        Message::New
        | Message::Open
        | Message::Save
        | Message::SaveAs
        | Message::Quit
        | Message::ChooseUnsaved(_)
        | Message::SubmitPath
        | Message::CancelPrompt
        | Message::OpenInBrowser
        | Message::Redraw => {}

        Message::PathInput(text) => {
            if let Some(Prompt::Path { input, .. }) = &mut model.prompt {
                *input = text;
            }
        }
        Message::DismissAlert => {
            if matches!(model.prompt, Some(Prompt::Alert { .. })) {
                model.prompt = None;
            }
        }

        // Preview
        Message::RefreshPreview => {
            model.scheduler.request_refresh();
            model.refresh_preview();
        }
        Message::ToggleAutoRefresh => {
            let enable = !model.scheduler.auto_refresh_enabled();
            if model.scheduler.set_auto_refresh(enable) == RefreshDecision::Immediate {
                model.refresh_preview();
            }
            let state = if enable { "enabled" } else { "disabled" };
            model.show_toast(ToastLevel::Info, format!("Auto-refresh {state}"));
        }
        Message::PreviewScrollUp(n) => model.preview.scroll_up(n),
        Message::PreviewScrollDown(n) => model.preview.scroll_down(n),

        // Tabs
        Message::SelectTab(kind) => model.active = kind,
        Message::NextTab => model.active = model.active.next(),
        Message::PrevTab => model.active = model.active.prev(),

        // Editor
        Message::EditorInsertChar(ch) => model.edit_active(|buf| buf.insert_char(ch)),
        Message::EditorPaste(text) => model.edit_active(|buf| buf.insert_str(&text)),
        Message::EditorInsertTab => model.edit_active(SourceBuffer::insert_tab),
        Message::EditorDeleteBack => model.edit_active(SourceBuffer::delete_back),
        Message::EditorDeleteForward => model.edit_active(SourceBuffer::delete_forward),
        Message::EditorSplitLine => model.edit_active(SourceBuffer::split_line),
        Message::EditorMoveCursor(dir) => model.navigate_active(|buf| buf.move_cursor(dir)),
        Message::EditorMoveHome => model.navigate_active(SourceBuffer::move_home),
        Message::EditorMoveEnd => model.navigate_active(SourceBuffer::move_end),
        Message::EditorMoveToStart => model.navigate_active(SourceBuffer::move_to_start),
        Message::EditorMoveToEnd => model.navigate_active(SourceBuffer::move_to_end),
        Message::EditorMoveTo(line, col) => model.navigate_active(|buf| buf.move_to(line, col)),
        Message::EditorPageUp => page(&mut model, Direction::Up),
        Message::EditorPageDown => page(&mut model, Direction::Down),
        Message::EditorScrollUp(n) => {
            let scroll = &mut model.scroll[model.active.index()];
            scroll.row = scroll.row.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let max = model.active_buffer().line_count().saturating_sub(1);
            let scroll = &mut model.scroll[model.active.index()];
            scroll.row = (scroll.row + n).min(max);
        }

        // Window
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.follow_cursor();
        }
    }
    model
}

/// Move the cursor one editor screen up or down.
fn page(model: &mut Model, dir: Direction) {
    let rows = crate::ui::editor_text_rows(model.terminal_size.1).max(1);
    model.navigate_active(|buf| {
        for _ in 0..rows {
            buf.move_cursor(dir);
        }
    });
}
