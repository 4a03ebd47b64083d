use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::model::Prompt;
use crate::app::{App, Message, Model};
use crate::editor::{BufferKind, Direction};
use crate::session::UnsavedChoice;

use super::event_loop::ResizeDebouncer;

const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if let Some(prompt) = &model.prompt {
            return Self::handle_prompt_key(key, prompt);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if ctrl && !alt {
            return match key.code {
                KeyCode::Char('n') => Some(Message::New),
                KeyCode::Char('o') => Some(Message::Open),
                KeyCode::Char('s') if shift => Some(Message::SaveAs),
                KeyCode::Char('S') => Some(Message::SaveAs),
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                KeyCode::Char('b') => Some(Message::OpenInBrowser),
                KeyCode::Char('1') => Some(Message::SelectTab(BufferKind::Markup)),
                KeyCode::Char('2') => Some(Message::SelectTab(BufferKind::Styles)),
                KeyCode::Char('3') => Some(Message::SelectTab(BufferKind::Script)),
                KeyCode::Tab | KeyCode::PageDown => Some(Message::NextTab),
                KeyCode::BackTab | KeyCode::PageUp => Some(Message::PrevTab),
                KeyCode::Home => Some(Message::EditorMoveToStart),
                KeyCode::End => Some(Message::EditorMoveToEnd),
                KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
                KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::SelectTab(BufferKind::Markup)),
            KeyCode::F(3) => Some(Message::SelectTab(BufferKind::Styles)),
            KeyCode::F(4) => Some(Message::SelectTab(BufferKind::Script)),
            KeyCode::F(5) => Some(Message::RefreshPreview),
            KeyCode::F(6) => Some(Message::ToggleAutoRefresh),
            KeyCode::F(12) => Some(Message::SaveAs),
            KeyCode::BackTab => Some(Message::PrevTab),

            KeyCode::Char(c) => Some(Message::EditorInsertChar(c)),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Tab => Some(Message::EditorInsertTab),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorPageUp),
            KeyCode::PageDown => Some(Message::EditorPageDown),
            _ => None,
        }
    }

    fn handle_prompt_key(key: KeyEvent, prompt: &Prompt) -> Option<Message> {
        match prompt {
            Prompt::Alert { .. } => Some(Message::DismissAlert),
            Prompt::Unsaved { .. } => match key.code {
                KeyCode::Char('y' | 'Y' | 's' | 'S') | KeyCode::Enter => {
                    Some(Message::ChooseUnsaved(UnsavedChoice::Save))
                }
                KeyCode::Char('n' | 'N' | 'd' | 'D') => {
                    Some(Message::ChooseUnsaved(UnsavedChoice::Discard))
                }
                KeyCode::Char('c' | 'C') | KeyCode::Esc => {
                    Some(Message::ChooseUnsaved(UnsavedChoice::Cancel))
                }
                _ => None,
            },
            Prompt::Path { input, .. } => match key.code {
                KeyCode::Enter => Some(Message::SubmitPath),
                KeyCode::Esc => Some(Message::CancelPrompt),
                KeyCode::Backspace => {
                    let mut next = input.clone();
                    next.pop();
                    Some(Message::PathInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = input.clone();
                    next.push(c);
                    Some(Message::PathInput(next))
                }
                _ => None,
            },
        }
    }

    fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        match &model.prompt {
            Some(Prompt::Path { input, .. }) => {
                let mut next = input.clone();
                next.extend(text.chars().filter(|c| !c.is_control()));
                Some(Message::PathInput(next))
            }
            Some(_) => None,
            None if text.is_empty() => None,
            None => Some(Message::EditorPaste(text.to_string())),
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.prompt.is_some() || model.help_visible {
            return None;
        }
        let (width, height) = model.terminal_size;
        let panes = crate::ui::pane_rects(Rect::new(0, 0, width, height));
        let in_editor = point_in_rect(mouse.column, mouse.row, panes.editor);
        let in_preview = point_in_rect(mouse.column, mouse.row, panes.preview);

        match mouse.kind {
            MouseEventKind::ScrollUp if in_preview => Some(Message::PreviewScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown if in_preview => {
                Some(Message::PreviewScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if in_editor => Some(Message::EditorScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown if in_editor => Some(Message::EditorScrollDown(WHEEL_LINES)),
            MouseEventKind::Down(MouseButton::Left) if in_editor => {
                editor_position_at(model, panes.editor, mouse.column, mouse.row)
                    .map(|(line, col)| Message::EditorMoveTo(line, col))
            }
            _ => None,
        }
    }
}

const fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Buffer position (line, char column) under a click in the editor pane.
fn editor_position_at(model: &Model, editor_pane: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
    let buffer = model.active_buffer();
    let text = crate::ui::editor_text_rect(editor_pane, buffer.line_count());
    if !point_in_rect(x, y, text) {
        return None;
    }
    let scroll = model.active_scroll();
    let line = scroll.row + usize::from(y - text.y);
    let line = line.min(buffer.line_count().saturating_sub(1));
    let display_col = scroll.col + usize::from(x - text.x);
    let col = buffer
        .line_at(line)
        .map_or(0, |text| crate::ui::char_at_display_col(&text, display_col));
    Some((line, col))
}
