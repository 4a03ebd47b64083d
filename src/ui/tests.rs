use super::*;
use crate::app::{Message, Model, update};
use crate::editor::BufferKind;
use crate::session::Session;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(100, 30)).unwrap()
}

fn model_with(messages: impl IntoIterator<Item = Message>) -> Model {
    let mut model = Model::new(Session::new(), (100, 30));
    for msg in messages {
        model = update(model, msg);
    }
    model
}

fn type_text(text: &str) -> Vec<Message> {
    text.chars().map(Message::EditorInsertChar).collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn draw(model: &Model) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    screen_text(&terminal)
}

#[test]
fn test_render_shows_tabs_status_and_preview_title() {
    let screen = draw(&Model::new(Session::new(), (100, 30)));
    assert!(screen.contains("1:HTML"));
    assert!(screen.contains("2:CSS"));
    assert!(screen.contains("3:JavaScript"));
    assert!(screen.contains("Preview"));
    assert!(screen.contains("mode:skeleton"));
    assert!(screen.contains("refresh:auto"));
}

#[test]
fn test_render_shows_typed_text_with_line_numbers() {
    let mut messages = type_text("<h1>Hi</h1>");
    messages.push(Message::EditorSplitLine);
    messages.extend(type_text("<p>there</p>"));
    let model = model_with(messages);

    let screen = draw(&model);
    assert!(screen.contains("1 <h1>Hi</h1>"));
    assert!(screen.contains("2 <p>there</p>"));
    assert!(screen.contains("wysi *"));
}

#[test]
fn test_preview_pane_shows_composed_document_after_refresh() {
    let mut messages = type_text("<b>x</b>");
    messages.push(Message::RefreshPreview);
    let model = model_with(messages);

    let screen = draw(&model);
    assert!(screen.contains("<!DOCTYPE html>"));
    assert!(screen.contains("<title>Preview</title>"));
}

#[test]
fn test_preview_title_reports_marker_mode() {
    let mut messages = type_text(r#"<style id="custom-css"></style><script id="custom-js"></script>"#);
    messages.push(Message::RefreshPreview);
    let model = model_with(messages);

    let screen = draw(&model);
    assert!(screen.contains("[markers]"));
    assert!(screen.contains("mode:markers"));
}

#[test]
fn test_selected_tab_shows_its_own_buffer() {
    let mut messages = type_text("<p>markup</p>");
    messages.push(Message::SelectTab(BufferKind::Styles));
    messages.extend(type_text("p { color: red; }"));
    let model = model_with(messages);

    let screen = draw(&model);
    assert!(screen.contains("p { color: red; }"));
    assert!(screen.contains("[CSS]"));
}

#[test]
fn test_long_line_scrolls_horizontally_to_cursor() {
    let line = format!("{}END", "x".repeat(120));
    let model = model_with(type_text(&line));

    let screen = draw(&model);
    assert!(screen.contains("END"));
    let scroll = model.active_scroll();
    assert!(scroll.col > 0);
}

#[test]
fn test_help_overlay_lists_commands() {
    let model = model_with([Message::ToggleHelp]);
    let screen = draw(&model);
    assert!(screen.contains("Help"));
    assert!(screen.contains("Toggle auto-refresh"));
    assert!(screen.contains("Open in browser"));
}

#[test]
fn test_alert_overlay_shows_error_message() {
    let mut model = Model::new(Session::new(), (100, 30));
    model.alert(&crate::error::EditorError::file_io(
        "/nowhere/page.html",
        std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    ));
    let screen = draw(&model);
    assert!(screen.contains("File Error"));
    assert!(screen.contains("/nowhere/page.html: not found"));
    assert!(screen.contains("Press any key"));
}

#[test]
fn test_status_text_tracks_cursor_and_manual_mode() {
    let model = model_with(
        type_text("ab")
            .into_iter()
            .chain([Message::ToggleAutoRefresh]),
    );
    let text = status_text(&model);
    assert!(text.contains("Ln 1, Col 3"));
    assert!(text.contains("refresh:manual"));
}

#[test]
fn test_tiny_terminal_renders_without_panic() {
    let model = model_with(type_text("<p>x</p>"));
    let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
