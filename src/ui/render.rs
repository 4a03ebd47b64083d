use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::Model;
use crate::editor::{BufferKind, TAB_WIDTH};

use super::layout::{self, char_width, display_col, editor_text_rect, pane_inner, pane_rects};
use super::{overlays, status, style};

/// Draw the whole screen for `model`.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let panes = pane_rects(area);

    render_editor(model, frame, panes.editor);
    render_preview(model, frame, panes.preview);
    status::render_status_bar(model, frame, panes.footer);

    if let Some(prompt) = &model.prompt {
        overlays::render_prompt(prompt, frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn tab_titles(active: BufferKind) -> Line<'static> {
    let mut spans = Vec::new();
    for kind in BufferKind::ALL {
        spans.push(Span::styled(
            format!(" {}:{} ", kind.index() + 1, kind.title()),
            style::tab(kind == active),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buffer = model.active_buffer();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style::pane_border())
        .title(tab_titles(model.active));
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let total_lines = buffer.line_count();
    let inner = pane_inner(area);
    let text_area = editor_text_rect(area, total_lines);
    let gutter_area = Rect {
        width: text_area.x - inner.x,
        ..inner
    };
    let gutter_digits = usize::from(layout::line_number_width(total_lines));

    let scroll = model.active_scroll();
    let visible_height = usize::from(text_area.height);
    let start = scroll.row.min(total_lines);
    let end = (start + visible_height).min(total_lines);
    let cursor = buffer.cursor();

    let highlighted =
        crate::highlight::highlight_lines(buffer.kind().syntax(), &buffer.text(), end);

    let mut gutter = Vec::with_capacity(end - start);
    let mut content = Vec::with_capacity(end - start);
    for line_idx in start..end {
        gutter.push(Line::styled(
            format!("{:>gutter_digits$} ", line_idx + 1),
            style::gutter(line_idx == cursor.line),
        ));

        let cursor_col = (line_idx == cursor.line).then(|| {
            buffer
                .line_at(line_idx)
                .map_or(0, |text| display_col(&text, cursor.col))
        });
        let spans = highlighted
            .get(line_idx)
            .map_or(&[][..], |line| line.spans.as_slice());
        content.push(Line::from(clip_spans(
            spans,
            scroll.col,
            usize::from(text_area.width),
            cursor_col,
        )));
    }

    frame.render_widget(Paragraph::new(gutter), gutter_area);
    frame.render_widget(Paragraph::new(content), text_area);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let mode = model.session.composition_mode();
    let title = Line::from(vec![
        Span::styled(" Preview ", style::pane_title()),
        Span::styled(format!("[{}] ", mode.label()), style::dim()),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style::pane_border())
        .title(title);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let inner = pane_inner(area);
    let start = model.preview.scroll();
    let end = start + usize::from(inner.height);
    let lines: Vec<Line> =
        crate::highlight::highlight_lines("html", model.preview.document(), end)
            .into_iter()
            .skip(start)
            .map(|line| Line::from(clip_spans(&line.spans, 0, usize::from(inner.width), None)))
            .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Cut one line of styled text to the display columns
/// `[skip, skip + width)`, expanding tabs and painting the cursor cell.
pub(super) fn clip_spans(
    spans: &[Span<'_>],
    skip: usize,
    width: usize,
    cursor_col: Option<usize>,
) -> Vec<Span<'static>> {
    let end = skip + width;
    let mut out: Vec<Span<'static>> = Vec::new();
    let mut col = 0usize;

    for span in spans {
        for ch in span.content.chars() {
            let (text, cells) = if ch == '\t' {
                (" ".repeat(TAB_WIDTH), TAB_WIDTH)
            } else {
                (ch.to_string(), char_width(ch))
            };
            let visible = if cells == 0 {
                col > skip && col <= end
            } else {
                col >= skip && col + cells <= end
            };
            if visible {
                if cursor_col == Some(col) && cells > 0 {
                    let (first, rest) = text.split_at(text.chars().next().map_or(0, char::len_utf8));
                    push_cell(&mut out, first, style::cursor());
                    push_cell(&mut out, rest, span.style);
                } else {
                    push_cell(&mut out, &text, span.style);
                }
            }
            col += cells;
        }
    }

    if let Some(cursor) = cursor_col
        && cursor >= col
        && cursor >= skip
        && cursor < end
    {
        push_cell(&mut out, " ", style::cursor());
    }
    out
}

fn push_cell(out: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push_str(text),
        _ => out.push(Span::styled(text.to_string(), style)),
    }
}
