use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::{Model, Prompt};

use super::style;

pub fn render_prompt(prompt: &Prompt, frame: &mut Frame, area: Rect) {
    match prompt {
        Prompt::Unsaved { action } => {
            let lines = vec![
                Line::raw(action.question()),
                Line::raw(""),
                Line::from(vec![
                    Span::styled("y", style::section()),
                    Span::raw(" save   "),
                    Span::styled("n", style::section()),
                    Span::raw(" discard   "),
                    Span::styled("c/Esc", style::section()),
                    Span::raw(" cancel"),
                ]),
            ];
            render_dialog(frame, area, "Save Changes", lines, style::popup());
        }
        Prompt::Path {
            purpose,
            input,
            then,
        } => {
            let mut lines = vec![
                Line::from(vec![
                    Span::raw("Path: "),
                    Span::raw(input.clone()),
                    Span::styled(" ", style::cursor()),
                ]),
                Line::raw(""),
            ];
            if let Some(action) = then {
                lines.push(Line::styled(
                    format!("{} continues after saving", action.label()),
                    style::dim(),
                ));
            }
            lines.push(Line::styled("Enter accept \u{2502} Esc cancel", style::dim()));
            render_dialog(frame, area, purpose.title(), lines, style::popup());
        }
        Prompt::Alert { title, message } => {
            let lines = vec![
                Line::raw(message.clone()),
                Line::raw(""),
                Line::styled("Press any key", style::dim()),
            ];
            let alert_style = Style::default().bg(Color::Black).fg(Color::Red);
            render_dialog(frame, area, title, lines, alert_style);
        }
    }
}

fn render_dialog(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'_>>, style: Style) {
    let popup_width = area.width.saturating_sub(8).clamp(20, 72);
    // Wrapped text may need a few extra rows
    #[allow(clippy::cast_possible_truncation)]
    let needed_rows = lines.len() as u16 + 6;
    let popup = centered_popup_rect(popup_width, needed_rows, area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(style);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = style::section();
    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("File", section_style));
    all_lines.push(Line::raw("  Ctrl-n              New"));
    all_lines.push(Line::raw("  Ctrl-o              Open"));
    all_lines.push(Line::raw("  Ctrl-s              Save"));
    all_lines.push(Line::raw("  Ctrl-Shift-s / F12  Save as"));
    all_lines.push(Line::raw("  Ctrl-q              Exit"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Preview", section_style));
    all_lines.push(Line::raw("  F5                  Refresh now"));
    all_lines.push(Line::raw("  F6                  Toggle auto-refresh"));
    all_lines.push(Line::raw("  Ctrl-b              Open in browser"));
    all_lines.push(Line::raw("  Mouse wheel         Scroll pane"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Tabs", section_style));
    all_lines.push(Line::raw("  Ctrl-1/2/3, F2/F3/F4  HTML / CSS / JavaScript"));
    all_lines.push(Line::raw("  Ctrl-Tab / Shift-Tab  Next / previous"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  PageUp/PageDown     Move one screen"));
    all_lines.push(Line::raw("  Tab                 Insert spaces"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Markers", section_style));
    all_lines.push(Line::raw("  <style id=\"custom-css\"> and <script id=\"custom-js\">"));
    all_lines.push(Line::raw("  in the HTML receive the CSS and JavaScript;"));
    all_lines.push(Line::raw("  otherwise a page skeleton wraps everything."));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(style::popup());

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .take(usize::from(content_height))
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", style::dim());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
