use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};

use super::style;

/// Left-hand status text: title, tab, cursor, composition mode, refresh state.
pub fn status_text(model: &Model) -> String {
    let cursor = model.active_buffer().cursor();
    let refresh = if model.scheduler.auto_refresh_enabled() {
        "auto"
    } else {
        "manual"
    };
    let pending = if model.scheduler.is_pending() { "*" } else { "" };
    format!(
        " {}  [{}]  Ln {}, Col {}  mode:{}  refresh:{}{}  F1:help",
        model.session.title(),
        model.active.title(),
        cursor.line + 1,
        cursor.col + 1,
        model.session.composition_mode().label(),
        refresh,
        pending,
    )
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let toast = model.active_toast().map(|(message, level)| {
        let (prefix, style) = toast_style(level);
        (format!(" {prefix} {message} "), style)
    });
    let toast_width = toast.as_ref().map_or(0, |(text, _)| {
        u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width / 2)
    });

    let status_area = Rect {
        width: area.width - toast_width,
        ..area
    };
    let status_bar = Paragraph::new(status_text(model)).style(style::status_bar());
    frame.render_widget(status_bar, status_area);

    if let Some((text, style)) = toast {
        let toast_area = Rect {
            x: area.x + status_area.width,
            width: toast_width,
            ..area
        };
        frame.render_widget(Paragraph::new(text).style(style), toast_area);
    }
}

fn toast_style(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", Style::default().bg(Color::Blue).fg(Color::White)),
        ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
    }
}
