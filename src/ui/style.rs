//! Colors for the editor chrome.
//!
//! Uses ANSI colors that adapt to the terminal's palette, with darker
//! indexed colors when the background is light.

use ratatui::style::{Color, Modifier, Style};

fn accent() -> Color {
    if crate::highlight::is_light_background() {
        Color::Indexed(24)
    } else {
        Color::Cyan
    }
}

pub fn cursor() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn gutter(current_line: bool) -> Style {
    if current_line {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn tab(active: bool) -> Style {
    if active {
        Style::default()
            .fg(accent())
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Indexed(245))
    }
}

pub fn pane_border() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn pane_title() -> Style {
    Style::default().fg(accent()).add_modifier(Modifier::BOLD)
}

pub fn status_bar() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn popup() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

pub fn section() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().fg(Color::Indexed(245))
}
