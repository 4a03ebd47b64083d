//! Syntax highlighting for the source editors and the composed preview.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions.

use std::sync::{Mutex, OnceLock};

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Highlight the first `limit` lines of `text` as `syntax` (a syntect token
/// such as `html`, `css` or `js`).
///
/// Highlighting always starts at the top of the text because syntect's
/// parse state depends on every preceding line. Unknown syntaxes come back
/// unstyled.
pub fn highlight_lines(syntax: &str, text: &str, limit: usize) -> Vec<Line<'static>> {
    let syntax_set = syntax_set();
    let Some(syntax) = syntax_set
        .find_syntax_by_token(syntax)
        .or_else(|| syntax_set.find_syntax_by_name(syntax))
    else {
        return text
            .lines()
            .take(limit)
            .map(|line| Line::raw(line.to_string()))
            .collect();
    };

    let mode = background_mode();
    let mut highlighter = HighlightLines::new(syntax, theme());
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(text).take(limit) {
        let ranges = highlighter
            .highlight_line(line, syntax_set)
            .unwrap_or_default();
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .filter_map(|(style, piece)| {
                let piece = piece.trim_end_matches(['\n', '\r']);
                if piece.is_empty() {
                    return None;
                }
                let fg = adjust_fg_for_background(
                    (style.foreground.r, style.foreground.g, style.foreground.b),
                    mode,
                );
                Some(Span::styled(
                    piece.to_string(),
                    Style::default().fg(Color::Rgb(fg.0, fg.1, fg.2)),
                ))
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.theme.load_defaults");
        let theme_set = ThemeSet::load_defaults();
        let preferred = match background_mode() {
            BackgroundMode::Dark => ["base16-ocean.dark", "base16-eighties.dark", "Solarized (dark)"]
                .as_slice(),
            BackgroundMode::Light => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"]
                .as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

/// Force the highlight background, or `None` to detect it from `COLORFGBG`.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

/// Whether highlighting targets a light terminal background.
pub fn is_light_background() -> bool {
    background_mode() == BackgroundMode::Light
}

fn background_mode() -> BackgroundMode {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock()
        && let Some(mode) = *guard
    {
        return match mode {
            HighlightBackground::Light => BackgroundMode::Light,
            HighlightBackground::Dark => BackgroundMode::Dark,
        };
    }
    background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn adjust_fg_for_background((r, g, b): (u8, u8, u8), mode: BackgroundMode) -> (u8, u8, u8) {
    match mode {
        BackgroundMode::Dark => (r, g, b),
        BackgroundMode::Light => {
            let luma = 0.0722f32.mul_add(
                f32::from(b),
                0.2126f32.mul_add(f32::from(r), 0.7152 * f32::from(g)),
            );
            if luma < 155.0 {
                return (r, g, b);
            }
            let darken = |c: u8| (f32::from(c) * 0.42).round() as u8;
            (darken(r), darken(g), darken(b))
        }
    }
}
