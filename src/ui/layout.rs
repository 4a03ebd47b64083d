//! Screen geometry shared by rendering and mouse hit-testing.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::editor::TAB_WIDTH;

/// Rows below the panes (status bar).
pub const FOOTER_ROWS: u16 = 1;

/// Border rows/columns around each pane (one per side).
const BORDER: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRects {
    pub editor: Rect,
    pub preview: Rect,
    pub footer: Rect,
}

/// Split the screen into the editor pane (left half), the preview pane
/// (right half) and the status bar.
pub fn pane_rects(area: Rect) -> PaneRects {
    let body_height = area.height.saturating_sub(FOOTER_ROWS);
    let left_width = area.width / 2;
    PaneRects {
        editor: Rect::new(area.x, area.y, left_width, body_height),
        preview: Rect::new(
            area.x + left_width,
            area.y,
            area.width - left_width,
            body_height,
        ),
        footer: Rect::new(
            area.x,
            area.y + body_height,
            area.width,
            area.height.min(FOOTER_ROWS),
        ),
    }
}

/// Inside of a bordered pane.
pub const fn pane_inner(pane: Rect) -> Rect {
    Rect::new(
        pane.x + BORDER,
        pane.y + BORDER,
        pane.width.saturating_sub(2 * BORDER),
        pane.height.saturating_sub(2 * BORDER),
    )
}

/// Gutter width for a buffer: line numbers plus one space.
pub const fn gutter_width(total_lines: usize) -> u16 {
    line_number_width(total_lines) + 1
}

/// Where buffer text goes inside the editor pane, right of the gutter.
pub fn editor_text_rect(editor_pane: Rect, total_lines: usize) -> Rect {
    let inner = pane_inner(editor_pane);
    let gutter = gutter_width(total_lines).min(inner.width);
    Rect::new(inner.x + gutter, inner.y, inner.width - gutter, inner.height)
}

/// Visible text rows in either pane for a terminal of `height` rows.
pub fn editor_text_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(FOOTER_ROWS).saturating_sub(2 * BORDER))
}

/// Visible text columns in the editor for a terminal of `width` columns.
pub fn editor_text_cols(width: u16, total_lines: usize) -> usize {
    usize::from(
        (width / 2)
            .saturating_sub(2 * BORDER)
            .saturating_sub(gutter_width(total_lines)),
    )
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Terminal columns taken by `ch`. Tabs expand to the tab width.
pub fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Display column of character index `col` within `line`.
pub fn display_col(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// Character index under display column `target` within `line`. Past the
/// end of the line this is the line length.
pub fn char_at_display_col(line: &str, target: usize) -> usize {
    let mut col = 0;
    for (idx, ch) in line.chars().enumerate() {
        let width = char_width(ch);
        if width > 0 && target < col + width {
            return idx;
        }
        col += width;
    }
    line.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panes_split_screen_in_half_above_footer() {
        let panes = pane_rects(Rect::new(0, 0, 81, 24));
        assert_eq!(panes.editor, Rect::new(0, 0, 40, 23));
        assert_eq!(panes.preview, Rect::new(40, 0, 41, 23));
        assert_eq!(panes.footer, Rect::new(0, 23, 81, 1));
    }

    #[test]
    fn test_editor_text_geometry_matches_rect() {
        let panes = pane_rects(Rect::new(0, 0, 80, 24));
        let text = editor_text_rect(panes.editor, 120);
        assert_eq!(usize::from(text.height), editor_text_rows(24));
        assert_eq!(usize::from(text.width), editor_text_cols(80, 120));
        assert_eq!(text.x, 1 + 4);
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        assert_eq!(editor_text_rows(2), 0);
        assert_eq!(editor_text_cols(3, 1), 0);
        let text = editor_text_rect(pane_rects(Rect::new(0, 0, 3, 2)).editor, 1);
        assert_eq!(text.width, 0);
    }

    #[test]
    fn test_display_col_counts_tabs_and_wide_chars() {
        assert_eq!(display_col("a\tb", 2), 1 + TAB_WIDTH);
        assert_eq!(display_col("日本", 1), 2);
        assert_eq!(display_col("abc", 10), 3);
    }

    #[test]
    fn test_char_at_display_col_inverts_display_col() {
        let line = "x日y";
        assert_eq!(char_at_display_col(line, 0), 0);
        assert_eq!(char_at_display_col(line, 1), 1);
        assert_eq!(char_at_display_col(line, 2), 1);
        assert_eq!(char_at_display_col(line, 3), 2);
        assert_eq!(char_at_display_col(line, 9), 3);
    }

    #[test]
    fn test_line_number_width() {
        assert_eq!(line_number_width(1), 1);
        assert_eq!(line_number_width(10), 2);
        assert_eq!(line_number_width(99_999), 5);
        assert_eq!(line_number_width(1_000_000), 6);
    }
}
