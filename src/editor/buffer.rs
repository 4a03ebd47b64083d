use ropey::Rope;

/// Spaces inserted for the Tab key.
pub const TAB_WIDTH: usize = 4;

/// Which source a buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Markup,
    Styles,
    Script,
}

impl BufferKind {
    /// Tab order in the editor pane.
    pub const ALL: [Self; 3] = [Self::Markup, Self::Styles, Self::Script];

    /// Tab title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Markup => "HTML",
            Self::Styles => "CSS",
            Self::Script => "JavaScript",
        }
    }

    /// Syntax token understood by the highlighter.
    pub const fn syntax(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Styles => "css",
            Self::Script => "js",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Markup => 0,
            Self::Styles => 1,
            Self::Script => 2,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Markup => Self::Styles,
            Self::Styles => Self::Script,
            Self::Script => Self::Markup,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Markup => Self::Script,
            Self::Styles => Self::Markup,
            Self::Script => Self::Styles,
        }
    }
}

/// Cursor position in a source buffer.
///
/// Columns count characters, not bytes, so they map directly onto rope
/// char indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based character column within the line.
    pub col: usize,
    /// Column to return to when moving vertically through shorter lines.
    sticky_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn place(&mut self, line: usize, col: usize) {
        self.line = line;
        self.col = col;
        self.sticky_col = col;
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One source buffer and its cursor.
///
/// Mutating operations return `true` when the text actually changed, which
/// is what the session counts as an edit.
pub struct SourceBuffer {
    kind: BufferKind,
    rope: Rope,
    cursor: Cursor,
}

impl SourceBuffer {
    pub fn new(kind: BufferKind) -> Self {
        Self::from_text(kind, "")
    }

    pub fn from_text(kind: BufferKind, text: &str) -> Self {
        Self {
            kind,
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
        }
    }

    pub const fn kind(&self) -> BufferKind {
        self.kind
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Replace the whole content and put the cursor at the start.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::default();
    }

    pub fn clear(&mut self) {
        self.replace_text("");
    }

    /// Number of lines. An empty buffer has one empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line ending.
    pub fn line_at(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let end = self.line_len(line);
        Some(self.rope.line(line).slice(..end).to_string())
    }

    /// Length of a line in characters, line ending excluded.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && is_line_break(slice.char(len - 1)) {
            len -= 1;
            // CRLF is a single break
            if len > 0 && slice.char(len) == '\n' && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch == '\n' {
            return self.split_line();
        }
        self.rope.insert_char(self.cursor_char_idx(), ch);
        self.cursor.place(self.cursor.line, self.cursor.col + 1);
        true
    }

    /// Insert text at the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let normalized = text.replace("\r\n", "\n");
        let start = self.cursor_char_idx();
        self.rope.insert(start, &normalized);

        let end = start + normalized.chars().count();
        let line = self.rope.char_to_line(end);
        let col = end - self.rope.line_to_char(line);
        self.cursor.place(line, col);
        true
    }

    pub fn insert_tab(&mut self) -> bool {
        self.insert_str(&" ".repeat(TAB_WIDTH))
    }

    /// Break the line at the cursor (Enter).
    pub fn split_line(&mut self) -> bool {
        self.rope.insert_char(self.cursor_char_idx(), '\n');
        self.cursor.place(self.cursor.line + 1, 0);
        true
    }

    /// Backspace. Joins with the previous line at column zero.
    pub fn delete_back(&mut self) -> bool {
        let Cursor { line, col, .. } = self.cursor;
        if col > 0 {
            let idx = self.cursor_char_idx();
            self.rope.remove(idx - 1..idx);
            self.cursor.place(line, col - 1);
            return true;
        }
        if line == 0 {
            return false;
        }
        let prev_len = self.line_len(line - 1);
        let join_at = self.rope.line_to_char(line - 1) + prev_len;
        self.rope.remove(join_at..self.cursor_char_idx());
        self.cursor.place(line - 1, prev_len);
        true
    }

    /// Delete key. Joins with the next line at the end of a line.
    pub fn delete_forward(&mut self) -> bool {
        let Cursor { line, col, .. } = self.cursor;
        let idx = self.cursor_char_idx();
        if col < self.line_len(line) {
            self.rope.remove(idx..=idx);
            return true;
        }
        if line + 1 >= self.line_count() {
            return false;
        }
        let next_start = self.rope.line_to_char(line + 1);
        self.rope.remove(idx..next_start);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let Cursor {
            line,
            col,
            sticky_col,
        } = self.cursor;
        match direction {
            Direction::Left if col > 0 => self.cursor.place(line, col - 1),
            Direction::Left if line > 0 => self.cursor.place(line - 1, self.line_len(line - 1)),
            Direction::Right if col < self.line_len(line) => self.cursor.place(line, col + 1),
            Direction::Right if line + 1 < self.line_count() => self.cursor.place(line + 1, 0),
            Direction::Up if line > 0 => {
                self.cursor.line = line - 1;
                self.cursor.col = sticky_col.min(self.line_len(line - 1));
            }
            Direction::Down if line + 1 < self.line_count() => {
                self.cursor.line = line + 1;
                self.cursor.col = sticky_col.min(self.line_len(line + 1));
            }
            _ => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.place(self.cursor.line, 0);
    }

    pub fn move_end(&mut self) {
        self.cursor.place(self.cursor.line, self.line_len(self.cursor.line));
    }

    /// Move to a position, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        self.cursor.place(line, col.min(self.line_len(line)));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor.place(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor.place(last, self.line_len(last));
    }

    fn cursor_char_idx(&self) -> usize {
        let line = self.cursor.line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line) + self.cursor.col.min(self.line_len(line))
    }
}

impl std::fmt::Debug for SourceBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceBuffer")
            .field("kind", &self.kind)
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// Characters ropey treats as line endings.
const fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
