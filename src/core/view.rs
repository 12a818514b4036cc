//! Editor surface
//!
//! The engine never owns the text it edits. It talks to whatever editor
//! hosts it through [`TextSurface`]: read a line, read the cursor, splice a
//! range, insert text. [`TextView`] is the in-crate implementation over a
//! [`Buffer`] with a cursor, used by the CLI and by tests.

use super::buffer::Buffer;
use crate::error::Result;

/// Line/column view of an editable text buffer with a cursor
pub trait TextSurface {
    /// Text of a line without its line ending
    fn line_text(&self, line: usize) -> Option<String>;

    /// Cursor as (line, char column)
    fn cursor(&self) -> (usize, usize);

    fn set_cursor(&mut self, line: usize, column: usize);

    /// Replace char columns `start..end` on `line` with `text`
    fn replace_range(&mut self, line: usize, start: usize, end: usize, text: &str) -> Result<()>;

    /// Insert `text` at `column` on `line`
    fn insert_at(&mut self, line: usize, column: usize, text: &str) -> Result<()>;
}

/// A buffer plus a cursor
#[derive(Debug, Clone, Default)]
pub struct TextView {
    pub buffer: Buffer,
    cursor_line: usize,
    cursor_col: usize,
}

impl TextView {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            cursor_line: 0,
            cursor_col: 0,
        }
    }

    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self::new(Buffer::from_string(content))
    }

    /// Move the cursor to the end of the last line
    pub fn move_to_end(&mut self) {
        let last = self.buffer.line_count().saturating_sub(1);
        let col = self.buffer.line_columns(last).unwrap_or(0);
        self.set_cursor(last, col);
    }

    /// Type text at the cursor and advance past it, like a keystroke would
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            self.type_char(c)?;
        }
        Ok(())
    }

    pub fn type_char(&mut self, c: char) -> Result<()> {
        let (line, col) = self.cursor();
        let mut utf8 = [0u8; 4];
        self.buffer.insert_at(line, col, c.encode_utf8(&mut utf8))?;
        if c == '\n' {
            self.cursor_line = line + 1;
            self.cursor_col = 0;
        } else {
            self.cursor_col = col + 1;
        }
        Ok(())
    }

    /// Delete the character before the cursor, joining lines at column 0
    pub fn backspace(&mut self) -> Result<()> {
        let (line, col) = self.cursor();
        if col > 0 {
            self.buffer.replace_columns(line, col - 1, col, "")?;
            self.cursor_col = col - 1;
        } else if line > 0 {
            let prev_len = self.buffer.line_columns(line - 1).unwrap_or(0);
            self.buffer.remove_line_break(line - 1)?;
            self.cursor_line = line - 1;
            self.cursor_col = prev_len;
        }
        Ok(())
    }

    pub fn move_left(&mut self) {
        let (line, col) = self.cursor();
        if col > 0 {
            self.cursor_col = col - 1;
        } else if line > 0 {
            let prev_len = self.buffer.line_columns(line - 1).unwrap_or(0);
            self.set_cursor(line - 1, prev_len);
        }
    }

    pub fn move_right(&mut self) {
        let (line, col) = self.cursor();
        let len = self.buffer.line_columns(line).unwrap_or(0);
        if col < len {
            self.cursor_col = col + 1;
        } else if line + 1 < self.buffer.line_count() {
            self.set_cursor(line + 1, 0);
        }
    }

    pub fn move_vertical(&mut self, down: bool) {
        let (line, col) = self.cursor();
        let target = if down {
            line + 1
        } else {
            line.saturating_sub(1)
        };
        self.set_cursor(target, col);
    }

    pub fn move_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_line_end(&mut self) {
        let line = self.cursor_line;
        self.set_cursor(line, usize::MAX);
    }
}

impl TextSurface for TextView {
    fn line_text(&self, line: usize) -> Option<String> {
        self.buffer.line(line)
    }

    fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    /// Clamps to the existing text
    fn set_cursor(&mut self, line: usize, column: usize) {
        let last = self.buffer.line_count().saturating_sub(1);
        self.cursor_line = line.min(last);
        self.cursor_col = column.min(self.buffer.line_columns(self.cursor_line).unwrap_or(0));
    }

    fn replace_range(&mut self, line: usize, start: usize, end: usize, text: &str) -> Result<()> {
        self.buffer.replace_columns(line, start, end, text)
    }

    fn insert_at(&mut self, line: usize, column: usize, text: &str) -> Result<()> {
        self.buffer.insert_at(line, column, text)
    }
}
