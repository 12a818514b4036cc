//! Word Locator
//!
//! Finds the word being typed at the cursor. The current word is the run of
//! non-boundary characters that ends at the cursor: only what lies *before*
//! the cursor counts, so a cursor in the middle of `fluffy` yields the prefix
//! typed so far, not the whole token.
//!
//! Boundaries are whitespace and commas, the same keys that close a tag.

use super::utf8::{column_byte_index, column_count};
use super::view::TextSurface;

/// The word under the cursor.
///
/// `text` is lower-cased for matching; `start`/`end` are char columns into
/// the original line so a replacement leaves the surrounding text intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentWord {
    pub text: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Characters that terminate a word
pub fn is_boundary(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Locate the current word on `line_text` with the cursor at `column`.
///
/// Returns `None` when the cursor is at column 0 or directly follows a
/// boundary character. Columns past the end of the line are clamped.
pub fn locate(line_text: &str, column: usize) -> Option<CurrentWord> {
    let line_text = line_text.trim_end_matches(['\n', '\r']);
    let end = column.min(column_count(line_text));
    let end_byte = column_byte_index(line_text, end)?;
    let before = &line_text[..end_byte];

    let word_len = before
        .chars()
        .rev()
        .take_while(|c| !is_boundary(*c))
        .count();
    if word_len == 0 {
        return None;
    }

    let start = end - word_len;
    let start_byte = column_byte_index(line_text, start)?;
    Some(CurrentWord {
        text: before[start_byte..].to_lowercase(),
        line: 0,
        start,
        end,
    })
}

/// Locate the current word at a surface's cursor
pub fn locate_at(surface: &dyn TextSurface) -> Option<CurrentWord> {
    let (line, column) = surface.cursor();
    let text = surface.line_text(line)?;
    locate(&text, column).map(|word| CurrentWord { line, ..word })
}
