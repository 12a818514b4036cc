//! Commit and cycle
//!
//! Committing splices a chosen suggestion over the current word span and
//! leaves the cursor right after it. Cycling picks the next index in the
//! suggestion list, wrapping around.

use super::locator::CurrentWord;
use super::record::TagRecord;
use super::utf8::{column_byte_index, column_count};
use super::view::TextSurface;
use crate::error::{Result, TagError};

/// Splice `chosen` into a single line of text.
///
/// With a word, its `start..end` span is replaced. Without one, `chosen` is
/// inserted at `cursor_column`. Offsets that do not fit the line fail with
/// `InvalidRange`.
pub fn splice_line(
    line_text: &str,
    word: Option<&CurrentWord>,
    cursor_column: usize,
    chosen: &str,
) -> Result<String> {
    let (start, end) = match word {
        Some(w) => (w.start, w.end),
        None => (cursor_column, cursor_column),
    };
    let invalid = || TagError::InvalidRange {
        line: word.map(|w| w.line).unwrap_or(0),
        start,
        end,
        len: column_count(line_text),
    };
    if start > end {
        return Err(invalid());
    }
    let start_byte = column_byte_index(line_text, start).ok_or_else(invalid)?;
    let end_byte = column_byte_index(line_text, end).ok_or_else(invalid)?;

    let mut out = String::with_capacity(line_text.len() + chosen.len());
    out.push_str(&line_text[..start_byte]);
    out.push_str(chosen);
    out.push_str(&line_text[end_byte..]);
    Ok(out)
}

/// Apply `chosen` to the surface and move the cursor past it.
///
/// Returns the new cursor position.
pub fn commit(
    surface: &mut dyn TextSurface,
    word: Option<&CurrentWord>,
    chosen: &TagRecord,
) -> Result<(usize, usize)> {
    let (line, start) = match word {
        Some(w) => {
            surface.replace_range(w.line, w.start, w.end, &chosen.text)?;
            (w.line, w.start)
        }
        None => {
            let (line, col) = surface.cursor();
            surface.insert_at(line, col, &chosen.text)?;
            (line, col)
        }
    };

    let col = start + column_count(&chosen.text);
    surface.set_cursor(line, col);
    Ok((line, col))
}

/// Next selection in a list of `len` suggestions.
///
/// No selection yet selects 0; otherwise advance and wrap. An empty list has
/// nothing to select.
pub fn cycle(len: usize, selection: Option<usize>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selection {
        Some(idx) => (idx + 1) % len,
        None => 0,
    })
}
