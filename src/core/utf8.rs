//! Column helpers
//!
//! The engine addresses text by line and *char column* (Unicode scalar
//! values), the same unit the editor cursor moves in. These helpers convert
//! columns to byte offsets for slicing and measure display width for
//! terminal output.

/// Number of char columns in a line
pub fn column_count(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of char column `col`. Column == length maps to `text.len()`.
/// Returns `None` past the end.
pub fn column_byte_index(text: &str, col: usize) -> Option<usize> {
    if col == 0 {
        return Some(0);
    }
    let mut seen = 0;
    for (idx, _) in text.char_indices() {
        if seen == col {
            return Some(idx);
        }
        seen += 1;
    }
    (seen == col).then_some(text.len())
}

/// Get the display width of a single character (for monospace terminal display)
/// Returns 0 for control characters, 1 for ASCII, 2 for wide CJK characters, etc.
pub fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Total display width of text
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Pad `text` with spaces to `width` display columns
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    let current = display_width(text);
    if current < width {
        out.extend(std::iter::repeat_n(' ', width - current));
    }
    out
}

/// Longest prefix of `text` that fits in `width` display columns
pub fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        used += char_width(c);
        if used > width {
            return &text[..idx];
        }
    }
    text
}
