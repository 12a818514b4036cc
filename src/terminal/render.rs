//! Screen drawing for the caption editor
//!
//! The screen is a header row, the caption text, the suggestion list and a
//! status row. [`Layout`] does the arithmetic; [`draw`] queues crossterm
//! commands and flushes once per frame.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Print, PrintStyledContent, SetAttribute, Stylize},
    terminal::{Clear, ClearType},
};

use super::theme::{category_color, suggestion_label};
use crate::core::session::CompletionSession;
use crate::core::utf8::{column_byte_index, display_width, pad_to_width, truncate_to_width};
use crate::core::view::{TextSurface, TextView};

/// Most suggestion rows shown at once; the list scrolls past this
pub const MAX_LIST_ROWS: u16 = 8;

/// Row split for a terminal of a given height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub text_top: u16,
    pub text_rows: u16,
    pub list_top: u16,
    pub list_rows: u16,
    pub status_row: u16,
}

impl Layout {
    pub fn new(rows: u16, suggestions: usize) -> Self {
        let rows = rows.max(3);
        let wanted = u16::try_from(suggestions).unwrap_or(u16::MAX);
        // Always leave one row of caption text
        let list_rows = wanted.min(MAX_LIST_ROWS).min(rows - 3);
        let text_rows = rows - 2 - list_rows;
        Self {
            text_top: 1,
            text_rows,
            list_top: 1 + text_rows,
            list_rows,
            status_row: rows - 1,
        }
    }
}

/// First item to show so that `selected` stays inside a window of `height`
pub fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    selected.saturating_sub(height - 1)
}

/// Everything a frame shows
pub struct Screen<'a> {
    pub title: &'a str,
    pub position: &'a str,
    pub view: &'a TextView,
    pub session: &'a CompletionSession,
    pub message: &'a str,
}

pub fn draw(out: &mut impl Write, screen: &Screen<'_>, size: (u16, u16)) -> io::Result<()> {
    let (cols, rows) = size;
    let width = usize::from(cols);
    let suggestions = screen.session.suggestions();
    let layout = Layout::new(rows, suggestions.len());

    queue!(out, cursor::Hide, Clear(ClearType::All))?;

    let modified = if screen.view.buffer.modified { " [+]" } else { "" };
    let header = format!(" {}{}  {}", screen.title, modified, screen.position);
    queue!(
        out,
        cursor::MoveTo(0, 0),
        SetAttribute(Attribute::Reverse),
        Print(pad_to_width(truncate_to_width(&header, width), width)),
        SetAttribute(Attribute::Reset)
    )?;

    let (cursor_line, cursor_col) = screen.view.cursor();
    let top_line = scroll_offset(cursor_line, usize::from(layout.text_rows));
    for row in 0..layout.text_rows {
        let Some(text) = screen.view.line_text(top_line + usize::from(row)) else {
            break;
        };
        queue!(
            out,
            cursor::MoveTo(0, layout.text_top + row),
            Print(truncate_to_width(&text, width))
        )?;
    }

    let selected = screen.session.selection().unwrap_or(0);
    let first = scroll_offset(selected, usize::from(layout.list_rows));
    for (row, (idx, record)) in suggestions
        .iter()
        .enumerate()
        .skip(first)
        .take(usize::from(layout.list_rows))
        .enumerate()
    {
        let marker = if screen.session.selection() == Some(idx) {
            '>'
        } else {
            ' '
        };
        let label = suggestion_label(record);
        let room = width.saturating_sub(2);
        let styled = truncate_to_width(&label, room)
            .to_string()
            .with(category_color(record.category));
        queue!(
            out,
            cursor::MoveTo(0, layout.list_top + row as u16),
            Print(marker),
            Print(' '),
            PrintStyledContent(styled)
        )?;
    }

    queue!(
        out,
        cursor::MoveTo(0, layout.status_row),
        SetAttribute(Attribute::Dim),
        Print(truncate_to_width(screen.message, width)),
        SetAttribute(Attribute::Reset)
    )?;

    let line = screen.view.line_text(cursor_line).unwrap_or_default();
    let prefix_end = column_byte_index(&line, cursor_col).unwrap_or(line.len());
    let x = display_width(&line[..prefix_end]).min(width.saturating_sub(1));
    let y = usize::from(layout.text_top) + cursor_line - top_line;
    queue!(
        out,
        cursor::MoveTo(
            u16::try_from(x).unwrap_or(0),
            u16::try_from(y).unwrap_or(0)
        ),
        cursor::Show
    )?;
    out.flush()
}
