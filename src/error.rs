//! Error types shared by the tag engine and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by tag loading, buffer splicing and state persistence.
///
/// Malformed numeric fields inside a tag file are *not* represented here:
/// they fall back to defaults at parse time and never abort a load.
#[derive(Debug, Error)]
pub enum TagError {
    /// A tag source could not be read at all (missing or unreadable file)
    #[error("tag source '{name}' unavailable at {}: {source}", origin.display())]
    SourceUnavailable {
        name: String,
        origin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A structured-list source whose document is not a list of entries
    #[error("tag source '{name}' is malformed: {reason}")]
    MalformedSource { name: String, reason: String },

    /// A splice was requested against columns that do not exist on the line
    #[error("invalid range {start}..{end} on line {line} (line has {len} columns)")]
    InvalidRange {
        line: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A line index past the end of the buffer
    #[error("line {line} out of range (buffer has {line_count} lines)")]
    InvalidLine { line: usize, line_count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TagError>;
