//! Buffer: Pure data structure holding caption text and metadata
//! No cursor state (that belongs to the view)
//!
//! Backed by a ropey Rope, addressed by line and char column.

use ropey::Rope;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, TagError};

/// Buffer: Pure data structure holding text and metadata
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    /// Text content stored in a Rope (O(log n) operations)
    rope: Rope,
    /// Filename (if loaded from file)
    pub filename: Option<PathBuf>,
    /// Dirty flag (true if buffer has unsaved changes)
    pub modified: bool,
    /// Version counter for tracking buffer changes
    pub version: u64,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from a string
    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(content.as_ref()),
            ..Self::default()
        }
    }

    /// Load a buffer from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path is a directory, not a file: {}", path.display()),
            )
            .into());
        }

        let file = fs::File::open(path)?;
        let reader = io::BufReader::new(file);

        // Try to load as valid UTF-8 first, fall back to lossy conversion if invalid
        let rope = match Rope::from_reader(reader) {
            Ok(r) => r,
            Err(_) => {
                let bytes = fs::read(path)?;
                Rope::from_str(&String::from_utf8_lossy(&bytes))
            }
        };

        Ok(Self {
            rope,
            filename: Some(path.to_path_buf()),
            modified: false,
            version: 0,
        })
    }

    // ==================== Content Access ====================

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Get entire content as string
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Get number of lines in buffer
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get content of a specific line (without line ending)
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Number of char columns on a line, excluding the line ending
    pub fn line_columns(&self, line_idx: usize) -> Option<usize> {
        self.line(line_idx).map(|l| l.chars().count())
    }

    // ==================== Editing Operations ====================

    /// Replace char columns `start..end` on a line with `text`.
    ///
    /// Fails with `InvalidRange` if the columns do not exist on the line,
    /// leaving the buffer untouched.
    pub fn replace_columns(
        &mut self,
        line_idx: usize,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<()> {
        let line_start = self.checked_line_start(line_idx)?;
        let len = self.line_columns(line_idx).unwrap_or(0);
        if start > end || end > len {
            return Err(TagError::InvalidRange {
                line: line_idx,
                start,
                end,
                len,
            });
        }

        if start < end {
            self.rope.remove(line_start + start..line_start + end);
        }
        if !text.is_empty() {
            self.rope.insert(line_start + start, text);
        }
        if start < end || !text.is_empty() {
            self.mark_modified();
        }
        Ok(())
    }

    /// Insert `text` at a char column on a line
    pub fn insert_at(&mut self, line_idx: usize, col: usize, text: &str) -> Result<()> {
        self.replace_columns(line_idx, col, col, text)
    }

    /// Join `line_idx` with the line after it by removing its line ending
    pub fn remove_line_break(&mut self, line_idx: usize) -> Result<()> {
        let line_start = self.checked_line_start(line_idx)?;
        let next_start = self.checked_line_start(line_idx + 1)?;
        let content_end = line_start + self.line_columns(line_idx).unwrap_or(0);
        if content_end < next_start {
            self.rope.remove(content_end..next_start);
            self.mark_modified();
        }
        Ok(())
    }

    fn checked_line_start(&self, line_idx: usize) -> Result<usize> {
        if line_idx >= self.rope.len_lines() {
            return Err(TagError::InvalidLine {
                line: line_idx,
                line_count: self.rope.len_lines(),
            });
        }
        Ok(self.rope.line_to_char(line_idx))
    }

    // ==================== File Operations ====================

    /// Save buffer to file
    pub fn save(&mut self) -> Result<()> {
        let path = self.filename.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "No filename set for buffer")
        })?;

        // Write to temp file first for atomic save
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent)?;

        for chunk in self.rope.chunks() {
            temp_file.write_all(chunk.as_bytes())?;
        }
        temp_file.flush()?;
        temp_file.as_file().sync_all()?;

        temp_file.persist(path).map_err(|e| e.error)?;

        self.modified = false;
        Ok(())
    }

    /// Save buffer to a specific file (save as)
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.filename = Some(path.as_ref().to_path_buf());
        self.save()
    }

    // ==================== State Management ====================

    fn mark_modified(&mut self) {
        self.modified = true;
        self.version += 1;
    }

    /// Get the filename as a string for display
    pub fn display_name(&self) -> String {
        self.filename
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "*scratch*".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_access() {
        let buffer = Buffer::from_string("first line\r\nsecond\nthird");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line(0).as_deref(), Some("first line"));
        assert_eq!(buffer.line(1).as_deref(), Some("second"));
        assert_eq!(buffer.line(2).as_deref(), Some("third"));
        assert_eq!(buffer.line(3), None);
        assert_eq!(buffer.line_columns(0), Some(10));
    }

    #[test]
    fn test_replace_columns_on_later_line() {
        let mut buffer = Buffer::from_string("header\na fluffy cat\nfooter");
        buffer.replace_columns(1, 9, 12, "kitten").unwrap();
        assert_eq!(buffer.to_string(), "header\na fluffy kitten\nfooter");
        assert!(buffer.modified);
        assert_eq!(buffer.version, 1);
    }

    #[test]
    fn test_replace_multibyte() {
        let mut buffer = Buffer::from_string("café au lait");
        buffer.replace_columns(0, 0, 4, "thé").unwrap();
        assert_eq!(buffer.to_string(), "thé au lait");
    }

    #[test]
    fn test_invalid_range_leaves_buffer_untouched() {
        let mut buffer = Buffer::from_string("short\nline");
        let err = buffer.replace_columns(0, 3, 9, "x").unwrap_err();
        assert!(matches!(
            err,
            TagError::InvalidRange { line: 0, start: 3, end: 9, len: 5 }
        ));
        // Can't reach into the next line through the newline
        assert!(buffer.replace_columns(0, 5, 6, "x").is_err());
        assert!(matches!(
            buffer.insert_at(7, 0, "x"),
            Err(TagError::InvalidLine { line: 7, line_count: 2 })
        ));
        assert_eq!(buffer.to_string(), "short\nline");
        assert!(!buffer.modified);
    }

    #[test]
    fn test_insert_at() {
        let mut buffer = Buffer::from_string("a  cat");
        buffer.insert_at(0, 2, "fluffy").unwrap();
        assert_eq!(buffer.to_string(), "a fluffy cat");
    }

    #[test]
    fn test_remove_line_break() {
        let mut buffer = Buffer::from_string("solo\r\nsmile\nend");
        buffer.remove_line_break(0).unwrap();
        assert_eq!(buffer.to_string(), "solosmile\nend");
        assert!(buffer.remove_line_break(1).is_err());
        assert_eq!(buffer.line_count(), 2);
    }

    #[test]
    fn test_only_cr_and_lf_break_lines() {
        let mut buffer = Buffer::from_string("cat\u{2028}dog\u{85}x\nend");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line(0).as_deref(), Some("cat\u{2028}dog\u{85}x"));
        assert_eq!(buffer.line_columns(0), Some(9));

        buffer.insert_at(0, 9, "ki").unwrap();
        assert_eq!(buffer.to_string(), "cat\u{2028}dog\u{85}xki\nend");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caption.txt");
        let mut buffer = Buffer::from_string("1girl, solo");
        buffer.insert_at(0, 11, ", smile").unwrap();
        buffer.save_as(&path).unwrap();
        assert!(!buffer.modified);

        let reloaded = Buffer::from_file(&path).unwrap();
        assert_eq!(reloaded.to_string(), "1girl, solo, smile");
        assert_eq!(reloaded.display_name(), path.display().to_string());
    }

    #[test]
    fn test_from_file_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Buffer::from_file(dir.path()).is_err());
    }
}
