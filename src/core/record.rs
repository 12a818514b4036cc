//! Canonical tag records
//!
//! Every tag source, whatever its file layout, is reduced to a sequence of
//! [`TagRecord`]s. Optional fields are resolved to their defaults once, at
//! parse time, so nothing downstream has to guess about missing columns.

/// Booru-style tag category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagCategory {
    #[default]
    General,
    Artist,
    Copyright,
    Character,
    Meta,
    /// Integer code outside the known set
    Unknown,
}

impl TagCategory {
    /// Map an integer category code to a category.
    ///
    /// Codes follow the booru convention: 0 general, 1 artist, 3 copyright,
    /// 4 character, 5 meta. Anything else (2 included) is `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::General,
            1 => Self::Artist,
            3 => Self::Copyright,
            4 => Self::Character,
            5 => Self::Meta,
            _ => Self::Unknown,
        }
    }

    /// Resolve a raw text field. Absent or non-integer fields are `General`.
    pub fn from_field(field: Option<&str>) -> Self {
        field
            .and_then(|f| f.trim().parse::<i64>().ok())
            .map(Self::from_code)
            .unwrap_or_default()
    }

    /// Integer code for known categories
    pub fn code(self) -> Option<i64> {
        match self {
            Self::General => Some(0),
            Self::Artist => Some(1),
            Self::Copyright => Some(3),
            Self::Character => Some(4),
            Self::Meta => Some(5),
            Self::Unknown => None,
        }
    }
}

/// A single vocabulary entry.
///
/// `text` keeps its original case; all matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub text: String,
    pub category: TagCategory,
    pub frequency: u64,
}

impl TagRecord {
    pub fn new(text: impl Into<String>, category: TagCategory, frequency: u64) -> Self {
        Self {
            text: text.into(),
            category,
            frequency,
        }
    }
}
