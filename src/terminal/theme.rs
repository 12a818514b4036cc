//! Category colors
//!
//! Suggestions are tinted by tag category so artists, characters and
//! franchises stand apart from general tags in the list.

use crossterm::style::{Color, StyledContent, Stylize};

use crate::core::record::{TagCategory, TagRecord};

/// Foreground color for a category
pub fn category_color(category: TagCategory) -> Color {
    match category {
        TagCategory::General => Color::Rgb { r: 0x3d, g: 0x7e, b: 0xd8 },
        TagCategory::Artist => Color::Rgb { r: 0xd8, g: 0x3a, b: 0x3a },
        TagCategory::Copyright => Color::Rgb { r: 0x3f, g: 0xa8, b: 0x4a },
        TagCategory::Character => Color::Rgb { r: 0xa0, g: 0x52, b: 0xd0 },
        TagCategory::Meta => Color::Rgb { r: 0xe8, g: 0x8a, b: 0x1e },
        TagCategory::Unknown => Color::Reset,
    }
}

/// List label: `text (frequency)`, or just `text` when the count is unknown
pub fn suggestion_label(record: &TagRecord) -> String {
    if record.frequency > 0 {
        format!("{} ({})", record.text, record.frequency)
    } else {
        record.text.clone()
    }
}

pub fn styled_suggestion(record: &TagRecord) -> StyledContent<String> {
    suggestion_label(record).with(category_color(record.category))
}
