//! Tag file parsers
//!
//! Three layouts are understood:
//!
//! - **Delimited**: `text[,category[,frequency]]` per line, comma separated,
//!   double quotes protect embedded commas and line breaks (`""` escapes a
//!   quote).
//! - **Extended delimited**: same rows, but the frequency column is ignored
//!   and every record gets frequency 0.
//! - **Structured list**: a JSON array of objects with a `name` string and an
//!   optional integer `color` used as the category code.
//!
//! Parsing is row tolerant. A bad numeric field falls back to its default and
//! the row is kept; a row without text is skipped. Neither stops the parse.

use std::iter::Peekable;
use std::str::Chars;

use serde::Deserialize;
use serde_json::Value;

use super::record::{TagCategory, TagRecord};

/// On-disk layout of a tag source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited,
    ExtendedDelimited,
    StructuredList,
}

impl SourceFormat {
    /// Parse raw file content in this layout.
    ///
    /// Only a structured-list document that is not a JSON array can fail;
    /// the error carries a human-readable reason.
    pub fn parse(self, raw: &str) -> Result<ParsedRecords, String> {
        match self {
            Self::Delimited => Ok(parse_delimited(raw)),
            Self::ExtendedDelimited => Ok(parse_extended_delimited(raw)),
            Self::StructuredList => parse_structured_list(raw),
        }
    }
}

/// Records produced by one parse, with tolerance statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedRecords {
    pub records: Vec<TagRecord>,
    /// Rows or entries dropped because they had no usable text
    pub skipped: usize,
    /// Fields that were present but malformed and fell back to a default
    pub defaulted: usize,
}

impl ParsedRecords {
    fn push(&mut self, record: TagRecord) {
        self.records.push(record);
    }
}

/// Parse `text[,category[,frequency]]` rows.
pub fn parse_delimited(raw: &str) -> ParsedRecords {
    parse_rows(raw, true)
}

/// Parse `text[,category]` rows; any frequency column is ignored.
pub fn parse_extended_delimited(raw: &str) -> ParsedRecords {
    parse_rows(raw, false)
}

fn parse_rows(raw: &str, read_frequency: bool) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();

    for fields in split_rows(strip_bom(raw)) {
        // Blank line
        if fields.len() == 1 && fields[0].trim().is_empty() {
            continue;
        }

        let text = fields.first().map(|f| f.trim()).unwrap_or_default();
        if text.is_empty() {
            parsed.skipped += 1;
            continue;
        }

        let category_field = fields.get(1).map(String::as_str);
        if is_malformed_int(category_field) {
            parsed.defaulted += 1;
        }
        let category = TagCategory::from_field(category_field);

        let frequency = if read_frequency {
            let field = fields.get(2).map(String::as_str);
            match field.map(|f| f.trim().parse::<u64>()) {
                Some(Ok(n)) => n,
                Some(Err(_)) => {
                    parsed.defaulted += 1;
                    0
                }
                None => 0,
            }
        } else {
            0
        };

        parsed.push(TagRecord::new(text, category, frequency));
    }

    parsed
}

fn is_malformed_int(field: Option<&str>) -> bool {
    matches!(field, Some(f) if f.trim().parse::<i64>().is_err())
}

fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}

/// Split delimited text into rows of fields.
///
/// A field that starts with `"` runs to the matching closing quote, across
/// line breaks if it has to; `""` inside it is a literal quote. An
/// unterminated quote swallows the rest of the input instead of failing.
pub fn split_rows(raw: &str) -> impl Iterator<Item = Vec<String>> + '_ {
    let mut chars = raw.chars().peekable();
    std::iter::from_fn(move || {
        chars.peek()?;
        Some(next_row(&mut chars))
    })
}

fn next_row(chars: &mut Peekable<Chars<'_>>) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut field));
                at_field_start = true;
                continue;
            }
            '\n' => break,
            '"' if at_field_start => in_quotes = true,
            '\r' => {}
            _ => field.push(c),
        }
        at_field_start = false;
    }

    fields.push(field);
    fields
}

#[derive(Deserialize)]
struct ListEntry {
    name: String,
    #[serde(default)]
    color: Option<Value>,
}

/// Parse a JSON array of `{ "name": ..., "color": ... }` entries.
///
/// Entries that are not objects or have no string `name` are skipped.
/// Frequency is always 0; this layout has no notion of it.
pub fn parse_structured_list(raw: &str) -> Result<ParsedRecords, String> {
    let document: Value = serde_json::from_str(strip_bom(raw)).map_err(|e| e.to_string())?;
    let Value::Array(entries) = document else {
        return Err("expected a JSON array of entries".to_string());
    };

    let mut parsed = ParsedRecords::default();
    for entry in entries {
        let Ok(entry) = serde_json::from_value::<ListEntry>(entry) else {
            parsed.skipped += 1;
            continue;
        };
        let text = entry.name.trim();
        if text.is_empty() {
            parsed.skipped += 1;
            continue;
        }

        let category = match &entry.color {
            None | Some(Value::Null) => TagCategory::General,
            Some(Value::Number(n)) => match n.as_i64() {
                Some(code) => TagCategory::from_code(code),
                None => {
                    parsed.defaulted += 1;
                    TagCategory::General
                }
            },
            Some(Value::String(s)) if s.trim().parse::<i64>().is_ok() => {
                TagCategory::from_field(Some(s))
            }
            Some(_) => {
                parsed.defaulted += 1;
                TagCategory::General
            }
        };

        parsed.push(TagRecord::new(text, category, 0));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_rows() {
        let parsed = parse_delimited("1girl,0,4114588\nhatsune_miku,4,120000\n");
        assert_eq!(
            parsed.records,
            vec![
                TagRecord::new("1girl", TagCategory::General, 4114588),
                TagRecord::new("hatsune_miku", TagCategory::Character, 120000),
            ]
        );
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.defaulted, 0);
    }

    #[test]
    fn test_non_integer_frequency_defaults_without_dropping_rows() {
        let parsed = parse_delimited("blue_sky,9,invalid\ncloud,0,12\n");
        assert_eq!(
            parsed.records,
            vec![
                TagRecord::new("blue_sky", TagCategory::Unknown, 0),
                TagRecord::new("cloud", TagCategory::General, 12),
            ]
        );
        assert_eq!(parsed.defaulted, 1);
    }

    #[test]
    fn test_ragged_rows() {
        let parsed = parse_delimited("solo\nsmile,x\n  grin  ,1,\n");
        assert_eq!(
            parsed.records,
            vec![
                TagRecord::new("solo", TagCategory::General, 0),
                TagRecord::new("smile", TagCategory::General, 0),
                TagRecord::new("grin", TagCategory::Artist, 0),
            ]
        );
        // "x" category and empty frequency
        assert_eq!(parsed.defaulted, 2);
    }

    #[test]
    fn test_empty_text_rows_are_skipped() {
        let parsed = parse_delimited(",0,5\n   ,1,2\n\nreal,0,1\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].text, "real");
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_quoted_fields() {
        let parsed = parse_delimited("\"long, hair\",0,77,\"alias_a,alias_b\"\n");
        assert_eq!(
            parsed.records,
            vec![TagRecord::new("long, hair", TagCategory::General, 77)]
        );
    }

    #[test]
    fn test_split_rows_escapes_and_unterminated_quotes() {
        let rows = |raw| split_rows(raw).collect::<Vec<_>>();
        assert_eq!(rows("a,\"b\"\"c\",d"), vec![vec!["a", "b\"c", "d"]]);
        assert_eq!(rows("a,\"open,rest\nmore,1"), vec![vec!["a", "open,rest\nmore,1"]]);
        assert_eq!(rows("a,,\r\n\nb"), vec![vec!["a", "", ""], vec![""], vec!["b"]]);
        assert_eq!(rows("ab\"c,1\n"), vec![vec!["ab\"c", "1"]]);
        assert!(rows("").is_empty());
    }

    #[test]
    fn test_quoted_field_spans_lines() {
        let parsed = parse_delimited("\"two\nlines\",0,5\nnext,1,2\n");
        assert_eq!(
            parsed.records,
            vec![
                TagRecord::new("two\nlines", TagCategory::General, 5),
                TagRecord::new("next", TagCategory::Artist, 2),
            ]
        );
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_crlf_and_bom() {
        let parsed = parse_delimited("\u{feff}first,0,3\r\nsecond,1,2\r\n");
        assert_eq!(parsed.records[0].text, "first");
        assert_eq!(parsed.records[1].frequency, 2);
    }

    #[test]
    fn test_extended_ignores_frequency() {
        let parsed = parse_extended_delimited("masterpiece,5,999999\nbest_quality,bad\n");
        assert_eq!(
            parsed.records,
            vec![
                TagRecord::new("masterpiece", TagCategory::Meta, 0),
                TagRecord::new("best_quality", TagCategory::General, 0),
            ]
        );
    }

    #[test]
    fn test_structured_list() {
        let raw = r#"[
            {"name": "Fancy chant", "color": 3, "terms": "a, b"},
            {"name": "Plain chant"},
            {"name": "Odd chant", "color": "nope"},
            {"color": 1},
            "not an object",
            {"name": "   "}
        ]"#;
        let parsed = parse_structured_list(raw).unwrap();
        assert_eq!(
            parsed.records,
            vec![
                TagRecord::new("Fancy chant", TagCategory::Copyright, 0),
                TagRecord::new("Plain chant", TagCategory::General, 0),
                TagRecord::new("Odd chant", TagCategory::General, 0),
            ]
        );
        assert_eq!(parsed.skipped, 3);
        assert_eq!(parsed.defaulted, 1);
    }

    #[test]
    fn test_structured_list_rejects_non_array_documents() {
        assert!(parse_structured_list("{\"name\": \"x\"}").is_err());
        assert!(parse_structured_list("not json").is_err());
        assert!(SourceFormat::StructuredList.parse("[]").unwrap().records.is_empty());
    }
}
