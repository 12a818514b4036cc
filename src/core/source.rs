//! Tag sources
//!
//! A [`TagSource`] names an origin (usually a file under the tags directory),
//! knows which [`SourceFormat`] to parse it with, and owns the records once
//! loaded. Reading goes through [`SourceReader`] so loading can be exercised
//! without touching the filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::parser::SourceFormat;
use super::record::TagRecord;
use crate::error::{Result, TagError};

/// Fetches the raw content behind a source origin
pub trait SourceReader {
    fn read(&self, origin: &Path) -> io::Result<String>;
}

/// Reads source content from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, origin: &Path) -> io::Result<String> {
        let bytes = fs::read(origin)?;
        // Tag dumps are occasionally not clean UTF-8; keep what we can
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// A named vocabulary origin with its parser and loaded records
#[derive(Debug, Clone)]
pub struct TagSource {
    pub name: String,
    pub origin: PathBuf,
    pub format: SourceFormat,
    records: Vec<TagRecord>,
}

impl TagSource {
    pub fn new(name: impl Into<String>, origin: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            format,
            records: Vec::new(),
        }
    }

    /// Build an already-loaded source from in-memory content
    pub fn from_content(
        name: impl Into<String>,
        format: SourceFormat,
        raw: &str,
    ) -> Result<Self> {
        let name = name.into();
        let mut source = Self::new(name.clone(), PathBuf::from(format!("<{}>", name)), format);
        source.load_content(raw)?;
        Ok(source)
    }

    /// Read and parse this source, replacing any previously loaded records.
    ///
    /// Returns the number of records loaded. On failure the source is left
    /// empty so it contributes nothing to a corpus.
    pub fn load(&mut self, reader: &dyn SourceReader) -> Result<usize> {
        self.records.clear();
        let raw = reader
            .read(&self.origin)
            .map_err(|source| TagError::SourceUnavailable {
                name: self.name.clone(),
                origin: self.origin.clone(),
                source,
            })?;
        self.load_content(&raw)
    }

    fn load_content(&mut self, raw: &str) -> Result<usize> {
        let parsed = self
            .format
            .parse(raw)
            .map_err(|reason| TagError::MalformedSource {
                name: self.name.clone(),
                reason,
            })?;

        if parsed.skipped > 0 || parsed.defaulted > 0 {
            debug!(
                source = %self.name,
                skipped = parsed.skipped,
                defaulted = parsed.defaulted,
                "tolerated malformed rows"
            );
        }

        self.records = parsed.records;
        info!(source = %self.name, count = self.records.len(), "loaded tags");
        Ok(self.records.len())
    }

    pub fn records(&self) -> &[TagRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The stock vocabulary set, in load order.
///
/// Load order matters: it is the tie-break for equally frequent suggestions.
pub fn default_sources(tags_dir: impl AsRef<Path>) -> Vec<TagSource> {
    let dir = tags_dir.as_ref();
    [
        ("English Dictionary", "EnglishDictionary.csv", SourceFormat::Delimited),
        ("Danbooru", "danbooru.csv", SourceFormat::Delimited),
        ("Derpibooru", "derpibooru.csv", SourceFormat::Delimited),
        ("e621", "e621.csv", SourceFormat::Delimited),
        ("e621 SFW", "e621_sfw.csv", SourceFormat::Delimited),
        ("Chants", "demo-chants.json", SourceFormat::StructuredList),
        (
            "Extra Quality",
            "extra-quality-tags.csv",
            SourceFormat::ExtendedDelimited,
        ),
    ]
    .into_iter()
    .map(|(name, file, format)| TagSource::new(name, dir.join(file), format))
    .collect()
}
