//! Tag Corpus
//!
//! The merged, read-only set of every loaded record. Order is significant:
//! records appear in source load order, then in their order within each
//! source, and that order is the ranking tie-break. Duplicate text across
//! sources is kept; nothing is deduplicated.

use tracing::warn;

use super::record::TagRecord;
use super::source::{SourceReader, TagSource};
use crate::error::TagError;

#[derive(Debug, Clone)]
struct Entry {
    record: TagRecord,
    /// Lower-cased text, computed once at build time
    folded: String,
}

/// Summary of one source inside a corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: String,
    pub count: usize,
}

/// Queryable union of all tag sources
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<Entry>,
    sources: Vec<SourceSummary>,
}

/// A corpus plus the non-fatal per-source failures hit while loading it
#[derive(Debug)]
pub struct CorpusLoad {
    pub corpus: Corpus,
    pub warnings: Vec<TagError>,
}

impl Corpus {
    /// Merge already-loaded sources into one index.
    pub fn build(sources: &[TagSource]) -> Self {
        let mut corpus = Self::default();
        for source in sources {
            corpus.sources.push(SourceSummary {
                name: source.name.clone(),
                count: source.len(),
            });
            corpus
                .entries
                .extend(source.records().iter().map(|record| Entry {
                    folded: record.text.to_lowercase(),
                    record: record.clone(),
                }));
        }
        corpus
    }

    /// Load every source through `reader` and merge whatever succeeded.
    ///
    /// A source that cannot be read or parsed contributes zero records and
    /// is reported in [`CorpusLoad::warnings`]; the rest still load.
    pub fn load(mut sources: Vec<TagSource>, reader: &dyn SourceReader) -> CorpusLoad {
        let mut warnings = Vec::new();
        for source in &mut sources {
            if let Err(err) = source.load(reader) {
                warn!(source = %source.name, error = %err, "skipping tag source");
                warnings.push(err);
            }
        }
        CorpusLoad {
            corpus: Self::build(&sources),
            warnings,
        }
    }

    /// All records whose text starts with `prefix`, case-insensitively, in
    /// corpus order. An empty prefix matches nothing.
    pub fn query(&self, prefix: &str) -> Vec<&TagRecord> {
        self.query_iter(prefix).collect()
    }

    /// Lazy form of [`Corpus::query`]
    pub fn query_iter<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = &'a TagRecord> + use<'a> {
        let folded = prefix.to_lowercase();
        let live = !folded.is_empty();
        self.entries
            .iter()
            .filter(move |e| live && e.folded.starts_with(&folded))
            .map(|e| &e.record)
    }

    pub fn sources(&self) -> &[SourceSummary] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::SourceFormat;
    use crate::core::record::TagCategory;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::path::Path;

    fn corpus(sources: &[(&str, &str)]) -> Corpus {
        let sources: Vec<TagSource> = sources
            .iter()
            .map(|(name, raw)| TagSource::from_content(*name, SourceFormat::Delimited, raw).unwrap())
            .collect();
        Corpus::build(&sources)
    }

    #[test]
    fn test_query_is_case_insensitive_prefix() {
        let corpus = corpus(&[("A", "Cat_Ears,0,5\ncat,0,9\nconcat,0,1\nCAT,1,2\n")]);
        let texts: Vec<&str> = corpus.query("cA").iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Cat_Ears", "cat", "CAT"]);
        for record in corpus.query("cat_") {
            assert!(record.text.to_lowercase().starts_with("cat_"));
        }
    }

    #[test]
    fn test_empty_prefix_matches_nothing() {
        let corpus = corpus(&[("A", "cat,0,9\n")]);
        assert!(corpus.query("").is_empty());
    }

    #[test]
    fn test_duplicates_across_sources_are_kept_in_load_order() {
        let corpus = corpus(&[("First", "smile,0,10\n"), ("Second", "smile,1,20\n")]);
        let hits = corpus.query("smile");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].category, TagCategory::General);
        assert_eq!(hits[1].category, TagCategory::Artist);
        let names: Vec<&str> = corpus.sources().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    struct Partial;

    impl SourceReader for Partial {
        fn read(&self, origin: &Path) -> io::Result<String> {
            match origin.to_str() {
                Some("ok.csv") => Ok("tree,0,3\n".to_string()),
                Some("bad.json") => Ok("{\"not\": \"a list\"}".to_string()),
                _ => Err(io::Error::new(io::ErrorKind::NotFound, "gone")),
            }
        }
    }

    #[test]
    fn test_load_continues_past_failed_sources() {
        let sources = vec![
            TagSource::new("Missing", "missing.csv", SourceFormat::Delimited),
            TagSource::new("Ok", "ok.csv", SourceFormat::Delimited),
            TagSource::new("Bad", "bad.json", SourceFormat::StructuredList),
        ];
        let load = Corpus::load(sources, &Partial);

        assert_eq!(load.corpus.len(), 1);
        assert_eq!(load.warnings.len(), 2);
        assert!(matches!(load.warnings[0], TagError::SourceUnavailable { .. }));
        assert!(matches!(load.warnings[1], TagError::MalformedSource { .. }));
        assert_eq!(
            load.corpus.sources(),
            &[
                SourceSummary { name: "Missing".into(), count: 0 },
                SourceSummary { name: "Ok".into(), count: 1 },
                SourceSummary { name: "Bad".into(), count: 0 },
            ]
        );
    }
}
