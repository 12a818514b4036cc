//! Suggestion Engine
//!
//! Ranks corpus matches for the current word: highest frequency first, ties
//! in corpus order (the sort is stable), capped at [`SUGGESTION_LIMIT`].

use std::cmp::Reverse;

use super::corpus::Corpus;
use super::locator::CurrentWord;
use super::record::TagRecord;

/// Maximum number of suggestions surfaced for one word
pub const SUGGESTION_LIMIT: usize = 50;

/// Ranked suggestions for one current word
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionList {
    items: Vec<TagRecord>,
}

impl SuggestionList {
    pub fn get(&self, idx: usize) -> Option<&TagRecord> {
        self.items.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagRecord> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[TagRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a SuggestionList {
    type Item = &'a TagRecord;
    type IntoIter = std::slice::Iter<'a, TagRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Rank suggestions for `word`, capped at [`SUGGESTION_LIMIT`]
pub fn suggest(corpus: &Corpus, word: Option<&CurrentWord>) -> SuggestionList {
    suggest_with_limit(corpus, word, SUGGESTION_LIMIT)
}

/// Rank suggestions for `word` with an explicit cap
pub fn suggest_with_limit(
    corpus: &Corpus,
    word: Option<&CurrentWord>,
    limit: usize,
) -> SuggestionList {
    let Some(word) = word else {
        return SuggestionList::default();
    };
    rank_prefix(corpus, &word.text, limit)
}

/// Rank suggestions for a raw prefix
pub fn rank_prefix(corpus: &Corpus, prefix: &str, limit: usize) -> SuggestionList {
    let mut matches = corpus.query(prefix);
    matches.sort_by_key(|record| Reverse(record.frequency));
    SuggestionList {
        items: matches.into_iter().take(limit).cloned().collect(),
    }
}
