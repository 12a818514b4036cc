//! Completion session
//!
//! Per-edit-session state machine:
//!
//! ```text
//! Idle --(edit with a word at the cursor)--> Suggesting
//! Suggesting --(edit)--> Suggesting (recomputed) | Idle (no word)
//! Suggesting --(choose | delimiter)--> Idle
//! Suggesting --(cycle)--> Suggesting (selection advanced, choice applied)
//! ```
//!
//! Cycling applies each candidate in place and keeps the list alive, so
//! repeated cycles walk through the candidates over the same span.

use tracing::debug;

use super::commit::{commit, cycle};
use super::corpus::Corpus;
use super::locator::{CurrentWord, locate_at};
use super::record::TagRecord;
use super::suggest::{SUGGESTION_LIMIT, SuggestionList, suggest_with_limit};
use super::view::TextSurface;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Suggesting {
        /// Span the next commit replaces
        word: CurrentWord,
        suggestions: SuggestionList,
        selection: Option<usize>,
    },
}

/// Autocomplete state for one text being edited
#[derive(Debug, Clone)]
pub struct CompletionSession {
    state: SessionState,
    limit: usize,
}

impl Default for CompletionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionSession {
    pub fn new() -> Self {
        Self::with_limit(SUGGESTION_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            state: SessionState::Idle,
            limit: limit.max(1),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_suggesting(&self) -> bool {
        matches!(self.state, SessionState::Suggesting { .. })
    }

    /// Active suggestions, empty when idle
    pub fn suggestions(&self) -> &[TagRecord] {
        match &self.state {
            SessionState::Suggesting { suggestions, .. } => suggestions.as_slice(),
            SessionState::Idle => &[],
        }
    }

    pub fn selection(&self) -> Option<usize> {
        match &self.state {
            SessionState::Suggesting { selection, .. } => *selection,
            SessionState::Idle => None,
        }
    }

    /// The word the active suggestions were computed for
    pub fn current_word(&self) -> Option<&CurrentWord> {
        match &self.state {
            SessionState::Suggesting { word, .. } => Some(word),
            SessionState::Idle => None,
        }
    }

    /// Re-locate the word at the cursor and recompute suggestions.
    ///
    /// Returns the number of suggestions now active.
    pub fn on_buffer_changed(&mut self, corpus: &Corpus, surface: &dyn TextSurface) -> usize {
        match locate_at(surface) {
            Some(word) => {
                let suggestions = suggest_with_limit(corpus, Some(&word), self.limit);
                let count = suggestions.len();
                debug!(word = %word.text, count, "suggesting");
                self.state = SessionState::Suggesting {
                    word,
                    suggestions,
                    selection: None,
                };
                count
            }
            None => {
                self.clear();
                0
            }
        }
    }

    /// Commit the suggestion at `index` and return to idle.
    ///
    /// Returns the committed record, or `None` if there is no such
    /// suggestion (the buffer is left alone in that case).
    pub fn on_suggestion_chosen(
        &mut self,
        surface: &mut dyn TextSurface,
        index: usize,
    ) -> Result<Option<TagRecord>> {
        let Some(record) = self.suggestions().get(index).cloned() else {
            return Ok(None);
        };
        self.choose(surface, &record)?;
        Ok(Some(record))
    }

    /// Commit an arbitrary record and return to idle.
    ///
    /// Replaces the active word span if suggesting, otherwise the word at
    /// the cursor; with no word at all the text is inserted at the cursor.
    pub fn choose(&mut self, surface: &mut dyn TextSurface, record: &TagRecord) -> Result<()> {
        let word = match std::mem::take(&mut self.state) {
            SessionState::Suggesting { word, .. } => Some(word),
            SessionState::Idle => locate_at(surface),
        };
        commit(surface, word.as_ref(), record)?;
        debug!(tag = %record.text, "committed");
        Ok(())
    }

    /// Advance the selection and apply it in place.
    ///
    /// Returns the new selection, or `None` when there is nothing to cycle.
    pub fn on_cycle_requested(&mut self, surface: &mut dyn TextSurface) -> Result<Option<usize>> {
        let SessionState::Suggesting {
            word,
            suggestions,
            selection,
        } = &mut self.state
        else {
            return Ok(None);
        };
        let Some(next) = cycle(suggestions.len(), *selection) else {
            return Ok(None);
        };
        let Some(record) = suggestions.get(next) else {
            return Ok(None);
        };

        let (line, end) = commit(surface, Some(&*word), record)?;
        word.line = line;
        word.end = end;
        *selection = Some(next);
        debug!(tag = %record.text, selection = next, "cycled");
        Ok(Some(next))
    }

    /// A delimiter closes the word: drop suggestions, leave the text alone
    pub fn on_delimiter_typed(&mut self) {
        self.clear();
    }

    pub fn clear(&mut self) {
        if self.is_suggesting() {
            debug!("suggestions cleared");
        }
        self.state = SessionState::Idle;
    }
}
