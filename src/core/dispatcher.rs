//! Input dispatch
//!
//! Maps abstract editor events onto the completion engine. The host editor
//! only has to translate its own key/selection callbacks into
//! [`InputEvent`]s; [`Keymap`] does that translation for named keys using
//! the configured bindings.

use std::collections::HashMap;

use tracing::warn;

use super::corpus::Corpus;
use super::record::TagRecord;
use super::session::CompletionSession;
use super::view::TextSurface;
use crate::config::Config;
use crate::error::Result;

/// Command names usable as keybinding targets
pub const CMD_BUFFER_CHANGED: &str = "buffer-changed";
pub const CMD_CYCLE: &str = "cycle-suggestion";
pub const CMD_DELIMITER: &str = "delimiter";

/// Abstract input from the editor surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The text or cursor changed through ordinary typing
    BufferChanged,
    /// The user picked the suggestion at this index
    SuggestionChosen(usize),
    /// Advance to the next suggestion and apply it
    CycleRequested,
    /// Space, comma or enter was typed
    DelimiterTyped,
}

impl InputEvent {
    /// Resolve a bindable command name
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            CMD_BUFFER_CHANGED => Some(Self::BufferChanged),
            CMD_CYCLE => Some(Self::CycleRequested),
            CMD_DELIMITER => Some(Self::DelimiterTyped),
            _ => None,
        }
    }
}

/// Result of event dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// Suggestions recomputed; this many are active
    Suggestions(usize),
    /// A suggestion was written into the buffer and the list cleared
    Committed(TagRecord),
    /// Cycling applied the suggestion at this index
    Cycled(usize),
    /// Suggestions cleared, buffer untouched
    Cleared,
    /// Nothing to act on (no list, index out of range)
    NotHandled,
}

/// Route one event to the engine.
pub fn dispatch(
    session: &mut CompletionSession,
    corpus: &Corpus,
    surface: &mut dyn TextSurface,
    event: InputEvent,
) -> Result<DispatchResult> {
    let result = match event {
        InputEvent::BufferChanged => {
            DispatchResult::Suggestions(session.on_buffer_changed(corpus, surface))
        }
        InputEvent::SuggestionChosen(index) => match session.on_suggestion_chosen(surface, index)? {
            Some(record) => DispatchResult::Committed(record),
            None => DispatchResult::NotHandled,
        },
        InputEvent::CycleRequested => match session.on_cycle_requested(surface)? {
            Some(index) => DispatchResult::Cycled(index),
            None => DispatchResult::NotHandled,
        },
        InputEvent::DelimiterTyped => {
            session.on_delimiter_typed();
            DispatchResult::Cleared
        }
    };
    Ok(result)
}

/// Key name → event table built from configured bindings
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<String, InputEvent>,
}

impl Keymap {
    pub fn from_config(config: &Config) -> Self {
        let mut bindings = HashMap::new();
        for (key, command) in &config.keybindings {
            match InputEvent::from_command(command) {
                Some(event) => {
                    bindings.insert(key.clone(), event);
                }
                None => warn!(key = %key, command = %command, "unknown command in keybinding"),
            }
        }
        Self { bindings }
    }

    /// Event for a key release. Unbound keys are ordinary edits.
    pub fn event_for_key(&self, key: &str) -> InputEvent {
        self.bindings
            .get(key)
            .copied()
            .unwrap_or(InputEvent::BufferChanged)
    }
}
