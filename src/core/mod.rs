//! This module constitutes the core, headless, and UI-agnostic autocomplete engine of tagedit.
//! It loads heterogeneous tag vocabularies into one ranked corpus, finds the word under the
//! cursor in a caption buffer, ranks suggestions for it, and splices a chosen tag back in.

pub mod buffer;
pub mod commit;
pub mod corpus;
pub mod dispatcher;
pub mod locator;
pub mod pairs;
pub mod parser;
pub mod record;
pub mod session;
pub mod source;
pub mod suggest;
pub mod utf8;
pub mod view;
