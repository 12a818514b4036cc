//! One-shot completion queries.

use std::error::Error;
use std::io::{self, IsTerminal, Write};

use crossterm::style::PrintStyledContent;
use tagedit::config::Config;
use tagedit::core::dispatcher::{DispatchResult, InputEvent, dispatch};
use tagedit::core::suggest::rank_prefix;
use tagedit::core::utf8::column_count;
use tagedit::core::view::{TextSurface, TextView};
use tagedit::terminal::theme::{styled_suggestion, suggestion_label};
use tagedit::{CompletionSession, Corpus, TagRecord};

use super::load_corpus;

/// What `complete` produced
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Suggestions for the word at the cursor
    Listed(Vec<TagRecord>),
    /// The line after committing a suggestion
    Committed(String),
}

/// Run `suggest`: print ranked completions for a prefix.
pub fn run_suggest(config: &Config, word: &str) -> Result<(), Box<dyn Error>> {
    let corpus = load_corpus(config);
    let list = rank_prefix(&corpus, word.trim(), config.max_suggestions());
    let color = io::stdout().is_terminal();
    print_records(&mut io::stdout().lock(), list.as_slice(), false, color)?;
    Ok(())
}

/// Run `complete`: locate the word at `column` and list or commit.
pub fn run_complete(
    config: &Config,
    line: &str,
    column: Option<usize>,
    pick: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let corpus = load_corpus(config);
    let color = io::stdout().is_terminal();
    let mut out = io::stdout().lock();
    match complete_line(&corpus, line, column, pick, config.max_suggestions())? {
        Completion::Listed(records) => print_records(&mut out, &records, true, color)?,
        Completion::Committed(text) => writeln!(out, "{}", text)?,
    }
    Ok(())
}

/// Drive a completion session over a single line of text.
pub fn complete_line(
    corpus: &Corpus,
    line: &str,
    column: Option<usize>,
    pick: Option<usize>,
    limit: usize,
) -> Result<Completion, Box<dyn Error>> {
    let mut view = TextView::from_string(line);
    view.set_cursor(0, column.unwrap_or_else(|| column_count(line)));
    let mut session = CompletionSession::with_limit(limit);

    dispatch(&mut session, corpus, &mut view, InputEvent::BufferChanged)?;
    let Some(index) = pick else {
        return Ok(Completion::Listed(session.suggestions().to_vec()));
    };

    let available = session.suggestions().len();
    match dispatch(
        &mut session,
        corpus,
        &mut view,
        InputEvent::SuggestionChosen(index),
    )? {
        DispatchResult::Committed(_) => Ok(Completion::Committed(view.buffer.to_string())),
        _ => Err(format!("no suggestion at index {} ({} available)", index, available).into()),
    }
}

fn print_records(
    out: &mut impl Write,
    records: &[TagRecord],
    numbered: bool,
    color: bool,
) -> io::Result<()> {
    for (idx, record) in records.iter().enumerate() {
        if numbered {
            write!(out, "{:>3}  ", idx)?;
        }
        if color {
            crossterm::queue!(out, PrintStyledContent(styled_suggestion(record)))?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", suggestion_label(record))?;
        }
    }
    out.flush()
}
