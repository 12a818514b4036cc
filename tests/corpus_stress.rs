//! Corpus Stress Tests
//!
//! Large vocabularies and long editing runs: ranking must stay capped,
//! ordered and stable, and repeated commits must never corrupt the buffer.

use std::cmp::Reverse;
use std::fmt::Write as _;

use tagedit::core::dispatcher::{DispatchResult, InputEvent, dispatch};
use tagedit::core::parser::SourceFormat;
use tagedit::core::source::TagSource;
use tagedit::core::suggest::{SUGGESTION_LIMIT, rank_prefix};
use tagedit::core::view::{TextSurface, TextView};
use tagedit::{CompletionSession, Corpus, TagRecord};

fn big_source(name: &str, rows: usize, salt: u64) -> TagSource {
    let mut raw = String::new();
    for i in 0..rows {
        // Cheap deterministic spread with plenty of equal frequencies
        let freq = (i as u64 * 7919 + salt) % 97;
        writeln!(raw, "tag_{:05},{},{}", i, i % 6, freq).unwrap();
    }
    TagSource::from_content(name, SourceFormat::Delimited, &raw).unwrap()
}

// =============================================================================
// RANKING
// =============================================================================

#[test]
fn ranking_20k_records_is_capped_sorted_and_stable() {
    let corpus = Corpus::build(&[big_source("a", 10_000, 3), big_source("b", 10_000, 11)]);
    assert_eq!(corpus.len(), 20_000);

    let ranked = rank_prefix(&corpus, "TAG_0", SUGGESTION_LIMIT);
    assert_eq!(ranked.len(), SUGGESTION_LIMIT);

    let freqs: Vec<u64> = ranked.iter().map(|r| r.frequency).collect();
    assert!(
        freqs.windows(2).all(|w| w[0] >= w[1]),
        "not sorted: {:?}",
        freqs
    );

    // Reference ranking: frequency descending, corpus order among ties
    let mut reference: Vec<(usize, &TagRecord)> =
        corpus.query("tag_0").into_iter().enumerate().collect();
    reference.sort_by_key(|(idx, record)| (Reverse(record.frequency), *idx));
    let expected: Vec<&TagRecord> = reference
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, record)| record)
        .collect();
    let actual: Vec<&TagRecord> = ranked.iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn narrow_prefix_returns_everything_it_matches() {
    let corpus = Corpus::build(&[big_source("a", 10_000, 3)]);
    // tag_0990 .. tag_09909
    let ranked = rank_prefix(&corpus, "tag_0990", SUGGESTION_LIMIT);
    assert_eq!(ranked.len(), 10);
    assert!(ranked.iter().all(|r| r.text.starts_with("tag_0990")));
}

#[test]
fn unmatched_prefix_is_empty() {
    let corpus = Corpus::build(&[big_source("a", 1_000, 3)]);
    assert!(rank_prefix(&corpus, "zzz", SUGGESTION_LIMIT).is_empty());
    assert!(rank_prefix(&corpus, "", SUGGESTION_LIMIT).is_empty());
}

// =============================================================================
// EDITING
// =============================================================================

#[test]
fn thousand_commits_keep_buffer_consistent() {
    let raw = "kitten,0,9\nkitty,0,4\n猫耳,0,7\n";
    let source = TagSource::from_content("t", SourceFormat::Delimited, raw).unwrap();
    let corpus = Corpus::build(&[source]);

    let mut view = TextView::from_string("");
    let mut session = CompletionSession::new();
    let mut expected = String::new();

    for i in 0..1_000 {
        let (prefix, want) = if i % 2 == 0 { ("ki", "kitten") } else { ("猫", "猫耳") };
        view.type_text(prefix).unwrap();
        let result =
            dispatch(&mut session, &corpus, &mut view, InputEvent::BufferChanged).unwrap();
        assert!(matches!(result, DispatchResult::Suggestions(n) if n > 0));
        dispatch(
            &mut session,
            &corpus,
            &mut view,
            InputEvent::SuggestionChosen(0),
        )
        .unwrap();
        view.type_text(", ").unwrap();
        dispatch(&mut session, &corpus, &mut view, InputEvent::DelimiterTyped).unwrap();
        expected.push_str(want);
        expected.push_str(", ");
    }

    assert_eq!(view.buffer.to_string(), expected);
    let (line, col) = view.cursor();
    assert_eq!(line, 0);
    assert_eq!(col, expected.chars().count());
}

#[test]
fn cycling_wraps_many_times() {
    let raw = "kitten,0,9\nkitty,0,4\nkite,0,1\n";
    let source = TagSource::from_content("t", SourceFormat::Delimited, raw).unwrap();
    let corpus = Corpus::build(&[source]);

    let mut view = TextView::from_string("a fluffy ki, solo");
    view.set_cursor(0, 11);
    let mut session = CompletionSession::new();
    dispatch(&mut session, &corpus, &mut view, InputEvent::BufferChanged).unwrap();

    let names = ["kitten", "kitty", "kite"];
    for i in 0..300 {
        let result =
            dispatch(&mut session, &corpus, &mut view, InputEvent::CycleRequested).unwrap();
        assert_eq!(result, DispatchResult::Cycled(i % 3));
        assert_eq!(
            view.buffer.to_string(),
            format!("a fluffy {}, solo", names[i % 3])
        );
    }
}
