//! Property-based tests for the grouping pipeline
//!
//! Generated sources are made of well-formed words (balanced brackets, closed
//! strings) at random indentation, so every one of them must translate.

use proptest::prelude::*;
use tilwa::{Config, Event};

const WORDS: [&str; 8] = ["a", "bc", "42", "\"s t\"", "\"(\"", "(x y)", "[p {q ;r\n}]", "#t"];

fn words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(WORDS.to_vec()), 0..4)
}

/// A line of plain words, optionally indented and commented
fn plain_line() -> impl Strategy<Value = String> {
    (0usize..4, words(), prop::option::of(Just("; note"))).prop_map(|(depth, words, comment)| {
        let mut line = " ".repeat(depth * 2);
        line.push_str(&words.join(" "));
        if let Some(comment) = comment {
            line.push(' ');
            line.push_str(comment);
        }
        line
    })
}

/// A line that may also use dots, quote prefixes and colons
fn marked_line() -> impl Strategy<Value = String> {
    let prefix = prop::option::of(prop::sample::select(vec![". ", "' ", ",@ ", "#` "]));
    let colon = prop::option::of(prop::sample::select(vec![" :", " ::", " : x"]));
    (0usize..6, prefix, words(), colon).prop_map(|(depth, prefix, words, colon)| {
        let mut line = " ".repeat(depth);
        line.push_str(prefix.unwrap_or(""));
        line.push_str(&words.join(" "));
        line.push_str(colon.unwrap_or(""));
        line
    })
}

fn lines(line: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    prop::collection::vec(line, 0..8).prop_map(|lines| lines.join("\n"))
}

fn events(source: &str) -> Vec<Event> {
    tilwa::events(source, &Config::default())
        .collect::<tilwa::Result<Vec<_>>>()
        .expect("generated source should translate")
}

/// Depth never drops below zero and ends at zero
fn assert_balanced(events: &[Event]) -> Result<(), TestCaseError> {
    let mut depth = 0i64;
    for event in events {
        match event {
            Event::Open => depth += 1,
            Event::Close => depth -= 1,
            Event::Atom(_) => {}
        }
        prop_assert!(depth >= 0, "closed more groups than were opened");
    }
    prop_assert_eq!(depth, 0);
    Ok(())
}

fn atom_text(events: &[Event]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Atom(token) => Some(token.text.as_str()),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn plain_sources_are_balanced(source in lines(plain_line())) {
        assert_balanced(&events(&source))?;
    }

    #[test]
    fn plain_sources_keep_every_character(source in lines(plain_line())) {
        prop_assert_eq!(atom_text(&events(&source)), source);
    }

    #[test]
    fn marked_sources_are_balanced(source in lines(marked_line())) {
        assert_balanced(&events(&source))?;
    }

    #[test]
    fn marked_sources_only_drop_markers(source in lines(marked_line())) {
        // Dropped markers are dots, colons and the spaces after them
        let kept = atom_text(&events(&source));
        prop_assert!(kept.len() <= source.len());
        let strip = |s: &str| s.chars().filter(|c| !matches!(c, ' ' | '.' | ':')).collect::<String>();
        prop_assert_eq!(strip(&kept), strip(&source));
    }

    #[test]
    fn explicit_group_is_left_alone(words in words()) {
        let source = format!("({})", words.join(" "));
        let output = tilwa::translate(&source, &Config::default()).unwrap();
        prop_assert_eq!(output, source);
    }
}
