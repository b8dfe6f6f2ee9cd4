//! Maps one spelled utterance onto a [`NormalizedToken`].
//!
//! Rules are checked in order and the first match wins: the "finished"
//! words, then the spoken names of `.`, `@`, `_` and `-`, then anything else
//! as a literal. Single letters and multi-letter chunks ("gmail", "com") are
//! both literals.

use parley_types::{Control, NormalizedToken, Symbol};

const DONE_WORDS: &[&str] = &["done", "finish", "that's all", "that is all"];
const DOT_WORDS: &[&str] = &["dot", "period", "point"];
const AT_WORDS: &[&str] = &["at", "atto", "add at"];
const UNDERSCORE_WORDS: &[&str] = &["underscore", "under score", "under-score"];
const DASH_WORDS: &[&str] = &["dash", "hyphen", "minus"];

const SYMBOL_WORDS: &[(Symbol, &[&str])] = &[
    (Symbol::Dot, DOT_WORDS),
    (Symbol::At, AT_WORDS),
    (Symbol::Underscore, UNDERSCORE_WORDS),
    (Symbol::Dash, DASH_WORDS),
];

/// Classifies an utterance. Total for every non-empty input.
///
/// The utterance is lower-cased and trimmed before matching, so callers may
/// pass raw recognizer output.
pub fn normalize(utterance: &str) -> NormalizedToken {
    let spoken = utterance.trim().to_lowercase();

    if DONE_WORDS.contains(&spoken.as_str()) {
        return NormalizedToken::Control(Control::Done);
    }

    for (symbol, words) in SYMBOL_WORDS {
        if words.contains(&spoken.as_str()) {
            return NormalizedToken::Symbol(*symbol);
        }
    }

    NormalizedToken::Literal(spoken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizer_apostrophes_still_finish() {
        let cleaned = parley_voice::stt::clean_transcript("That\u{2019}s all.");
        assert_eq!(normalize(&cleaned), NormalizedToken::Control(Control::Done));
    }

    #[test]
    fn finished_words() {
        for word in ["done", "finish", "that's all", "that is all", " Done "] {
            assert_eq!(normalize(word), NormalizedToken::Control(Control::Done), "{word}");
        }
    }

    #[test]
    fn symbol_words() {
        assert_eq!(normalize("dot"), NormalizedToken::Symbol(Symbol::Dot));
        assert_eq!(normalize("Period"), NormalizedToken::Symbol(Symbol::Dot));
        assert_eq!(normalize("point"), NormalizedToken::Symbol(Symbol::Dot));
        assert_eq!(normalize("at"), NormalizedToken::Symbol(Symbol::At));
        assert_eq!(normalize("atto"), NormalizedToken::Symbol(Symbol::At));
        assert_eq!(normalize("add at"), NormalizedToken::Symbol(Symbol::At));
        assert_eq!(normalize("under score"), NormalizedToken::Symbol(Symbol::Underscore));
        assert_eq!(normalize("under-score"), NormalizedToken::Symbol(Symbol::Underscore));
        assert_eq!(normalize("hyphen"), NormalizedToken::Symbol(Symbol::Dash));
        assert_eq!(normalize("minus"), NormalizedToken::Symbol(Symbol::Dash));
    }

    #[test]
    fn single_characters_are_literals() {
        assert_eq!(normalize("J"), NormalizedToken::Literal("j".into()));
        assert_eq!(normalize("7"), NormalizedToken::Literal("7".into()));
    }

    #[test]
    fn chunks_are_literals() {
        assert_eq!(normalize("gmail"), NormalizedToken::Literal("gmail".into()));
        assert_eq!(normalize("Com"), NormalizedToken::Literal("com".into()));
        // Only exact matches count as control words.
        assert_eq!(normalize("done it"), NormalizedToken::Literal("done it".into()));
    }

    #[test]
    fn every_input_classifies() {
        for input in ["a", "ab", "dot dot", "?", "ünïcode", "that's", "at at"] {
            let token = normalize(input);
            assert!(matches!(
                token,
                NormalizedToken::Control(_) | NormalizedToken::Symbol(_) | NormalizedToken::Literal(_)
            ));
        }
    }
}
