use parley_types::NormalizedToken;

/// Ordered pieces of the field currently being spelled.
///
/// `current()` is the concatenation of every appended piece, in order, with
/// whitespace removed. It is cheap enough to recompute after every append
/// for the live display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pieces: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the token's text. Control tokens carry no text and are
    /// ignored; returns whether anything was appended.
    pub fn append(&mut self, token: &NormalizedToken) -> bool {
        match token.text() {
            Some(text) => {
                self.pieces.push(text.to_string());
                true
            }
            None => false,
        }
    }

    /// The candidate value as spelled so far.
    pub fn current(&self) -> String {
        self.pieces
            .iter()
            .flat_map(|piece| piece.chars())
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    pub fn reset(&mut self) {
        self.pieces.clear();
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use parley_types::{Control, Symbol};

    #[test]
    fn preserves_order() {
        let mut transcript = Transcript::new();
        let spoken = ["j", "o", "dot", "s", "at", "gmail", "dot", "com"];
        let mut expected = String::new();
        for word in spoken {
            let token = normalize(word);
            expected.push_str(token.text().unwrap());
            assert!(transcript.append(&token));
            assert_eq!(transcript.current(), expected);
        }
        assert_eq!(transcript.current(), "jo.s@gmail.com");
        assert_eq!(transcript.len(), spoken.len());
    }

    #[test]
    fn control_tokens_are_not_appended() {
        let mut transcript = Transcript::new();
        assert!(!transcript.append(&NormalizedToken::Control(Control::Done)));
        assert!(transcript.is_empty());
        assert_eq!(transcript.current(), "");
    }

    #[test]
    fn whitespace_is_stripped() {
        let mut transcript = Transcript::new();
        transcript.append(&NormalizedToken::Literal("g mail".into()));
        transcript.append(&NormalizedToken::Symbol(Symbol::Dot));
        transcript.append(&NormalizedToken::Literal(" com ".into()));
        assert_eq!(transcript.current(), "gmail.com");
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut transcript = Transcript::new();
        transcript.append(&NormalizedToken::Literal("abc".into()));
        transcript.reset();
        assert!(transcript.is_empty());
        assert_eq!(transcript.current(), "");
    }
}
