//! Classification of a single spelled utterance.

use serde::{Deserialize, Serialize};

/// Control words recognised while spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    /// The user has finished spelling the field.
    Done,
}

/// Punctuation that has a spoken name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// `.`
    Dot,
    /// `@`
    At,
    /// `_`
    Underscore,
    /// `-`
    Dash,
}

impl Symbol {
    /// Returns the character this symbol stands for.
    pub fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::At => '@',
            Self::Underscore => '_',
            Self::Dash => '-',
        }
    }

    /// Returns the character as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => ".",
            Self::At => "@",
            Self::Underscore => "_",
            Self::Dash => "-",
        }
    }

    /// The name used when reading the symbol back to the user.
    pub fn spoken_name(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::At => "at",
            Self::Underscore => "underscore",
            Self::Dash => "dash",
        }
    }
}

/// One normalized utterance from a spelling session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalizedToken {
    /// A control word; contributes no text.
    Control(Control),
    /// A punctuation symbol.
    Symbol(Symbol),
    /// A single character or a multi-letter chunk such as `gmail`.
    Literal(String),
}

impl NormalizedToken {
    /// The text this token contributes to a transcript, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Control(_) => None,
            Self::Symbol(symbol) => Some(symbol.as_str()),
            Self::Literal(text) => Some(text),
        }
    }

    /// Whether this is the "finished" control word.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Control(Control::Done))
    }

    /// The short acknowledgement spoken after the token is added.
    ///
    /// Returns `None` for control tokens, which are not acknowledged.
    pub fn acknowledgement(&self) -> Option<String> {
        match self {
            Self::Control(_) => None,
            Self::Symbol(symbol) => Some(format!("Added {}.", symbol.spoken_name())),
            Self::Literal(text) => Some(format!("Added {text}")),
        }
    }
}
