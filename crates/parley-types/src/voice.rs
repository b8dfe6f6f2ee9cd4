//! Listen window definitions.
//!
//! Every listen call is bounded by two limits: how long to wait for speech to
//! start, and how long a single phrase may run once it has started. Spelling
//! a character uses a short window; dictating an email body a long one.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for a single blocking listen call, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenWindow {
    /// Seconds to wait for speech to begin before giving up.
    #[serde(alias = "timeout")]
    pub timeout_secs: u64,
    /// Maximum seconds of speech captured once it begins.
    #[serde(alias = "phrase_limit")]
    pub phrase_limit_secs: u64,
}

impl ListenWindow {
    /// One spelled character.
    pub const CHARACTER: Self = Self::new(8, 5);
    /// A yes/no answer.
    pub const CONFIRM: Self = Self::new(6, 3);
    /// The final "send now?" answer.
    pub const FINAL_CONFIRM: Self = Self::new(8, 4);
    /// An email subject.
    pub const SUBJECT: Self = Self::new(10, 8);
    /// A free-form email body.
    pub const BODY: Self = Self::new(30, 25);
    /// Listening for the wake word.
    pub const WAKE: Self = Self::new(6, 3);
    /// The command following the wake word.
    pub const COMMAND: Self = Self::new(6, 10);
    /// A city name for the weather command.
    pub const CITY: Self = Self::new(6, 6);
    /// A file name for the file search command.
    pub const FILENAME: Self = Self::new(8, 8);

    pub const fn new(timeout_secs: u64, phrase_limit_secs: u64) -> Self {
        Self {
            timeout_secs,
            phrase_limit_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn phrase_limit(&self) -> Duration {
        Duration::from_secs(self.phrase_limit_secs)
    }

    /// Upper bound on how long a listen call may block.
    pub fn total(&self) -> Duration {
        self.timeout() + self.phrase_limit()
    }
}

impl Default for ListenWindow {
    fn default() -> Self {
        Self::COMMAND
    }
}
