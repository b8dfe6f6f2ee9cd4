//! Contracts between the confirmation engine and the outside world.

use async_trait::async_trait;
use parley_types::{InteractionError, ListenWindow};

/// Captures and transcribes one utterance.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Blocks until speech has been transcribed or the window elapses.
    ///
    /// Returns `NoInput` for silence, timeouts and unrecognisable speech, and
    /// `ServiceUnavailable` when the recognizer itself cannot be reached.
    /// Never returns an empty string.
    async fn listen(&self, window: ListenWindow) -> Result<String, InteractionError>;
}

/// Emits messages to the user.
#[async_trait]
pub trait Announcer: Send + Sync {
    /// Prints and speaks `text`. Fire-and-forget: failures are logged by the
    /// implementation and never reach the caller.
    async fn announce(&self, text: &str);

    /// Prints `text` without speaking it, e.g. a live transcript line.
    fn display(&self, text: &str);
}

/// Something that can answer a yes/no question.
#[async_trait]
pub trait ConfirmationChannel: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns `Some(answer)` for a definite yes or no, `None` when the
    /// channel is unavailable or the answer could not be classified.
    async fn ask(&self, question: &str) -> Option<bool>;
}
