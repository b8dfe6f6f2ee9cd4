use parley_types::{InteractionError, ListenWindow};
use parley_voice::{Announcer, Transcriber};
use tracing::debug;

/// Spoken when the recognizer backend cannot be reached.
pub const SERVICE_UNAVAILABLE_NOTICE: &str = "Speech recognition service is unavailable.";

/// One bounded listen, collapsed to "heard something" or "heard nothing".
///
/// `NoInput` and `ServiceUnavailable` both become `None`; the latter is also
/// announced so the user knows why nothing is happening.
pub async fn listen_for(
    transcriber: &dyn Transcriber,
    announcer: &dyn Announcer,
    window: ListenWindow,
) -> Option<String> {
    match transcriber.listen(window).await {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) | Err(InteractionError::NoInput) => None,
        Err(InteractionError::ServiceUnavailable(reason)) => {
            debug!(%reason, "listen failed");
            announcer.announce(SERVICE_UNAVAILABLE_NOTICE).await;
            None
        }
        Err(other) => {
            debug!(error = %other, "unexpected listen result");
            None
        }
    }
}
