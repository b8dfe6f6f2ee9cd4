//! Yes/no confirmation across an ordered list of channels.
//!
//! The arbiter asks each channel in turn and stops at the first definite
//! answer. A channel that is unavailable, or that heard something other than
//! yes or no, passes the question on. When every channel passes, the outcome
//! is [`ConfirmationOutcome::Indeterminate`], which callers treat as a
//! decline.

use crate::listen::listen_for;
use async_trait::async_trait;
use parley_types::{ConfirmationOutcome, ListenWindow};
use parley_voice::{Announcer, ConfirmationChannel, Transcriber};
use std::sync::Arc;
use tracing::{debug, info};

const AFFIRMATIVE_WORDS: &[&str] = &["yes", "yeah", "ya"];
const NEGATIVE_WORDS: &[&str] = &["no", "nah"];

/// Appended to a question when it is asked by voice.
pub const VOICE_SUFFIX: &str = "Please say yes or no.";

/// Classifies a spoken answer.
///
/// Affirmative words are checked first, so "yes, no problem" is a yes.
/// Matching is per word: "nobody" is not a no.
pub fn classify_answer(answer: &str) -> Option<bool> {
    let lowered = answer.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if words.iter().any(|w| AFFIRMATIVE_WORDS.contains(w)) {
        Some(true)
    } else if words.iter().any(|w| NEGATIVE_WORDS.contains(w)) {
        Some(false)
    } else {
        None
    }
}

/// Asks the question aloud and listens once for the answer.
///
/// With [`VoiceConfirmation::speaking`] the channel reads a fixed, shorter
/// question instead of the one it was asked, for questions too long to read
/// out comfortably.
pub struct VoiceConfirmation {
    transcriber: Arc<dyn Transcriber>,
    announcer: Arc<dyn Announcer>,
    window: ListenWindow,
    spoken: Option<String>,
}

impl VoiceConfirmation {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        announcer: Arc<dyn Announcer>,
        window: ListenWindow,
    ) -> Self {
        Self {
            transcriber,
            announcer,
            window,
            spoken: None,
        }
    }

    /// Same channel, different listen window.
    pub fn with_window(&self, window: ListenWindow) -> Self {
        Self {
            transcriber: Arc::clone(&self.transcriber),
            announcer: Arc::clone(&self.announcer),
            window,
            spoken: self.spoken.clone(),
        }
    }

    pub fn speaking(mut self, question: impl Into<String>) -> Self {
        self.spoken = Some(question.into());
        self
    }
}

#[async_trait]
impl ConfirmationChannel for VoiceConfirmation {
    fn name(&self) -> &'static str {
        "voice"
    }

    async fn ask(&self, question: &str) -> Option<bool> {
        let question = self.spoken.as_deref().unwrap_or(question);
        self.announcer
            .announce(&format!("{question} {VOICE_SUFFIX}"))
            .await;
        let answer =
            listen_for(self.transcriber.as_ref(), self.announcer.as_ref(), self.window).await?;
        let classified = classify_answer(&answer);
        debug!(%answer, ?classified, "voice answer");
        classified
    }
}

/// Tries confirmation channels in order until one gives a definite answer.
#[derive(Clone, Default)]
pub struct ConfirmationArbiter {
    channels: Vec<Arc<dyn ConfirmationChannel>>,
}

impl ConfirmationArbiter {
    pub fn new(channels: Vec<Arc<dyn ConfirmationChannel>>) -> Self {
        Self { channels }
    }

    /// Adds a channel after the existing ones.
    pub fn then(mut self, channel: Arc<dyn ConfirmationChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    pub async fn confirm(&self, question: &str) -> ConfirmationOutcome {
        for channel in &self.channels {
            if let Some(answer) = channel.ask(question).await {
                let outcome = ConfirmationOutcome::from_answer(Some(answer));
                info!(channel = channel.name(), %outcome, "confirmation answered");
                return outcome;
            }
            debug!(channel = channel.name(), "channel gave no answer");
        }
        info!(outcome = %ConfirmationOutcome::Indeterminate, "no channel answered");
        ConfirmationOutcome::Indeterminate
    }
}
