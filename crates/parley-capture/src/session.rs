//! The spelling state machine.
//!
//! ```text
//! Spelling --done--> PendingConfirmation --confirmed+valid--> Accepted
//!    ^                      |  |
//!    |   rejected/unclear   |  +--confirmed+invalid--> retry? --no--> Cancelled
//!    +----------------------+                            |
//!    +------------------------------yes-----------------+
//! ```
//!
//! Every pass through `Spelling` starts from an empty [`Transcript`]. Silence
//! while spelling re-prompts without leaving the state.

use crate::arbiter::ConfirmationArbiter;
use crate::listen::listen_for;
use crate::normalizer::normalize;
use crate::transcript::Transcript;
use crate::validator::{EmailValidator, FieldValidator};
use parley_types::{ConfirmationOutcome, InteractionError, ListenWindow};
use parley_voice::{Announcer, ConfirmationChannel, Transcriber};
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

/// Where the session is. Only used for logging; the loop in
/// [`CaptureSession::run`] is the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Spelling,
    PendingConfirmation,
    Accepted,
    Retrying,
    Cancelled,
}

impl CaptureState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spelling => "spelling",
            Self::PendingConfirmation => "pending_confirmation",
            Self::Accepted => "accepted",
            Self::Retrying => "retrying",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the session says. `{value}` in `confirm` and `live` is
/// replaced with the spelled text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturePrompts {
    pub intro: String,
    pub next: String,
    pub missed: String,
    pub empty: String,
    pub confirm: String,
    pub invalid: String,
    pub rejected: String,
    pub exhausted: String,
    pub live: String,
}

impl CapturePrompts {
    pub fn email() -> Self {
        Self {
            intro: "Please spell the recipient's email address, letter by letter. \
                    Say 'dot' for dot, 'at' for at, and say 'done' when finished."
                .into(),
            next: "Say the next character, or say 'done' if finished.".into(),
            missed: "I didn't catch that character. Please repeat the character or say 'done'."
                .into(),
            empty: "You didn't spell any characters. Canceling.".into(),
            confirm: "You spelled: {value}. Is this correct?".into(),
            invalid: "That doesn't look like a valid email address. Do you want to spell again?"
                .into(),
            rejected: "Okay, let's try again.".into(),
            exhausted: "Too many attempts. Canceling.".into(),
            live: "[Current spelled email] {value}".into(),
        }
    }

    fn fill(template: &str, value: &str) -> String {
        template.replace("{value}", value)
    }
}

impl Default for CapturePrompts {
    fn default() -> Self {
        Self::email()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Listen window for each spelled character.
    pub character_window: ListenWindow,
    /// Cap on confirmation cycles. `None` or `Some(0)` keeps asking until
    /// the user accepts or cancels.
    pub max_attempts: Option<u32>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            character_window: ListenWindow::CHARACTER,
            max_attempts: None,
        }
    }
}

/// Result of one spelling pass.
enum Spelled {
    Value(String),
    Empty,
}

/// Result of one confirmation cycle.
enum Verdict {
    Accept(String),
    Respell,
    Cancel,
}

/// Captures one field by spelling, confirmation and validation.
///
/// `run` may be called any number of times; each call starts from scratch.
pub struct CaptureSession {
    transcriber: Arc<dyn Transcriber>,
    announcer: Arc<dyn Announcer>,
    arbiter: ConfirmationArbiter,
    retry_channel: Arc<dyn ConfirmationChannel>,
    validator: Arc<dyn FieldValidator>,
    prompts: CapturePrompts,
    config: CaptureConfig,
}

impl CaptureSession {
    /// A session for an email recipient. `arbiter` answers "is this what you
    /// spelled"; `retry_channel` answers "spell again" after a bad address.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        announcer: Arc<dyn Announcer>,
        arbiter: ConfirmationArbiter,
        retry_channel: Arc<dyn ConfirmationChannel>,
    ) -> Self {
        Self {
            transcriber,
            announcer,
            arbiter,
            retry_channel,
            validator: Arc::new(EmailValidator),
            prompts: CapturePrompts::email(),
            config: CaptureConfig::default(),
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn FieldValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_prompts(mut self, prompts: CapturePrompts) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_config(mut self, config: CaptureConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> CaptureConfig {
        self.config
    }

    /// Runs until the field is accepted or the user cancels.
    ///
    /// `Err(InteractionError::UserCancelled)` is the only error returned.
    pub async fn run(&self) -> Result<String, InteractionError> {
        let session_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            "capture",
            %session_id,
            field = self.validator.name()
        );
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<String, InteractionError> {
        let mut attempt: u32 = 0;
        loop {
            if let Some(max) = self.config.max_attempts.filter(|&max| max > 0) {
                if attempt >= max {
                    warn!(attempt, max, "capture attempts exhausted");
                    self.announce(&self.prompts.exhausted).await;
                    return self.cancelled();
                }
            }
            attempt += 1;
            info!(attempt, state = %CaptureState::Spelling, "capture pass started");

            let value = match self.spell().await {
                Spelled::Value(value) => value,
                Spelled::Empty => {
                    self.announce(&self.prompts.empty).await;
                    return self.cancelled();
                }
            };

            match self.settle(value).await {
                Verdict::Accept(value) => {
                    info!(attempt, state = %CaptureState::Accepted, "field accepted");
                    return Ok(value);
                }
                Verdict::Respell => {
                    info!(attempt, state = %CaptureState::Retrying, "respelling");
                }
                Verdict::Cancel => return self.cancelled(),
            }
        }
    }

    /// One `Spelling` pass on a fresh transcript.
    async fn spell(&self) -> Spelled {
        let mut transcript = Transcript::new();
        self.announce(&self.prompts.intro).await;

        loop {
            self.announce(&self.prompts.next).await;
            let Some(heard) = listen_for(
                self.transcriber.as_ref(),
                self.announcer.as_ref(),
                self.config.character_window,
            )
            .await
            else {
                self.announce(&self.prompts.missed).await;
                continue;
            };

            let token = normalize(&heard);
            debug!(%heard, ?token, "spelled");

            if token.is_done() {
                let value = transcript.current();
                return if value.is_empty() {
                    Spelled::Empty
                } else {
                    Spelled::Value(value)
                };
            }

            transcript.append(&token);
            if let Some(ack) = token.acknowledgement() {
                self.announce(&ack).await;
            }
            self.announcer
                .display(&CapturePrompts::fill(&self.prompts.live, &transcript.current()));
        }
    }

    /// The `PendingConfirmation` state.
    async fn settle(&self, value: String) -> Verdict {
        let question = CapturePrompts::fill(&self.prompts.confirm, &value);
        let outcome = self.arbiter.confirm(&question).await;
        info!(state = %CaptureState::PendingConfirmation, %outcome, "candidate checked");

        match outcome {
            ConfirmationOutcome::Confirmed if self.validator.validate(&value) => {
                Verdict::Accept(value)
            }
            ConfirmationOutcome::Confirmed => {
                let err = InteractionError::InvalidFormat(value);
                info!(error = %err, "confirmed value failed validation");
                match self.retry_channel.ask(&self.prompts.invalid).await {
                    Some(true) => Verdict::Respell,
                    _ => Verdict::Cancel,
                }
            }
            ConfirmationOutcome::Rejected | ConfirmationOutcome::Indeterminate => {
                self.announce(&self.prompts.rejected).await;
                Verdict::Respell
            }
        }
    }

    fn cancelled(&self) -> Result<String, InteractionError> {
        info!(state = %CaptureState::Cancelled, "capture cancelled");
        Err(InteractionError::UserCancelled)
    }

    async fn announce(&self, text: &str) {
        self.announcer.announce(text).await;
    }
}
