//! Shared types, error definitions, and constants for the parley assistant.
//!
//! This crate provides the foundational types used across all parley crates:
//! the normalized spelling token, the tri-state confirmation outcome, the
//! email draft assembled by the send workflow, listen windows, and the
//! interaction error taxonomy (via `thiserror`).
//!
//! No crate in the workspace depends on anything *except* `parley-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod token;
pub mod voice;

pub use token::{Control, NormalizedToken, Symbol};
pub use voice::ListenWindow;

/// Subject used when the user says nothing at the subject prompt.
pub const NO_SUBJECT: &str = "No subject";

/// Result of asking the user a yes/no question.
///
/// `Indeterminate` covers both "no channel could answer" and "the answer was
/// neither yes nor no". It is never treated as acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationOutcome {
    /// The user answered yes.
    Confirmed,
    /// The user answered no.
    Rejected,
    /// No usable answer.
    Indeterminate,
}

impl ConfirmationOutcome {
    /// Maps a channel answer onto an outcome. `None` becomes `Indeterminate`.
    pub fn from_answer(answer: Option<bool>) -> Self {
        match answer {
            Some(true) => Self::Confirmed,
            Some(false) => Self::Rejected,
            None => Self::Indeterminate,
        }
    }

    /// Only `Confirmed` counts as acceptance.
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Returns the string label for this outcome.
    pub fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Rejected => "REJECTED",
            Self::Indeterminate => "INDETERMINATE",
        }
    }
}

impl std::fmt::Display for ConfirmationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An outgoing email assembled by the send workflow.
///
/// Built fresh for each send attempt and dropped when the workflow ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    /// Validated and confirmed recipient address.
    pub recipient: String,
    /// Spoken subject, or [`NO_SUBJECT`].
    pub subject: String,
    /// Spoken body, or empty.
    pub body: String,
}

impl EmailDraft {
    /// Builds a draft, substituting the fallbacks for fields nobody spoke.
    pub fn new(recipient: impl Into<String>, subject: Option<String>, body: Option<String>) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.unwrap_or_else(|| NO_SUBJECT.to_string()),
            body: body.unwrap_or_default(),
        }
    }

    /// The question put to the user before the draft is handed to a mailer.
    pub fn summary(&self) -> String {
        format!(
            "Send email to: {}\nSubject: {}\nMessage: {}\n\nSend now?",
            self.recipient, self.subject, self.body
        )
    }
}

/// Failure kinds that can occur while talking to the user.
///
/// None of these is fatal to the process. Each one resolves to a spoken
/// notice and a return to a well-defined state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// Timeout, silence, or speech the recognizer could not make out.
    #[error("no speech was captured")]
    NoInput,

    /// The transcription backend could not be reached.
    #[error("speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A captured value failed its field validator.
    #[error("invalid format: {0:?}")]
    InvalidFormat(String),

    /// The user answered no, or gave no usable answer, at a confirmation.
    #[error("user declined the confirmation")]
    UserDeclined,

    /// The user abandoned the current workflow.
    #[error("user cancelled")]
    UserCancelled,

    /// The external action itself failed.
    #[error("action failed: {0}")]
    ActionFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_answer() {
        assert_eq!(
            ConfirmationOutcome::from_answer(Some(true)),
            ConfirmationOutcome::Confirmed
        );
        assert_eq!(
            ConfirmationOutcome::from_answer(Some(false)),
            ConfirmationOutcome::Rejected
        );
        assert_eq!(
            ConfirmationOutcome::from_answer(None),
            ConfirmationOutcome::Indeterminate
        );
    }

    #[test]
    fn only_confirmed_is_acceptance() {
        assert!(ConfirmationOutcome::Confirmed.is_confirmed());
        assert!(!ConfirmationOutcome::Rejected.is_confirmed());
        assert!(!ConfirmationOutcome::Indeterminate.is_confirmed());
    }

    #[test]
    fn draft_defaults() {
        let draft = EmailDraft::new("a@b.c", None, None);
        assert_eq!(draft.subject, NO_SUBJECT);
        assert_eq!(draft.body, "");

        let draft = EmailDraft::new("a@b.c", Some("hi".into()), Some("see you".into()));
        assert_eq!(draft.subject, "hi");
        assert_eq!(draft.body, "see you");
    }

    #[test]
    fn draft_summary_names_every_field() {
        let draft = EmailDraft::new("jo.s@gmail.com", Some("lunch".into()), Some("noon?".into()));
        let summary = draft.summary();
        assert!(summary.contains("jo.s@gmail.com"));
        assert!(summary.contains("Subject: lunch"));
        assert!(summary.contains("Message: noon?"));
    }
}
