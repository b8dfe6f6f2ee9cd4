//! Scripted collaborators for exercising the engine without audio, GUI or
//! network.
//!
//! Each double records what it was asked so tests can assert on the
//! conversation afterwards.

use async_trait::async_trait;
use parley_mail::{MailError, Mailer};
use parley_types::{EmailDraft, InteractionError, ListenWindow};
use parley_voice::{Announcer, ConfirmationChannel, Transcriber};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed list of listen results in order.
///
/// # Panics
///
/// `listen` panics once the script is exhausted, so a conversation that
/// asks for more input than the test provided fails loudly instead of
/// re-prompting forever.
#[derive(Debug, Default)]
pub struct ScriptedTranscriber {
    script: Mutex<VecDeque<Result<String, InteractionError>>>,
    windows: Mutex<Vec<ListenWindow>>,
}

impl ScriptedTranscriber {
    /// `Some(text)` is heard; `None` is silence.
    pub fn new<'a>(script: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self::from_results(script.into_iter().map(|step| match step {
            Some(text) => Ok(text.to_string()),
            None => Err(InteractionError::NoInput),
        }))
    }

    pub fn from_results(script: impl IntoIterator<Item = Result<String, InteractionError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            windows: Mutex::new(Vec::new()),
        }
    }

    /// Number of scripted results not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Windows passed to every `listen` call so far.
    pub fn windows(&self) -> Vec<ListenWindow> {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn listen(&self, window: ListenWindow) -> Result<String, InteractionError> {
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(window);
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| panic!("transcriber script exhausted"))
    }
}

/// Keeps every announcement and display line.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    announcements: Mutex<Vec<String>>,
    displays: Mutex<Vec<String>>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn announcements(&self) -> Vec<String> {
        self.announcements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn displays(&self) -> Vec<String> {
        self.displays.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether any announcement contains `needle`.
    pub fn announced(&self, needle: &str) -> bool {
        self.announcements().iter().any(|a| a.contains(needle))
    }
}

#[async_trait]
impl Announcer for RecordingAnnouncer {
    async fn announce(&self, text: &str) {
        self.announcements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
    }

    fn display(&self, text: &str) {
        self.displays
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
    }
}

/// A confirmation channel that always gives the same answer.
#[derive(Debug)]
pub struct FixedChannel {
    answer: Option<bool>,
    questions: Mutex<Vec<String>>,
}

impl FixedChannel {
    pub fn new(answer: Option<bool>) -> Self {
        Self {
            answer,
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn yes() -> Self {
        Self::new(Some(true))
    }

    pub fn no() -> Self {
        Self::new(Some(false))
    }

    /// Behaves like a dialog that cannot be shown.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ConfirmationChannel for FixedChannel {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn ask(&self, question: &str) -> Option<bool> {
        self.questions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(question.to_string());
        self.answer
    }
}

/// Records every draft it is asked to send.
#[derive(Debug)]
pub struct RecordingMailer {
    failure: Option<String>,
    sent: Mutex<Vec<EmailDraft>>,
}

impl RecordingMailer {
    /// A mailer whose sends succeed.
    pub fn new() -> Self {
        Self {
            failure: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A mailer whose sends fail with a transport error.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Every draft passed to `send`, including failed attempts.
    pub fn sent(&self) -> Vec<EmailDraft> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for RecordingMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, draft: &EmailDraft) -> Result<String, MailError> {
        let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.push(draft.clone());
        match &self.failure {
            Some(reason) => Err(MailError::Transport(reason.clone())),
            None => Ok(format!("mock-{}", sent.len())),
        }
    }
}
