//! Recipient, subject, body, final confirmation, send.
//!
//! The mailer is called at most once per run, and only after the final
//! confirmation came back `Confirmed`.

use crate::arbiter::ConfirmationArbiter;
use crate::listen::listen_for;
use crate::session::CaptureSession;
use parley_mail::Mailer;
use parley_types::{EmailDraft, InteractionError, ListenWindow};
use parley_voice::{Announcer, Transcriber};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

pub const RECIPIENT_CANCELLED: &str = "Recipient not confirmed. Cancelling email.";
pub const SUBJECT_PROMPT: &str = "What is the subject?";
pub const BODY_PROMPT: &str = "What should I say in the email?";
pub const NOT_SENDING: &str = "Okay, I will not send the email.";
pub const SENT: &str = "Email sent successfully.";
pub const SEND_FAILED: &str = "I couldn't send the email.";

/// What a successful send hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Identifier reported by the transport.
    pub message_id: String,
    pub recipient: String,
}

/// The send-email conversation.
pub struct SendEmailWorkflow {
    recipient: CaptureSession,
    transcriber: Arc<dyn Transcriber>,
    announcer: Arc<dyn Announcer>,
    final_arbiter: ConfirmationArbiter,
    mailer: Arc<dyn Mailer>,
    subject_window: ListenWindow,
    body_window: ListenWindow,
}

impl SendEmailWorkflow {
    /// `final_arbiter` is asked the draft summary before sending.
    pub fn new(
        recipient: CaptureSession,
        transcriber: Arc<dyn Transcriber>,
        announcer: Arc<dyn Announcer>,
        final_arbiter: ConfirmationArbiter,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            recipient,
            transcriber,
            announcer,
            final_arbiter,
            mailer,
            subject_window: ListenWindow::SUBJECT,
            body_window: ListenWindow::BODY,
        }
    }

    pub fn with_windows(mut self, subject: ListenWindow, body: ListenWindow) -> Self {
        self.subject_window = subject;
        self.body_window = body;
        self
    }

    /// Runs the whole conversation once.
    ///
    /// Errors: `UserCancelled` when no recipient was captured, `UserDeclined`
    /// when the final confirmation was anything but yes, `ActionFailure`
    /// when the transport failed. Each is announced before returning.
    pub async fn run(&self) -> Result<SendReceipt, InteractionError> {
        let session_id = uuid::Uuid::new_v4();
        self.run_inner()
            .instrument(tracing::info_span!("send_email", %session_id))
            .await
    }

    async fn run_inner(&self) -> Result<SendReceipt, InteractionError> {
        let recipient = match self.recipient.run().await {
            Ok(recipient) => recipient,
            Err(err) => {
                info!(error = %err, "no recipient");
                self.announcer.announce(RECIPIENT_CANCELLED).await;
                return Err(InteractionError::UserCancelled);
            }
        };

        self.announcer.announce(SUBJECT_PROMPT).await;
        let subject = self.listen(self.subject_window).await;

        self.announcer.announce(BODY_PROMPT).await;
        let body = self.listen(self.body_window).await;

        let draft = EmailDraft::new(recipient, subject, body);
        let outcome = self.final_arbiter.confirm(&draft.summary()).await;
        if !outcome.is_confirmed() {
            info!(%outcome, "send declined");
            self.announcer.announce(NOT_SENDING).await;
            return Err(InteractionError::UserDeclined);
        }

        match self.mailer.send(&draft).await {
            Ok(message_id) => {
                info!(%message_id, "email sent");
                self.announcer.announce(SENT).await;
                Ok(SendReceipt {
                    message_id,
                    recipient: draft.recipient,
                })
            }
            Err(err) => {
                warn!(error = %err, "email send failed");
                self.announcer.announce(SEND_FAILED).await;
                Err(InteractionError::ActionFailure(err.to_string()))
            }
        }
    }

    async fn listen(&self, window: ListenWindow) -> Option<String> {
        listen_for(self.transcriber.as_ref(), self.announcer.as_ref(), window)
            .await
            .map(|text| text.trim().to_string())
    }
}
