//! Outgoing mail transports for the parley assistant.
//!
//! The send workflow only ever sees the [`Mailer`] trait. Two transports are
//! provided:
//!
//! - [`GmailMailer`] posts a base64url-encoded RFC 2822 message to the Gmail
//!   REST API using an already-issued OAuth2 access token.
//! - [`SendmailMailer`] pipes the same message into a local `sendmail -t`.
//!
//! Both strip CR/LF from the subject so spoken text can never inject headers.

mod error;
mod gmail;
mod message;
mod sendmail;

use async_trait::async_trait;
use parley_types::EmailDraft;
use serde::{Deserialize, Serialize};

pub use error::MailError;
pub use gmail::{GmailMailer, GMAIL_API_BASE};
pub use message::{encode_raw, render_message};
pub use sendmail::SendmailMailer;

/// Delivers a confirmed draft.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the draft once. Returns a transport-specific message id.
    async fn send(&self, draft: &EmailDraft) -> Result<String, MailError>;
}

/// Which transport the assistant uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailTransport {
    /// Gmail REST API.
    #[default]
    Gmail,
    /// Local `sendmail` binary.
    Sendmail,
}

impl std::str::FromStr for MailTransport {
    type Err = MailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gmail" => Ok(Self::Gmail),
            "sendmail" => Ok(Self::Sendmail),
            other => Err(MailError::Config(format!("unknown mail transport: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_parsing() {
        assert_eq!("gmail".parse::<MailTransport>().unwrap(), MailTransport::Gmail);
        assert_eq!(
            " Sendmail ".parse::<MailTransport>().unwrap(),
            MailTransport::Sendmail
        );
        assert!("smtp".parse::<MailTransport>().is_err());
    }
}
