//! Error types for mail delivery.

/// Errors that can occur while sending a draft.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The transport is misconfigured (missing token, unknown transport).
    #[error("mail configuration error: {0}")]
    Config(String),

    /// The recipient address is not deliverable as written.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    /// The HTTP request could not be completed.
    #[error("mail HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The mail API answered with an error status.
    #[error("mail API error: {0}")]
    Api(String),

    /// A local transport process failed.
    #[error("mail transport error: {0}")]
    Transport(String),
}
