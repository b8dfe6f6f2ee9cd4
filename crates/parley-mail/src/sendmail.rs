use crate::error::MailError;
use crate::message::render_message;
use crate::Mailer;
use async_trait::async_trait;
use parley_types::EmailDraft;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::info;

/// Timeout for the sendmail process.
const SENDMAIL_TIMEOUT: Duration = Duration::from_secs(30);

/// Hands messages to a local `sendmail -t`.
#[derive(Debug, Clone)]
pub struct SendmailMailer {
    binary: PathBuf,
}

impl SendmailMailer {
    pub fn new(binary: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Mailer for SendmailMailer {
    async fn send(&self, draft: &EmailDraft) -> Result<String, MailError> {
        let message = render_message(draft)?;

        let mut child = Command::new(&self.binary)
            .arg("-t")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MailError::Transport(format!("Failed to spawn sendmail: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| MailError::Transport("Failed to open stdin".to_string()))?;
        stdin
            .write_all(message.as_bytes())
            .await
            .map_err(|e| MailError::Transport(format!("Failed to write message: {}", e)))?;
        drop(stdin); // EOF ends the message

        let output = tokio::time::timeout(SENDMAIL_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                MailError::Transport(format!(
                    "sendmail timed out after {} seconds",
                    SENDMAIL_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| MailError::Transport(format!("Failed to wait for sendmail: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MailError::Transport(format!("sendmail failed: {}", stderr.trim())));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let id = if id.is_empty() {
            "sendmail".to_string()
        } else {
            id
        };
        info!(message_id = %id, "message handed to sendmail");
        Ok(id)
    }
}
