//! Visual yes/no confirmation through a zenity modal dialog.
//!
//! zenity exits with 0 for "Yes", 1 for "No" or a closed window, and 5 when
//! its own `--timeout` elapses. GTK also exits with 1 when it cannot open a
//! display, but says so on stderr; exit 1 only counts as "No" when stderr is
//! empty. Anything else, including a missing binary, means the channel could
//! not answer.

use crate::collaborator::ConfirmationChannel;
use crate::config::VoiceConfig;
use crate::error::VoiceError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Extra time allowed past the dialog's own timeout before it is killed.
const DIALOG_GRACE: Duration = Duration::from_secs(5);

/// Whether a graphical session is reachable from this process.
pub fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|value| !value.is_empty()))
}

#[derive(Debug, Clone)]
pub struct DialogConfirm {
    binary: PathBuf,
    title: String,
    timeout: Duration,
    require_display: bool,
}

impl DialogConfirm {
    pub fn new(binary: impl AsRef<Path>, title: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
            title: title.into(),
            timeout,
            require_display: false,
        }
    }

    /// The configured dialog. It refuses to run without a graphical display.
    pub fn from_config(config: &VoiceConfig) -> Self {
        Self::new(
            &config.dialog_binary,
            format!("{} confirmation", config.speaker_name),
            Duration::from_secs(config.dialog_timeout_seconds),
        )
        .requiring_display()
    }

    /// Reports the channel unavailable, without spawning anything, when
    /// neither `DISPLAY` nor `WAYLAND_DISPLAY` is set.
    pub fn requiring_display(mut self) -> Self {
        self.require_display = true;
        self
    }

    /// Shows the dialog and returns the user's answer.
    pub async fn prompt(&self, question: &str) -> Result<bool, VoiceError> {
        if self.require_display && !display_available() {
            return Err(VoiceError::Dialog(
                "no graphical display (DISPLAY and WAYLAND_DISPLAY are unset)".to_string(),
            ));
        }

        let child = Command::new(&self.binary)
            .arg("--question")
            .arg("--title")
            .arg(&self.title)
            .arg("--text")
            .arg(question)
            .arg("--timeout")
            .arg(self.timeout.as_secs().to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoiceError::Dialog(format!("Failed to spawn dialog: {}", e)))?;

        let output = tokio::time::timeout(self.timeout + DIALOG_GRACE, child.wait_with_output())
            .await
            .map_err(|_| VoiceError::Dialog("dialog did not close".to_string()))?
            .map_err(|e| VoiceError::Dialog(format!("Failed to wait for dialog: {}", e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) if stderr.trim().is_empty() => Ok(false),
            code => Err(VoiceError::Dialog(format!(
                "dialog exited with {:?}: {}",
                code,
                stderr.trim()
            ))),
        }
    }
}

#[async_trait]
impl ConfirmationChannel for DialogConfirm {
    fn name(&self) -> &'static str {
        "visual"
    }

    async fn ask(&self, question: &str) -> Option<bool> {
        match self.prompt(question).await {
            Ok(answer) => {
                debug!(answer, "dialog answered");
                Some(answer)
            }
            Err(e) => {
                warn!(error = %e, "visual confirmation unavailable");
                None
            }
        }
    }
}
