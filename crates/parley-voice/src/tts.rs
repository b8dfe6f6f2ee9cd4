use crate::collaborator::Announcer;
use crate::config::VoiceConfig;
use crate::error::VoiceError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::warn;

/// Maximum text input size for TTS (64 KiB). Prevents resource exhaustion from
/// oversized synthesis requests.
const MAX_TTS_INPUT_BYTES: usize = 64 * 1024;

/// Timeout for TTS process execution.
const TTS_TIMEOUT: Duration = Duration::from_secs(60);

/// Speaks text aloud through an espeak-ng compatible binary.
#[derive(Debug, Clone)]
pub struct TtsService {
    binary: PathBuf,
    words_per_minute: u32,
}

impl TtsService {
    pub fn new(binary: impl AsRef<Path>, words_per_minute: u32) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
            words_per_minute,
        }
    }

    /// Speaks `text` and waits for playback to finish.
    pub async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        if text.len() > MAX_TTS_INPUT_BYTES {
            return Err(VoiceError::Tts(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_TTS_INPUT_BYTES
            )));
        }

        if !(80..=500).contains(&self.words_per_minute) {
            return Err(VoiceError::Config(
                "Speech rate must be between 80 and 500 words per minute".to_string(),
            ));
        }

        let mut command = Command::new(&self.binary);
        command
            .arg("-s")
            .arg(self.words_per_minute.to_string())
            .arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| VoiceError::Tts(format!("Failed to spawn {:?}: {}", self.binary, e)))?;

        let output = tokio::time::timeout(TTS_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Tts(format!(
                    "TTS process timed out after {} seconds",
                    TTS_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Tts(format!("Failed to wait for TTS: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Tts(format!("TTS failed: {}", stderr)));
        }

        Ok(())
    }
}

/// Prints every announcement and, when a [`TtsService`] is attached, speaks it.
#[derive(Debug, Clone)]
pub struct SpeechAnnouncer {
    speaker_name: String,
    tts: Option<TtsService>,
}

impl SpeechAnnouncer {
    pub fn new(speaker_name: impl Into<String>, tts: Option<TtsService>) -> Self {
        Self {
            speaker_name: speaker_name.into(),
            tts,
        }
    }

    pub fn from_config(config: &VoiceConfig) -> Self {
        let tts = config
            .speak
            .then(|| TtsService::new(&config.tts_binary, config.words_per_minute));
        Self::new(&config.speaker_name, tts)
    }
}

#[async_trait]
impl Announcer for SpeechAnnouncer {
    async fn announce(&self, text: &str) {
        println!("{}: {}", self.speaker_name, text);
        if let Some(tts) = &self.tts {
            if let Err(e) = tts.speak(text).await {
                warn!(error = %e, "speech output failed");
            }
        }
    }

    fn display(&self, text: &str) {
        println!("{text}");
    }
}
