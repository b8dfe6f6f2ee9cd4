use crate::collaborator::Transcriber;
use crate::config::VoiceConfig;
use crate::error::VoiceError;
use async_trait::async_trait;
use parley_types::{InteractionError, ListenWindow};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Maximum audio input size for STT (10 MiB). Prevents OOM from oversized payloads.
const MAX_STT_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Timeout for STT process execution.
const STT_TIMEOUT: Duration = Duration::from_secs(120);

/// Placeholder in recorder arguments replaced by the phrase limit.
const SECONDS_PLACEHOLDER: &str = "{secs}";

#[derive(Debug, Clone)]
pub struct SttService {
    model_path: PathBuf,
    binary_path: PathBuf,
}

impl SttService {
    pub fn new(model_path: impl Into<PathBuf>, binary_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            binary_path: binary_path.into(),
        }
    }

    pub async fn transcribe(&self, audio_data: &[u8]) -> Result<String, VoiceError> {
        if audio_data.len() > MAX_STT_INPUT_BYTES {
            return Err(VoiceError::Stt(format!(
                "audio data exceeds maximum size: {} bytes (limit: {} bytes)",
                audio_data.len(),
                MAX_STT_INPUT_BYTES
            )));
        }

        let mut command = Command::new(&self.binary_path);

        // whisper.cpp: -m <model>, -f - reads WAV from stdin, -nt drops timestamps
        // so stdout carries only the recognised text.
        command
            .arg("-m")
            .arg(&self.model_path)
            .arg("-nt")
            .arg("-f")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|e| VoiceError::Stt(format!("Failed to spawn STT binary: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| VoiceError::Stt("Failed to open stdin".to_string()))?;

        stdin
            .write_all(audio_data)
            .await
            .map_err(|e| VoiceError::Stt(format!("Failed to write to stdin: {}", e)))?;
        drop(stdin); // EOF

        let output = tokio::time::timeout(STT_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Stt(format!(
                    "STT process timed out after {} seconds",
                    STT_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Stt(format!("Failed to read stdout: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Stt(format!("STT binary failed: {}", stderr)));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(text)
    }
}

/// Strips recognizer noise from a raw transcript.
///
/// Drops bracketed or parenthesised annotations (`[BLANK_AUDIO]`,
/// `(wind blowing)`), collapses whitespace, and trims surrounding
/// punctuation so a spoken "Dot." arrives as `Dot`. Typographic single
/// quotes become `'`, so "That’s all" matches like "That's all".
pub fn clean_transcript(raw: &str) -> String {
    let mut kept = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            '\u{2018}' | '\u{2019}' if depth == 0 => kept.push('\''),
            _ if depth == 0 => kept.push(c),
            _ => {}
        }
    }

    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | '"' | '\'' | ';' | ':'))
        .trim()
        .to_string()
}

/// Records one utterance from the microphone and transcribes it.
#[derive(Debug, Clone)]
pub struct MicrophoneTranscriber {
    recorder_binary: PathBuf,
    recorder_args: Vec<String>,
    stt: SttService,
}

impl MicrophoneTranscriber {
    pub fn new(
        recorder_binary: impl Into<PathBuf>,
        recorder_args: Vec<String>,
        stt: SttService,
    ) -> Self {
        Self {
            recorder_binary: recorder_binary.into(),
            recorder_args,
            stt,
        }
    }

    pub fn from_config(config: &VoiceConfig) -> Self {
        Self::new(
            &config.recorder_binary,
            config.recorder_args.clone(),
            SttService::new(&config.stt_model_path, &config.stt_binary),
        )
    }

    /// Runs the recorder for at most the window's phrase limit and returns
    /// the captured audio.
    pub async fn record(&self, window: ListenWindow) -> Result<Vec<u8>, VoiceError> {
        let seconds = window.phrase_limit_secs.to_string();
        let args = self
            .recorder_args
            .iter()
            .map(|arg| arg.replace(SECONDS_PLACEHOLDER, &seconds));

        let output = Command::new(&self.recorder_binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoiceError::Recorder(format!("Failed to spawn recorder: {}", e)))?
            .wait_with_output()
            .await
            .map_err(|e| VoiceError::Recorder(format!("Failed to read recorder: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Recorder(format!("Recorder failed: {}", stderr)));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Transcriber for MicrophoneTranscriber {
    async fn listen(&self, window: ListenWindow) -> Result<String, InteractionError> {
        debug!(
            timeout = window.timeout_secs,
            phrase_limit = window.phrase_limit_secs,
            "listening"
        );

        let audio = match tokio::time::timeout(window.total(), self.record(window)).await {
            Err(_) => {
                debug!("listen timed out");
                return Err(InteractionError::NoInput);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "recorder unavailable");
                return Err(InteractionError::ServiceUnavailable(e.to_string()));
            }
            Ok(Ok(audio)) => audio,
        };

        if audio.is_empty() {
            return Err(InteractionError::NoInput);
        }

        let raw = self.stt.transcribe(&audio).await.map_err(|e| {
            warn!(error = %e, "transcription failed");
            InteractionError::ServiceUnavailable(e.to_string())
        })?;

        let text = clean_transcript(&raw);
        if text.is_empty() {
            debug!("nothing recognised");
            return Err(InteractionError::NoInput);
        }

        info!(heard = %text, "transcribed utterance");
        Ok(text)
    }
}
