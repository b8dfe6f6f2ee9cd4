use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_recorder_binary() -> PathBuf {
    PathBuf::from("arecord")
}

fn default_recorder_args() -> Vec<String> {
    [
        "-q", "-f", "S16_LE", "-r", "16000", "-c", "1", "-t", "wav", "-d", "{secs}", "-",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_stt_binary() -> PathBuf {
    PathBuf::from("whisper-cli")
}

fn default_stt_model_path() -> PathBuf {
    PathBuf::from("models/ggml-base.en.bin")
}

fn default_tts_binary() -> PathBuf {
    PathBuf::from("espeak-ng")
}

fn default_dialog_binary() -> PathBuf {
    PathBuf::from("zenity")
}

fn default_true() -> bool {
    true
}

fn default_speaker_name() -> String {
    "Jarvis".to_string()
}

fn default_wake_word() -> String {
    "jarvis".to_string()
}

fn default_words_per_minute() -> u32 {
    175
}

fn default_dialog_timeout_seconds() -> u64 {
    120
}

/// Settings for the local speech and dialog binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Recorder that writes one WAV utterance to stdout.
    #[serde(default = "default_recorder_binary")]
    pub recorder_binary: PathBuf,
    /// Recorder arguments. `{secs}` is replaced by the phrase limit.
    #[serde(default = "default_recorder_args")]
    pub recorder_args: Vec<String>,
    /// whisper.cpp command-line binary.
    #[serde(default = "default_stt_binary")]
    pub stt_binary: PathBuf,
    /// GGML model passed to the STT binary.
    #[serde(default = "default_stt_model_path")]
    pub stt_model_path: PathBuf,
    /// espeak-ng compatible speech binary.
    #[serde(default = "default_tts_binary")]
    pub tts_binary: PathBuf,
    /// Whether announcements are spoken as well as printed.
    #[serde(default = "default_true")]
    pub speak: bool,
    /// Speech rate passed to the TTS binary.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    /// Name printed in front of every announcement.
    #[serde(default = "default_speaker_name")]
    pub speaker_name: String,
    /// zenity compatible dialog binary.
    #[serde(default = "default_dialog_binary")]
    pub dialog_binary: PathBuf,
    /// Whether to try the visual dialog before asking by voice.
    #[serde(default = "default_true")]
    pub visual_confirm: bool,
    /// Seconds a dialog may stay open before it counts as unanswered.
    #[serde(default = "default_dialog_timeout_seconds")]
    pub dialog_timeout_seconds: u64,
    /// Word that activates the assistant.
    #[serde(default = "default_wake_word")]
    pub wake_word: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            recorder_binary: default_recorder_binary(),
            recorder_args: default_recorder_args(),
            stt_binary: default_stt_binary(),
            stt_model_path: default_stt_model_path(),
            tts_binary: default_tts_binary(),
            speak: true,
            words_per_minute: default_words_per_minute(),
            speaker_name: default_speaker_name(),
            dialog_binary: default_dialog_binary(),
            visual_confirm: true,
            dialog_timeout_seconds: default_dialog_timeout_seconds(),
            wake_word: default_wake_word(),
        }
    }
}
