//! Voice collaborators for the parley assistant.
//!
//! Defines the three contracts the confirmation engine talks through
//! ([`Transcriber`], [`Announcer`], [`ConfirmationChannel`]) and ships the
//! production implementations of each:
//!
//! - [`MicrophoneTranscriber`] records one utterance with an external recorder
//!   and transcribes it with a whisper.cpp binary ([`SttService`]).
//! - [`SpeechAnnouncer`] prints every message and speaks it through
//!   espeak-ng ([`TtsService`]).
//! - [`DialogConfirm`] asks a yes/no question through a zenity modal dialog.
//!
//! All three shell out to local binaries so the assistant has no audio or GUI
//! toolkit linked into the process. Failures never propagate as panics: the
//! transcriber reports [`parley_types::InteractionError`] variants, the
//! announcer logs and carries on, and the dialog reports "unavailable".

pub mod collaborator;
pub mod config;
pub mod dialog;
pub mod error;
pub mod stt;
pub mod tts;

pub use collaborator::{Announcer, ConfirmationChannel, Transcriber};
pub use config::VoiceConfig;
pub use dialog::DialogConfirm;
pub use error::VoiceError;
pub use stt::{MicrophoneTranscriber, SttService};
pub use tts::{SpeechAnnouncer, TtsService};
