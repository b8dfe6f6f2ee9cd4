//! Guided structured input and confirmation.
//!
//! This crate is the part of the assistant that decides when a spoken value
//! is final and when an action may run. It owns no audio, GUI or network
//! code; everything it hears, says or sends goes through the
//! `parley-voice` and `parley-mail` contracts.
//!
//! - [`normalize`] turns one spelled utterance into a token.
//! - [`Transcript`] accumulates the spelled pieces of one field.
//! - [`FieldValidator`] decides whether a finished value is acceptable.
//! - [`ConfirmationArbiter`] asks yes/no questions across an ordered list of
//!   channels and fails closed.
//! - [`CaptureSession`] is the spelling state machine.
//! - [`SendEmailWorkflow`] gates the one side-effecting action, sending mail,
//!   behind a captured recipient and a final confirmation.
//!
//! [`mock`] holds scripted collaborators for driving all of the above in
//! tests.

pub mod arbiter;
pub mod listen;
pub mod mock;
pub mod normalizer;
pub mod session;
pub mod transcript;
pub mod validator;
pub mod workflow;

pub use arbiter::{classify_answer, ConfirmationArbiter, VoiceConfirmation};
pub use listen::{listen_for, SERVICE_UNAVAILABLE_NOTICE};
pub use normalizer::normalize;
pub use session::{CaptureConfig, CapturePrompts, CaptureSession, CaptureState};
pub use transcript::Transcript;
pub use validator::{EmailValidator, FieldValidator};
pub use workflow::{SendEmailWorkflow, SendReceipt};
