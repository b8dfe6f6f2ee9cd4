#![cfg(unix)]

use parley_capture::mock::{RecordingAnnouncer, ScriptedTranscriber};
use parley_capture::{CaptureSession, ConfirmationArbiter, VoiceConfirmation};
use parley_types::{ConfirmationOutcome, ListenWindow};
use parley_voice::DialogConfirm;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// A zenity stand-in that fails the way GTK does without a display.
fn headless_zenity(dir: &Path) -> PathBuf {
    let path = dir.join("zenity");
    std::fs::write(
        &path,
        "#!/bin/sh\necho '(zenity:4242): Gtk-WARNING **: cannot open display: ' >&2\nexit 1\n",
    )
    .unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn dialog_without_display_defers_to_voice() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dialog = DialogConfirm::new(
        headless_zenity(temp_dir.path()),
        "t",
        Duration::from_secs(2),
    );
    let transcriber = Arc::new(ScriptedTranscriber::new([Some("yes")]));
    let announcer = Arc::new(RecordingAnnouncer::new());
    let voice = VoiceConfirmation::new(
        transcriber.clone(),
        announcer.clone(),
        ListenWindow::CONFIRM,
    );
    let arbiter = ConfirmationArbiter::new(vec![Arc::new(dialog), Arc::new(voice)]);

    assert_eq!(
        arbiter.confirm("You spelled: a@b.c. Is this correct?").await,
        ConfirmationOutcome::Confirmed
    );
    assert_eq!(transcriber.windows(), [ListenWindow::CONFIRM]);
}

#[tokio::test]
async fn headless_session_can_still_accept() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dialog = DialogConfirm::new(
        headless_zenity(temp_dir.path()),
        "t",
        Duration::from_secs(2),
    );
    let transcriber = Arc::new(ScriptedTranscriber::new([
        Some("a"),
        Some("at"),
        Some("b"),
        Some("dot"),
        Some("c"),
        Some("done"),
        Some("yes"),
    ]));
    let announcer = Arc::new(RecordingAnnouncer::new());
    let voice = VoiceConfirmation::new(
        transcriber.clone(),
        announcer.clone(),
        ListenWindow::CONFIRM,
    );
    let retry = voice.with_window(ListenWindow::CONFIRM);
    let session = CaptureSession::new(
        transcriber.clone(),
        announcer.clone(),
        ConfirmationArbiter::new(vec![Arc::new(dialog), Arc::new(voice)]),
        Arc::new(retry),
    );

    assert_eq!(session.run().await.as_deref(), Ok("a@b.c"));
    assert!(!announcer.announced("Okay, let's try again."));
    assert_eq!(transcriber.remaining(), 0);
}
