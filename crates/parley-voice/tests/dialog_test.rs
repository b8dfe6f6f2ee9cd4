#![cfg(unix)]

use parley_voice::{ConfirmationChannel, DialogConfirm};
use serial_test::serial;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn test_dialog_exit_codes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let yes = write_script(temp_dir.path(), "yes.sh", "exit 0");
    let no = write_script(temp_dir.path(), "no.sh", "exit 1");
    let timed_out = write_script(temp_dir.path(), "timeout.sh", "exit 5");
    let headless = write_script(
        temp_dir.path(),
        "headless.sh",
        "echo 'Gtk-WARNING **: cannot open display: ' >&2\nexit 1",
    );

    let timeout = Duration::from_secs(2);
    assert_eq!(
        DialogConfirm::new(&yes, "t", timeout).ask("Send?").await,
        Some(true)
    );
    assert_eq!(
        DialogConfirm::new(&no, "t", timeout).ask("Send?").await,
        Some(false)
    );
    assert_eq!(
        DialogConfirm::new(&timed_out, "t", timeout).ask("Send?").await,
        None
    );
    assert_eq!(
        DialogConfirm::new(&headless, "t", timeout).ask("Send?").await,
        None
    );
}

#[tokio::test]
async fn test_dialog_missing_binary_is_unavailable() {
    let dialog = DialogConfirm::new("/nonexistent/zenity", "t", Duration::from_secs(1));
    assert_eq!(dialog.name(), "visual");
    assert_eq!(dialog.ask("Is this correct?").await, None);
}

#[tokio::test]
async fn test_dialog_receives_question() {
    let temp_dir = tempfile::tempdir().unwrap();
    let seen = temp_dir.path().join("question.txt");
    // Arguments: --question --title <t> --text <q> --timeout <n>
    let bin = write_script(
        temp_dir.path(),
        "mock_zenity.sh",
        &format!("printf '%s' \"$5\" > {}\nexit 0", seen.display()),
    );

    let dialog = DialogConfirm::new(&bin, "Jarvis confirmation", Duration::from_secs(2));
    assert_eq!(
        dialog.ask("You spelled: a@b.c. Is this correct?").await,
        Some(true)
    );
    assert_eq!(
        std::fs::read_to_string(&seen).unwrap(),
        "You spelled: a@b.c. Is this correct?"
    );
}

#[tokio::test]
#[serial]
async fn test_dialog_without_display_is_not_spawned() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ran = temp_dir.path().join("ran");
    let bin = write_script(
        temp_dir.path(),
        "mock_zenity.sh",
        &format!("touch {}\nexit 0", ran.display()),
    );
    let dialog = DialogConfirm::new(&bin, "t", Duration::from_secs(2)).requiring_display();

    let saved: Vec<_> = ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .map(|var| (*var, std::env::var_os(var)))
        .collect();
    std::env::remove_var("DISPLAY");
    std::env::remove_var("WAYLAND_DISPLAY");
    let headless = dialog.ask("Send?").await;
    let spawned_headless = ran.exists();

    std::env::set_var("WAYLAND_DISPLAY", "wayland-0");
    let with_display = dialog.ask("Send?").await;

    for (var, value) in saved {
        match value {
            Some(value) => std::env::set_var(var, value),
            None => std::env::remove_var(var),
        }
    }

    assert_eq!(headless, None);
    assert!(!spawned_headless);
    assert_eq!(with_display, Some(true));
    assert!(ran.exists());
}
