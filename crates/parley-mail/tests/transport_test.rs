use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use base64::Engine;
use parley_mail::{GmailMailer, MailError, Mailer};
use parley_types::EmailDraft;
use serde_json::{json, Value};
use serial_test::serial;
use std::sync::{Arc, Mutex};

const TOKEN_ENV: &str = "PARLEY_TEST_GMAIL_TOKEN";

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn accept_send(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.requests.lock().unwrap().push((auth, body));
    Json(json!({ "id": "msg-123", "threadId": "t-1" }))
}

#[tokio::test]
#[serial]
async fn test_gmail_posts_encoded_message() {
    let captured = Captured::default();
    let app = Router::new()
        .route("/messages/send", post(accept_send))
        .with_state(captured.clone());
    let base = spawn_server(app).await;

    std::env::set_var(TOKEN_ENV, "ya29.test-token");
    let mailer = GmailMailer::with_base_url(TOKEN_ENV, &base);
    let draft = EmailDraft::new("jo.s@gmail.com", Some("lunch".into()), Some("noon?".into()));

    let id = mailer.send(&draft).await.unwrap();
    assert_eq!(id, "msg-123");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer ya29.test-token"));

    let raw = body["raw"].as_str().unwrap();
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(raw)
        .unwrap();
    let message = String::from_utf8(decoded).unwrap();
    assert!(message.contains("To: jo.s@gmail.com"));
    assert!(message.contains("Subject: lunch"));
    assert!(message.ends_with("noon?"));
}

#[tokio::test]
#[serial]
async fn test_gmail_error_status_is_api_error() {
    let app = Router::new().route(
        "/messages/send",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid credentials") }),
    );
    let base = spawn_server(app).await;

    std::env::set_var(TOKEN_ENV, "expired");
    let mailer = GmailMailer::with_base_url(TOKEN_ENV, &base);
    let draft = EmailDraft::new("a@b.c", None, None);

    match mailer.send(&draft).await {
        Err(MailError::Api(msg)) => {
            assert!(msg.contains("401"), "got: {}", msg);
            assert!(msg.contains("invalid credentials"), "got: {}", msg);
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
#[serial]
async fn test_gmail_missing_token_is_config_error() {
    std::env::remove_var(TOKEN_ENV);
    let mailer = GmailMailer::with_base_url(TOKEN_ENV, "http://127.0.0.1:9");
    let draft = EmailDraft::new("a@b.c", None, None);

    match mailer.send(&draft).await {
        Err(MailError::Config(msg)) => assert!(msg.contains(TOKEN_ENV)),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[cfg(unix)]
mod sendmail {
    use super::*;
    use parley_mail::SendmailMailer;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("mock_sendmail.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[tokio::test]
    async fn test_sendmail_receives_message_on_stdin() {
        let temp_dir = tempfile::tempdir().unwrap();
        let spool = temp_dir.path().join("spool.eml");
        let bin = write_script(
            temp_dir.path(),
            &format!("cat > {}\nprintf 'queued-42'", spool.display()),
        );

        let mailer = SendmailMailer::new(&bin);
        let draft = EmailDraft::new("a@b.c", Some("hello".into()), Some("body text".into()));
        let id = mailer.send(&draft).await.unwrap();
        assert_eq!(id, "queued-42");

        let message = std::fs::read_to_string(&spool).unwrap();
        assert!(message.starts_with("To: a@b.c\r\n"));
        assert!(message.contains("Subject: hello"));
        assert!(message.ends_with("body text"));
    }

    #[tokio::test]
    async fn test_sendmail_failure_is_transport_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let bin = write_script(temp_dir.path(), "cat > /dev/null\necho 'relay denied' >&2\nexit 75");

        let mailer = SendmailMailer::new(&bin);
        let draft = EmailDraft::new("a@b.c", None, None);
        match mailer.send(&draft).await {
            Err(MailError::Transport(msg)) => assert!(msg.contains("relay denied")),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }
}
