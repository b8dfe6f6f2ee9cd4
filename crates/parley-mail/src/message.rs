use crate::error::MailError;
use base64::Engine;
use parley_types::EmailDraft;

/// Renders a draft as a plain-text RFC 2822 message.
///
/// The recipient must not contain whitespace or control characters and the
/// subject is flattened to one line.
pub fn render_message(draft: &EmailDraft) -> Result<String, MailError> {
    let to = draft.recipient.trim();
    if to.is_empty() || to.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(MailError::InvalidRecipient(draft.recipient.clone()));
    }

    let subject = encode_subject(&draft.subject.replace(['\r', '\n'], " "));
    let body: String = draft
        .body
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect();

    Ok(format!(
        "To: {to}\r\n\
         Subject: {subject}\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         Content-Transfer-Encoding: 8bit\r\n\
         \r\n\
         {body}"
    ))
}

/// Raw bytes per RFC 2047 encoded word; keeps each word under 76 columns.
const ENCODED_WORD_BYTES: usize = 45;

/// ASCII subjects pass through. Anything else becomes a folded run of
/// `=?utf-8?B?...?=` encoded words, split on character boundaries.
fn encode_subject(subject: &str) -> String {
    if subject.is_ascii() {
        return subject.to_string();
    }

    let mut words = Vec::new();
    let mut chunk = String::new();
    for c in subject.chars() {
        if chunk.len() + c.len_utf8() > ENCODED_WORD_BYTES {
            words.push(encoded_word(&chunk));
            chunk.clear();
        }
        chunk.push(c);
    }
    if !chunk.is_empty() {
        words.push(encoded_word(&chunk));
    }
    words.join("\r\n ")
}

fn encoded_word(text: &str) -> String {
    format!(
        "=?utf-8?B?{}?=",
        base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
    )
}

/// Base64url encoding (no padding) as the Gmail API expects for `raw`.
pub fn encode_raw(message: &str) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes())
}
