use regex::Regex;
use std::sync::LazyLock;

/// Local part, `@`, domain, `.`, suffix; no other `@` anywhere.
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").ok());

/// Decides whether a finished transcript is acceptable for its field.
pub trait FieldValidator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns whether `candidate` is acceptable. Never fails.
    fn validate(&self, candidate: &str) -> bool;
}

/// Accepts strings shaped like `local@domain.suffix`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl FieldValidator for EmailValidator {
    fn name(&self) -> &'static str {
        "email"
    }

    fn validate(&self, candidate: &str) -> bool {
        !candidate.is_empty()
            && EMAIL_PATTERN
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(candidate))
    }
}
