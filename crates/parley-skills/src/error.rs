//! Error types for the single-shot skills.

/// Errors that can occur while running a skill.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    /// The environment variable holding an API key is unset or empty.
    #[error("API key not configured: {0}")]
    MissingKey(String),

    /// The HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered, but not with something usable.
    #[error("API error: {0}")]
    Api(String),

    /// The API does not know the requested place.
    #[error("not found: {0}")]
    NotFound(String),

    /// The desktop could not open a URL or file.
    #[error("failed to open {target}: {reason}")]
    Launch { target: String, reason: String },

    /// A file search was interrupted before it finished.
    #[error("file search failed: {0}")]
    Search(String),
}

/// Reads an API key from `var`, treating blank values as unset.
pub(crate) fn api_key(var: &str) -> Result<String, SkillError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(SkillError::MissingKey(var.to_string())),
    }
}
