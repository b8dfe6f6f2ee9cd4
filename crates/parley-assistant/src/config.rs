//! Assistant configuration loading from file and environment variables.

use parley_mail::MailTransport;
use parley_skills::MusicLibrary;
use parley_types::ListenWindow;
use parley_voice::VoiceConfig;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level assistant configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Recorder, recognizer, speech and dialog binaries.
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Listen windows per prompt kind.
    #[serde(default)]
    pub listen: ListenConfig,

    /// Spelling session limits.
    #[serde(default)]
    pub capture: CaptureSettings,

    /// Outgoing mail.
    #[serde(default)]
    pub mail: MailConfig,

    /// News, weather, music and file search.
    #[serde(default)]
    pub skills: SkillsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "parley_capture=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Listen windows, each given as `{ timeout = N, phrase_limit = M }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub character: ListenWindow,
    pub confirm: ListenWindow,
    pub final_confirm: ListenWindow,
    pub subject: ListenWindow,
    pub body: ListenWindow,
    pub wake: ListenWindow,
    pub command: ListenWindow,
    pub city: ListenWindow,
    pub filename: ListenWindow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CaptureSettings {
    /// Confirmation cycles allowed per spelling session. Unset means no cap.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub transport: MailTransport,

    /// Environment variable holding the Gmail access token.
    #[serde(default = "default_gmail_token_env")]
    pub gmail_token_env: String,

    #[serde(default = "default_gmail_base_url")]
    pub gmail_base_url: String,

    #[serde(default = "default_sendmail_binary")]
    pub sendmail_binary: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillsConfig {
    /// Environment variable holding the NewsAPI key.
    #[serde(default = "default_news_api_key_env")]
    pub news_api_key_env: String,

    /// Environment variable holding the OpenWeatherMap key.
    #[serde(default = "default_weather_api_key_env")]
    pub weather_api_key_env: String,

    /// Seconds a fetched headline list stays fresh.
    #[serde(default = "default_news_ttl_seconds")]
    pub news_ttl_seconds: u64,

    #[serde(default = "default_news_category")]
    pub news_category: String,

    #[serde(default = "default_news_country")]
    pub news_country: String,

    #[serde(default = "default_news_base_url")]
    pub news_base_url: String,

    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// Song name to URL or file path, for `play <song>`.
    #[serde(default)]
    pub music: MusicLibrary,

    /// Where `open file` looks first. Unset means the home directory.
    #[serde(default)]
    pub file_search_root: Option<PathBuf>,

    /// Where `open file` looks after the user agrees to a wider search.
    #[serde(default = "default_wide_search_root")]
    pub wide_search_root: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_gmail_token_env() -> String {
    "PARLEY_GMAIL_TOKEN".to_string()
}

fn default_gmail_base_url() -> String {
    parley_mail::GMAIL_API_BASE.to_string()
}

fn default_sendmail_binary() -> PathBuf {
    PathBuf::from("sendmail")
}

fn default_news_api_key_env() -> String {
    "PARLEY_NEWS_API_KEY".to_string()
}

fn default_weather_api_key_env() -> String {
    "PARLEY_WEATHER_API_KEY".to_string()
}

fn default_news_ttl_seconds() -> u64 {
    parley_skills::DEFAULT_NEWS_TTL.as_secs()
}

fn default_news_category() -> String {
    "technology".to_string()
}

fn default_news_country() -> String {
    "us".to_string()
}

fn default_news_base_url() -> String {
    parley_skills::NEWS_API_BASE.to_string()
}

fn default_weather_base_url() -> String {
    parley_skills::OPEN_WEATHER_BASE.to_string()
}

#[cfg(windows)]
fn default_wide_search_root() -> PathBuf {
    PathBuf::from("C:\\")
}

#[cfg(not(windows))]
fn default_wide_search_root() -> PathBuf {
    PathBuf::from("/")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            character: ListenWindow::CHARACTER,
            confirm: ListenWindow::CONFIRM,
            final_confirm: ListenWindow::FINAL_CONFIRM,
            subject: ListenWindow::SUBJECT,
            body: ListenWindow::BODY,
            wake: ListenWindow::WAKE,
            command: ListenWindow::COMMAND,
            city: ListenWindow::CITY,
            filename: ListenWindow::FILENAME,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::default(),
            gmail_token_env: default_gmail_token_env(),
            gmail_base_url: default_gmail_base_url(),
            sendmail_binary: default_sendmail_binary(),
        }
    }
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            news_api_key_env: default_news_api_key_env(),
            weather_api_key_env: default_weather_api_key_env(),
            news_ttl_seconds: default_news_ttl_seconds(),
            news_category: default_news_category(),
            news_country: default_news_country(),
            news_base_url: default_news_base_url(),
            weather_base_url: default_weather_base_url(),
            music: MusicLibrary::default(),
            file_search_root: None,
            wide_search_root: default_wide_search_root(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

fn env_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PARLEY_LOG_LEVEL` overrides `logging.level`
/// - `PARLEY_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `PARLEY_WAKE_WORD` overrides `voice.wake_word`
/// - `PARLEY_MAIL_TRANSPORT` overrides `mail.transport`
/// - `PARLEY_VISUAL_CONFIRM` overrides `voice.visual_confirm`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Ok(level) = std::env::var("PARLEY_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("PARLEY_LOG_JSON") {
        config.logging.json = env_flag(&json);
    }
    if let Ok(word) = std::env::var("PARLEY_WAKE_WORD") {
        if !word.trim().is_empty() {
            config.voice.wake_word = word.trim().to_lowercase();
        }
    }
    if let Ok(transport) = std::env::var("PARLEY_MAIL_TRANSPORT") {
        match transport.parse() {
            Ok(parsed) => config.mail.transport = parsed,
            Err(e) => tracing::warn!(error = %e, "ignoring PARLEY_MAIL_TRANSPORT"),
        }
    }
    if let Ok(visual) = std::env::var("PARLEY_VISUAL_CONFIRM") {
        config.voice.visual_confirm = env_flag(&visual);
    }

    if config.capture.max_attempts == Some(0) {
        tracing::warn!("capture.max_attempts = 0 disables the cap");
        config.capture.max_attempts = None;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.listen.character, ListenWindow::new(8, 5));
        assert_eq!(config.listen.body, ListenWindow::new(30, 25));
        assert_eq!(config.capture.max_attempts, None);
        assert_eq!(config.mail.transport, MailTransport::Gmail);
        assert_eq!(config.mail.gmail_token_env, "PARLEY_GMAIL_TOKEN");
        assert_eq!(config.skills.news_ttl_seconds, 3600);
        assert_eq!(config.voice.wake_word, "jarvis");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [listen]
            body = { timeout = 45, phrase_limit = 40 }

            [capture]
            max_attempts = 3

            [mail]
            transport = "sendmail"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen.body, ListenWindow::new(45, 40));
        assert_eq!(config.listen.subject, ListenWindow::SUBJECT);
        assert_eq!(config.capture.max_attempts, Some(3));
        assert_eq!(config.mail.transport, MailTransport::Sendmail);
        assert_eq!(config.mail.sendmail_binary, PathBuf::from("sendmail"));
        assert_eq!(config.skills.news_category, "technology");
        assert!(config.skills.music.is_empty());
        assert_eq!(config.skills.file_search_root, None);
    }

    #[test]
    fn music_table_and_search_roots() {
        let config: Config = toml::from_str(
            r#"
            [listen]
            filename = { timeout = 10, phrase_limit = 9 }

            [skills]
            file_search_root = "/srv/docs"
            wide_search_root = "/srv"

            [skills.music]
            believer = "https://example.com/believer"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen.filename, ListenWindow::new(10, 9));
        assert_eq!(config.skills.music.len(), 1);
        assert_eq!(config.skills.file_search_root, Some(PathBuf::from("/srv/docs")));
        assert_eq!(config.skills.wide_search_root, PathBuf::from("/srv"));
    }

    #[test]
    fn env_flag_values() {
        assert!(env_flag("true"));
        assert!(env_flag(" 1 "));
        assert!(!env_flag("yes"));
        assert!(!env_flag("0"));
    }
}
