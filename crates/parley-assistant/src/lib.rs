//! Parley assistant library logic.
//!
//! [`Assistant`] owns the collaborators and runs the wake loop: wait for the
//! wake word, take one command, route it to a skill or to the send-email
//! workflow, repeat. The binary in `main.rs` only loads configuration,
//! initialises tracing and hands a shutdown signal to [`Assistant::run`].

pub mod config;

use config::{CaptureSettings, Config, ListenConfig, MailConfig};
use parley_capture::{
    CaptureConfig, CaptureSession, ConfirmationArbiter, SendEmailWorkflow, SendReceipt,
    VoiceConfirmation,
};
use parley_mail::{GmailMailer, MailTransport, Mailer, SendmailMailer};
use parley_skills::{
    home_dir, route, spoken_filename, Command, DesktopLauncher, Launcher, MusicLibrary,
    NewsCache, NewsClient, Site, SkillError, WeatherClient, CAPABILITIES, HEADLINES_READ,
};
use parley_types::{ConfirmationOutcome, InteractionError};
use parley_voice::{
    Announcer, ConfirmationChannel, DialogConfirm, MicrophoneTranscriber, SpeechAnnouncer,
    Transcriber,
};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const WAKE_ACK: &str = "Yes?";
pub const NO_COMMAND: &str = "I didn't hear a command.";
pub const FINAL_VOICE_QUESTION: &str = "Are you sure you want to send this email?";

pub const CITY_PROMPT: &str = "Which city do you want the weather for?";
pub const NO_CITY: &str = "I didn't get the city name.";
pub const CITY_AGAIN: &str = "Okay, please say the city again.";
pub const STILL_NO_CITY: &str = "I still didn't catch it. Try using the weather command again later.";
pub const WEATHER_ABANDONED: &str = "Okay I won't fetch the weather.";
pub const WEATHER_KEY_MISSING: &str = "Weather API key is not configured.";
pub const WEATHER_FAILED: &str = "I couldn't fetch the weather right now.";

pub const NEWS_KEY_MISSING: &str = "News API key not configured.";
pub const NO_NEWS: &str = "No news available right now.";
pub const NEWS_INTRO: &str = "Here are the top headlines.";

pub const SONG_NAME_MISSING: &str = "Please tell me the song name.";
pub const NO_MUSIC_LIBRARY: &str = "Music library not available.";
pub const SONG_NOT_FOUND: &str = "Song not found in your music library.";

pub const FILENAME_PROMPT: &str = "Tell me the filename with extension.";
pub const NO_FILENAME: &str = "I didn't get the filename.";
pub const WIDER_SEARCH_QUESTION: &str =
    "File not found in your home directory. Do you want me to search entire drive?";
pub const NO_WIDER_SEARCH: &str = "Okay, I won't search any further.";
pub const FILE_OPEN_FAILED: &str = "I couldn't open that file.";

/// The pieces of the assistant that touch the outside world.
pub struct Collaborators {
    pub transcriber: Arc<dyn Transcriber>,
    pub announcer: Arc<dyn Announcer>,
    /// Tried before voice for every confirmation, when present.
    pub visual: Option<Arc<dyn ConfirmationChannel>>,
    pub mailer: Arc<dyn Mailer>,
    pub launcher: Arc<dyn Launcher>,
}

impl Collaborators {
    /// Microphone, speech, dialog, mail and desktop launcher as configured.
    pub fn from_config(config: &Config) -> Self {
        let visual: Option<Arc<dyn ConfirmationChannel>> = if config.voice.visual_confirm {
            Some(Arc::new(DialogConfirm::from_config(&config.voice)))
        } else {
            None
        };
        Self {
            transcriber: Arc::new(MicrophoneTranscriber::from_config(&config.voice)),
            announcer: Arc::new(SpeechAnnouncer::from_config(&config.voice)),
            visual,
            mailer: build_mailer(&config.mail),
            launcher: Arc::new(DesktopLauncher),
        }
    }
}

pub fn build_mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    match config.transport {
        MailTransport::Gmail => Arc::new(GmailMailer::with_base_url(
            config.gmail_token_env.clone(),
            &config.gmail_base_url,
        )),
        MailTransport::Sendmail => Arc::new(SendmailMailer::new(&config.sendmail_binary)),
    }
}

/// What one pass of the wake loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WakeOutcome {
    /// Nothing heard, or speech without the wake word.
    Idle,
    /// Woke up but no command followed.
    NoCommand,
    Handled(Command),
}

pub struct Assistant {
    transcriber: Arc<dyn Transcriber>,
    announcer: Arc<dyn Announcer>,
    visual: Option<Arc<dyn ConfirmationChannel>>,
    mailer: Arc<dyn Mailer>,
    launcher: Arc<dyn Launcher>,
    news: NewsClient,
    news_cache: NewsCache,
    weather: WeatherClient,
    music: MusicLibrary,
    file_root: PathBuf,
    wide_root: PathBuf,
    listen: ListenConfig,
    capture: CaptureSettings,
    wake_word: String,
    speaker_name: String,
}

impl Assistant {
    pub fn new(config: &Config, collaborators: Collaborators) -> Self {
        let skills = &config.skills;
        Self {
            transcriber: collaborators.transcriber,
            announcer: collaborators.announcer,
            visual: collaborators.visual,
            mailer: collaborators.mailer,
            launcher: collaborators.launcher,
            news: NewsClient::with_base_url(
                skills.news_api_key_env.clone(),
                skills.news_category.clone(),
                skills.news_country.clone(),
                skills.news_base_url.clone(),
            ),
            news_cache: NewsCache::new(Duration::from_secs(skills.news_ttl_seconds)),
            weather: WeatherClient::with_base_url(
                skills.weather_api_key_env.clone(),
                skills.weather_base_url.clone(),
            ),
            music: skills.music.clone(),
            file_root: skills
                .file_search_root
                .clone()
                .or_else(home_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            wide_root: skills.wide_search_root.clone(),
            listen: config.listen,
            capture: config.capture,
            wake_word: config.voice.wake_word.trim().to_lowercase(),
            speaker_name: config.voice.speaker_name.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config, Collaborators::from_config(config))
    }

    pub fn news_cache(&self) -> &NewsCache {
        &self.news_cache
    }

    /// Runs the wake loop until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.announcer
            .announce(&format!("Initializing {}...", self.speaker_name))
            .await;
        self.announcer
            .announce(&format!(
                "Listening for wake word. Say '{}' to activate.",
                self.wake_word
            ))
            .await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("shutdown requested, leaving wake loop");
                    break;
                }
                outcome = self.wake_once() => {
                    debug!(?outcome, "wake pass finished");
                }
            }
        }
    }

    /// One listen for the wake word, and the command after it.
    pub async fn wake_once(&self) -> WakeOutcome {
        let heard = match self.transcriber.listen(self.listen.wake).await {
            Ok(heard) => heard,
            Err(InteractionError::ServiceUnavailable(reason)) => {
                warn!(%reason, "wake listen failed");
                tokio::time::sleep(Duration::from_secs(1)).await;
                return WakeOutcome::Idle;
            }
            Err(_) => return WakeOutcome::Idle,
        };
        if !heard.to_lowercase().contains(&self.wake_word) {
            debug!(%heard, "no wake word");
            return WakeOutcome::Idle;
        }

        self.announcer.announce(WAKE_ACK).await;
        match self.listen_once(self.listen.command).await {
            Some(command) => WakeOutcome::Handled(self.dispatch(&command).await),
            None => {
                self.announcer.announce(NO_COMMAND).await;
                WakeOutcome::NoCommand
            }
        }
    }

    /// Routes a command and carries it out.
    pub async fn dispatch(&self, command: &str) -> Command {
        let routed = route(command);
        info!(?routed, "command");
        match &routed {
            Command::OpenSite(site) => self.open_site(*site).await,
            Command::PlayMusic(song) => self.play_music(song).await,
            Command::News => self.read_news().await,
            Command::Weather => self.weather_flow().await,
            Command::SendEmail => {
                // Every outcome has already been announced by the workflow.
                if let Err(err) = self.send_email().await {
                    info!(error = %err, "send email ended without sending");
                }
            }
            Command::OpenFile => self.open_file_flow().await,
            Command::Unknown(_) => self.announcer.announce(CAPABILITIES).await,
        }
        routed
    }

    /// Asks for recipient, subject and body, confirms, and sends.
    pub async fn send_email(&self) -> Result<SendReceipt, InteractionError> {
        let voice = self.voice(self.listen.confirm);
        let retry = voice.with_window(self.listen.confirm);
        let final_voice = voice
            .with_window(self.listen.final_confirm)
            .speaking(FINAL_VOICE_QUESTION);

        let session = CaptureSession::new(
            Arc::clone(&self.transcriber),
            Arc::clone(&self.announcer),
            self.arbiter(voice),
            Arc::new(retry),
        )
        .with_config(CaptureConfig {
            character_window: self.listen.character,
            max_attempts: self.capture.max_attempts,
        });

        SendEmailWorkflow::new(
            session,
            Arc::clone(&self.transcriber),
            Arc::clone(&self.announcer),
            self.arbiter(final_voice),
            Arc::clone(&self.mailer),
        )
        .with_windows(self.listen.subject, self.listen.body)
        .run()
        .await
    }

    async fn open_site(&self, site: Site) {
        match self.launcher.launch(site.url) {
            Ok(()) => {
                self.announcer
                    .announce(&format!("Opening {}", site.name))
                    .await
            }
            Err(e) => {
                warn!(error = %e, "could not open site");
                self.announcer
                    .announce(&format!("I couldn't open {}.", site.name))
                    .await;
            }
        }
    }

    async fn play_music(&self, song: &str) {
        if song.is_empty() {
            self.announcer.announce(SONG_NAME_MISSING).await;
            return;
        }
        if self.music.is_empty() {
            self.announcer.announce(NO_MUSIC_LIBRARY).await;
            return;
        }
        let Some(track) = self.music.find(song) else {
            debug!(%song, "no close match in music library");
            self.announcer.announce(SONG_NOT_FOUND).await;
            return;
        };

        match self.launcher.launch(track.link) {
            Ok(()) => {
                self.announcer
                    .announce(&format!("Playing {}", track.name))
                    .await
            }
            Err(e) => {
                warn!(error = %e, track = track.name, "could not play track");
                self.announcer
                    .announce(&format!("I couldn't play {}.", track.name))
                    .await;
            }
        }
    }

    /// Ask for a file name, look under the search root, and open the first
    /// match. A miss offers a wider search, which runs only on a clear yes.
    async fn open_file_flow(&self) {
        self.announcer.announce(FILENAME_PROMPT).await;
        let Some(heard) = self.listen_once(self.listen.filename).await else {
            self.announcer.announce(NO_FILENAME).await;
            return;
        };
        let filename = spoken_filename(&heard);

        if let Some(path) = self.search_files(&self.file_root, &filename).await {
            self.open_path(&path).await;
            return;
        }

        let voice = self.voice(self.listen.confirm);
        let wider = ConfirmationOutcome::from_answer(voice.ask(WIDER_SEARCH_QUESTION).await);
        if !wider.is_confirmed() {
            info!(%filename, %wider, "wider file search declined");
            self.announcer.announce(NO_WIDER_SEARCH).await;
            return;
        }

        match self.search_files(&self.wide_root, &filename).await {
            Some(path) => self.open_path(&path).await,
            None => {
                self.announcer
                    .announce(&format!("I couldn't find {filename}."))
                    .await
            }
        }
    }

    async fn search_files(&self, root: &Path, filename: &str) -> Option<PathBuf> {
        debug!(root = %root.display(), %filename, "searching for file");
        match parley_skills::search(root.to_path_buf(), filename.to_string()).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "file search failed");
                None
            }
        }
    }

    async fn open_path(&self, path: &Path) {
        match self.launcher.launch(&path.to_string_lossy()) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.announcer.announce(&format!("Opening {name}")).await;
            }
            Err(e) => {
                warn!(error = %e, "could not open file");
                self.announcer.announce(FILE_OPEN_FAILED).await;
            }
        }
    }

    async fn read_news(&self) {
        let headlines = match self.news.headlines(&self.news_cache).await {
            Ok(headlines) => headlines,
            Err(SkillError::MissingKey(_)) => {
                self.announcer.announce(NEWS_KEY_MISSING).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "news unavailable");
                Vec::new()
            }
        };
        if headlines.is_empty() {
            self.announcer.announce(NO_NEWS).await;
            return;
        }

        self.announcer.announce(NEWS_INTRO).await;
        for (i, headline) in headlines.iter().take(HEADLINES_READ).enumerate() {
            self.announcer
                .display(&format!("{}. {}", i + 1, headline.title));
            self.announcer.announce(&headline.title).await;
        }
    }

    /// Ask for a city, check it by voice, and report the weather.
    ///
    /// A "no" gets one more try; an unclear answer the first time goes ahead
    /// with what was heard.
    async fn weather_flow(&self) {
        self.announcer.announce(CITY_PROMPT).await;
        let Some(mut city) = self.listen_once(self.listen.city).await else {
            self.announcer.announce(NO_CITY).await;
            return;
        };

        let voice = self.voice(self.listen.confirm);
        match self.ask_voice(&voice, &city).await {
            ConfirmationOutcome::Confirmed => {}
            ConfirmationOutcome::Indeterminate => {
                self.announcer
                    .announce(&format!("I will try with {city}."))
                    .await;
            }
            ConfirmationOutcome::Rejected => {
                self.announcer.announce(CITY_AGAIN).await;
                let Some(again) = self.listen_once(self.listen.city).await else {
                    self.announcer.announce(STILL_NO_CITY).await;
                    return;
                };
                city = again;
                if !self.ask_voice(&voice, &city).await.is_confirmed() {
                    self.announcer.announce(WEATHER_ABANDONED).await;
                    return;
                }
            }
        }

        match self.weather.current(&city).await {
            Ok(report) => self.announcer.announce(&report.sentence()).await,
            Err(SkillError::MissingKey(_)) => self.announcer.announce(WEATHER_KEY_MISSING).await,
            Err(SkillError::NotFound(_)) => {
                self.announcer
                    .announce(&format!("I couldn't find weather for {city}."))
                    .await
            }
            Err(e) => {
                warn!(error = %e, %city, "weather lookup failed");
                self.announcer.announce(WEATHER_FAILED).await;
            }
        }
    }

    async fn ask_voice(&self, voice: &VoiceConfirmation, city: &str) -> ConfirmationOutcome {
        ConfirmationOutcome::from_answer(voice.ask(&format!("Did you say {city}?")).await)
    }

    async fn listen_once(&self, window: parley_types::ListenWindow) -> Option<String> {
        parley_capture::listen_for(self.transcriber.as_ref(), self.announcer.as_ref(), window)
            .await
            .map(|text| text.trim().to_string())
    }

    fn voice(&self, window: parley_types::ListenWindow) -> VoiceConfirmation {
        VoiceConfirmation::new(
            Arc::clone(&self.transcriber),
            Arc::clone(&self.announcer),
            window,
        )
    }

    /// Visual first when configured, then `voice`.
    fn arbiter(&self, voice: VoiceConfirmation) -> ConfirmationArbiter {
        let mut channels: Vec<Arc<dyn ConfirmationChannel>> = Vec::new();
        if let Some(visual) = &self.visual {
            channels.push(Arc::clone(visual));
        }
        channels.push(Arc::new(voice));
        ConfirmationArbiter::new(channels)
    }
}
