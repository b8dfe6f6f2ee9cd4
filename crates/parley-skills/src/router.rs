//! Maps a spoken command onto a skill by substring matching.
//!
//! Checks run in a fixed order and the first hit wins: site shortcuts,
//! music, news, weather, email, then file search.

use crate::sites::{find_site, Site};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenSite(Site),
    /// `play <song>`; the song is empty when only "play" was heard.
    PlayMusic(String),
    News,
    Weather,
    SendEmail,
    OpenFile,
    /// Nothing matched; carries the lower-cased command.
    Unknown(String),
}

/// Announced when a command matches nothing.
pub const CAPABILITIES: &str = "I did not understand that. I can open websites, play music, \
    fetch news, give weather, send emails, and open files.";

pub fn route(command: &str) -> Command {
    let lowered = command.trim().to_lowercase();

    if let Some(site) = find_site(&lowered) {
        return Command::OpenSite(site);
    }
    if lowered == "play" {
        return Command::PlayMusic(String::new());
    }
    if let Some(song) = lowered.strip_prefix("play ") {
        return Command::PlayMusic(song.trim().to_string());
    }
    if lowered.contains("news") {
        return Command::News;
    }
    if lowered.contains("weather") {
        return Command::Weather;
    }
    if lowered.contains("send email") || lowered.contains("send an email") {
        return Command::SendEmail;
    }
    if lowered.contains("open file") || lowered.contains("search file") {
        return Command::OpenFile;
    }
    Command::Unknown(lowered)
}
