//! Single-shot skills for the parley assistant.
//!
//! Each skill does one thing and reports back: open a website, play a song
//! from the local library, read the top headlines, look up the weather,
//! find a file. [`route`] decides which one a spoken command asks for. None
//! of these touch the confirmation engine; the assistant wires the
//! conversation around them.
//!
//! Cached results live in a [`TtlCache`] that the caller owns and passes in.

pub mod cache;
pub mod error;
pub mod files;
pub mod launcher;
pub mod music;
pub mod news;
pub mod router;
pub mod sites;
pub mod weather;

pub use cache::TtlCache;
pub use error::SkillError;
pub use files::{find_file, home_dir, search, spoken_filename};
pub use launcher::{DesktopLauncher, Launcher};
pub use music::{MusicLibrary, Track, MATCH_CUTOFF};
pub use news::{Headline, NewsCache, NewsClient, DEFAULT_NEWS_TTL, HEADLINES_READ, NEWS_API_BASE};
pub use router::{route, Command, CAPABILITIES};
pub use sites::{find_site, Site, SITES};
pub use weather::{WeatherClient, WeatherReport, OPEN_WEATHER_BASE};
