//! Top headlines from NewsAPI.

use crate::cache::TtlCache;
use crate::error::{api_key, SkillError};
use serde::Deserialize;
use std::time::Duration;

pub const NEWS_API_BASE: &str = "https://newsapi.org/v2";

/// How many headlines are read out.
pub const HEADLINES_READ: usize = 5;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default time a fetched list stays fresh.
pub const DEFAULT_NEWS_TTL: Duration = Duration::from_secs(3600);

/// Cache of headline lists keyed by `category/country`.
pub type NewsCache = TtlCache<String, Vec<Headline>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiFailure {
    message: Option<String>,
}

pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
    api_key_env: String,
    category: String,
    country: String,
}

impl NewsClient {
    pub fn new(
        api_key_env: impl Into<String>,
        category: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self::with_base_url(api_key_env, category, country, NEWS_API_BASE)
    }

    pub fn with_base_url(
        api_key_env: impl Into<String>,
        category: impl Into<String>,
        country: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: build_http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key_env: api_key_env.into(),
            category: category.into(),
            country: country.into(),
        }
    }

    fn cache_key(&self) -> String {
        format!("{}/{}", self.category, self.country)
    }

    /// Returns the top headlines, from `cache` while they are fresh.
    ///
    /// A failed refresh falls back to whatever list is cached, however old.
    /// A missing API key is reported before any request is made.
    pub async fn headlines(&self, cache: &NewsCache) -> Result<Vec<Headline>, SkillError> {
        let key = self.cache_key();
        if let Some(cached) = cache.get_fresh(&key).filter(|h| !h.is_empty()) {
            tracing::debug!(%key, "news served from cache");
            return Ok(cached);
        }

        let api_key = api_key(&self.api_key_env)?;
        match self.fetch(&api_key).await {
            Ok(headlines) => {
                tracing::info!(%key, count = headlines.len(), "news fetched");
                cache.insert(key, headlines.clone());
                Ok(headlines)
            }
            Err(e) => match cache.get_stale(&key) {
                Some(stale) => {
                    tracing::warn!(%key, error = %e, "news fetch failed, serving stale list");
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    async fn fetch(&self, api_key: &str) -> Result<Vec<Headline>, SkillError> {
        let resp = self
            .http
            .get(format!("{}/top-headlines", self.base_url))
            .query(&[
                ("category", self.category.as_str()),
                ("country", self.country.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ApiFailure>()
                .await
                .ok()
                .and_then(|f| f.message)
                .unwrap_or_else(|| status.to_string());
            return Err(SkillError::Api(message));
        }

        let body: HeadlinesResponse = resp.json().await?;
        Ok(body
            .articles
            .into_iter()
            .map(|a| Headline {
                title: a
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "No title".to_string()),
                source: a.source.and_then(|s| s.name),
            })
            .collect())
    }
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url)
            .field("api_key_env", &self.api_key_env)
            .field("category", &self.category)
            .field("country", &self.country)
            .finish()
    }
}

fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent("parley/0.0.1 (news)")
        .build()
        .unwrap_or_default()
}
