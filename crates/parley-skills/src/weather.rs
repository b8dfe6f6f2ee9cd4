//! Current conditions from OpenWeatherMap, in metric units.

use crate::error::{api_key, SkillError};
use serde::Deserialize;
use std::time::Duration;

pub const OPEN_WEATHER_BASE: &str = "https://api.openweathermap.org/data/2.5";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: f64,
    pub description: String,
}

impl WeatherReport {
    /// The sentence spoken to the user.
    pub fn sentence(&self) -> String {
        format!(
            "The temperature in {} is {}°C with {}.",
            self.city, self.temperature_c, self.description
        )
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    cod: Option<serde_json::Value>,
    main: Option<MainBlock>,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

/// OpenWeatherMap reports `cod` as either a number or a string.
fn cod_is_ok(cod: &Option<serde_json::Value>) -> bool {
    match cod {
        None => true,
        Some(serde_json::Value::Number(n)) => n.as_u64() == Some(200),
        Some(serde_json::Value::String(s)) => s == "200",
        Some(_) => false,
    }
}

pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key_env: String,
}

impl WeatherClient {
    pub fn new(api_key_env: impl Into<String>) -> Self {
        Self::with_base_url(api_key_env, OPEN_WEATHER_BASE)
    }

    pub fn with_base_url(api_key_env: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .user_agent("parley/0.0.1 (weather)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key_env: api_key_env.into(),
        }
    }

    pub async fn current(&self, city: &str) -> Result<WeatherReport, SkillError> {
        let city = city.trim();
        let api_key = api_key(&self.api_key_env)?;

        let resp = self
            .http
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", city), ("appid", api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SkillError::NotFound(city.to_string()));
        }
        if !status.is_success() {
            return Err(SkillError::Api(status.to_string()));
        }

        let body: CurrentWeather = resp.json().await?;
        if !cod_is_ok(&body.cod) {
            return Err(SkillError::NotFound(city.to_string()));
        }
        let main = body
            .main
            .ok_or_else(|| SkillError::Api("response has no temperature".into()))?;
        let description = body
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| SkillError::Api("response has no conditions".into()))?;

        tracing::debug!(%city, temp = main.temp, "weather fetched");
        Ok(WeatherReport {
            city: city.to_string(),
            temperature_c: main.temp,
            description,
        })
    }
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key_env", &self.api_key_env)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cod_variants() {
        assert!(cod_is_ok(&None));
        assert!(cod_is_ok(&Some(json!(200))));
        assert!(cod_is_ok(&Some(json!("200"))));
        assert!(!cod_is_ok(&Some(json!("404"))));
        assert!(!cod_is_ok(&Some(json!(401))));
    }

    #[test]
    fn report_sentence() {
        let report = WeatherReport {
            city: "Paris".into(),
            temperature_c: 18.5,
            description: "light rain".into(),
        };
        assert_eq!(
            report.sentence(),
            "The temperature in Paris is 18.5°C with light rain."
        );
    }
}
