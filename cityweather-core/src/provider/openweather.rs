use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    error::{FetchError, RequestError},
    model::{CityWeather, ForecastSample, WeatherReport},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// Point the provider at another host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Provider with an explicit request timeout; `None` keeps the transport default.
    pub fn with_timeout(
        api_key: String,
        base_url: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        let mut provider = Self::with_base_url(api_key, base_url);

        if let Some(secs) = timeout_secs {
            provider.http = Client::builder()
                .timeout(Duration::from_secs(secs))
                .build()
                .context("Failed to build HTTP client")?;
        }

        Ok(provider)
    }

    async fn fetch_current(&self, city: &str) -> Result<CityWeather, FetchError> {
        self.get_json("weather", city).await.map_err(FetchError::Current)
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastSample>, FetchError> {
        let parsed: OwForecastResponse =
            self.get_json("forecast", city).await.map_err(FetchError::Forecast)?;

        Ok(parsed.list)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, RequestError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(RequestError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<ForecastSample>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let result = tokio::try_join!(self.fetch_current(city), self.fetch_forecast(city));

        match result {
            Ok((current, forecast)) => {
                debug!(samples = forecast.len(), "weather fetched");
                Ok(WeatherReport { current, forecast })
            }
            Err(err) => {
                debug!(cause = %err.request_error(), "{err}");
                Err(err)
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("city not found"), "city not found");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), "http://localhost:1234/");
        assert_eq!(provider.base_url, "http://localhost:1234");
    }
}
