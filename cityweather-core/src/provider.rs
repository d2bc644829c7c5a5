use crate::{Config, FetchError, WeatherReport, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions plus the raw forecast feed for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `cityweather configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider =
        OpenWeatherProvider::with_timeout(api_key.to_owned(), config.base_url(), config.timeout_secs)?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
        assert!(err.to_string().contains("cityweather configure"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let cfg = Config { api_key: Some("KEY".to_string()), ..Config::default() };

        assert!(provider_from_config(&cfg).is_ok());
    }
}
