use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::ConditionCategory;

/// Temperature and humidity block (`main` in OpenWeather payloads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// One weather-condition descriptor, e.g. `{ "main": "Snow", "description": "light snow" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

impl WeatherCondition {
    pub fn category(&self) -> ConditionCategory {
        ConditionCategory::from_condition(self)
    }
}

/// One 3-hour point of the multi-day forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl ForecastSample {
    /// First condition descriptor, if the feed sent any.
    pub fn condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

/// Current-conditions snapshot for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeather {
    pub name: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

impl CityWeather {
    pub fn condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

/// Combined result of one successful search. `forecast` is the raw feed, not reduced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CityWeather,
    pub forecast: Vec<ForecastSample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_sample_decodes_openweather_entry() {
        let json = r#"{
            "dt": 1705320000,
            "main": { "temp": 3.4, "feels_like": 0.2, "humidity": 81, "pressure": 1012 },
            "weather": [{ "id": 600, "main": "Snow", "description": "light snow", "icon": "13d" }],
            "wind": { "speed": 4.1, "deg": 250 },
            "dt_txt": "2024-01-15 12:00:00"
        }"#;

        let sample: ForecastSample = serde_json::from_str(json).expect("valid sample");

        assert_eq!(sample.dt.timestamp(), 1_705_320_000);
        assert_eq!(sample.main.humidity, 81);
        assert_eq!(sample.condition().map(|c| c.description.as_str()), Some("light snow"));
    }

    #[test]
    fn missing_weather_list_decodes_as_empty() {
        let json = r#"{ "name": "Berlin", "dt": 0, "main": { "temp": 1.0, "humidity": 50 }, "wind": { "speed": 2.0 } }"#;

        let current: CityWeather = serde_json::from_str(json).expect("valid current weather");

        assert!(current.condition().is_none());
    }

    #[test]
    fn condition_without_description_still_decodes() {
        let json = r#"{ "name": "Berlin", "dt": 0, "main": { "temp": 1.0, "humidity": 50 },
                        "wind": { "speed": 2.0 }, "weather": [{ "id": 800, "main": "Clear" }] }"#;

        let current: CityWeather = serde_json::from_str(json).expect("valid current weather");

        let condition = current.condition().expect("one descriptor");
        assert_eq!(condition.main, "Clear");
        assert_eq!(condition.description, "");
        assert_eq!(condition.category(), ConditionCategory::Clear);
    }
}
