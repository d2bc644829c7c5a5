//! Weather condition categories and their display icons.

use crate::model::WeatherCondition;

/// Condition groups used by OpenWeather's `weather[].main` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Drizzle,
    Rain,
    Thunderstorm,
    Snow,
    /// Mist, fog, haze, dust and the other low-visibility groups.
    Atmosphere,
    #[default]
    Unknown,
}

impl ConditionCategory {
    pub fn from_condition(condition: &WeatherCondition) -> Self {
        match Self::from_main(&condition.main) {
            Self::Unknown => Self::from_description(&condition.description),
            category => category,
        }
    }

    /// Category for an optional descriptor; a missing descriptor is `Unknown`.
    pub fn from_optional(condition: Option<&WeatherCondition>) -> Self {
        condition.map(Self::from_condition).unwrap_or_default()
    }

    fn from_main(main: &str) -> Self {
        match main.trim().to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "drizzle" => Self::Drizzle,
            "rain" => Self::Rain,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall" | "tornado" => {
                Self::Atmosphere
            }
            _ => Self::Unknown,
        }
    }

    fn from_description(description: &str) -> Self {
        let text = description.to_lowercase();
        // Order matters: "thunderstorm with light rain" is a thunderstorm.
        if text.contains("thunder") {
            Self::Thunderstorm
        } else if text.contains("snow") || text.contains("sleet") {
            Self::Snow
        } else if text.contains("drizzle") {
            Self::Drizzle
        } else if text.contains("rain") {
            Self::Rain
        } else if text.contains("clear") {
            Self::Clear
        } else if text.contains("cloud") {
            Self::Clouds
        } else if ["mist", "fog", "haze", "smoke", "dust"].iter().any(|w| text.contains(w)) {
            Self::Atmosphere
        } else {
            Self::Unknown
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Clouds => "☁️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::Thunderstorm => "⛈️",
            Self::Snow => "🌨️",
            Self::Atmosphere => "🌫️",
            Self::Unknown => "☁️",
        }
    }
}
