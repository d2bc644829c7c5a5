//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherProvider`] trait
//! - Shared domain models and the daily forecast reduction
//! - Search session state
//!
//! It is used by `cityweather-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod session;

pub use condition::ConditionCategory;
pub use config::Config;
pub use error::{FetchError, RequestError};
pub use forecast::{DailyForecast, daily_forecast, daily_forecast_in};
pub use model::{CityWeather, ForecastSample, WeatherCondition, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use session::{Phase, SearchTicket, Session, WeatherState};
