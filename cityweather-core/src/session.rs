//! Display state for one search surface.
//!
//! A [`Session`] owns the current [`WeatherState`] and moves it through
//! `Idle -> Loading -> {Success, Error}` on every search. Each search gets a
//! [`SearchTicket`]; a result that arrives for an older ticket than the latest
//! one is dropped, so a slow earlier search can't overwrite a newer one.

use serde::Serialize;
use tracing::debug;

use crate::{
    error::FetchError,
    forecast::{DailyForecast, daily_forecast},
    model::{CityWeather, ForecastSample, WeatherReport},
    provider::WeatherProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherState {
    pub loading: bool,
    pub error: Option<String>,
    pub report: Option<WeatherReport>,
}

impl WeatherState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.report.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    pub fn current(&self) -> Option<&CityWeather> {
        self.report.as_ref().map(|r| &r.current)
    }

    /// Raw forecast feed of the last successful search.
    pub fn forecast(&self) -> &[ForecastSample] {
        self.report.as_ref().map(|r| r.forecast.as_slice()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct Session {
    state: WeatherState,
    latest: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    /// Enter `Loading`. Clears the previous error but keeps previous data until
    /// the new result lands.
    pub fn begin(&mut self) -> SearchTicket {
        self.latest += 1;
        self.state.loading = true;
        self.state.error = None;
        SearchTicket(self.latest)
    }

    /// Apply the outcome of the search identified by `ticket`.
    ///
    /// Returns `false` (and leaves the state untouched) when a newer search has
    /// started since `ticket` was issued.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: Result<WeatherReport, FetchError>,
    ) -> bool {
        if ticket.0 != self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "dropping stale search result");
            return false;
        }

        self.state = match result {
            Ok(report) => WeatherState { loading: false, error: None, report: Some(report) },
            Err(err) => WeatherState { loading: false, error: Some(err.to_string()), report: None },
        };
        true
    }

    /// Run one complete search against `provider`.
    pub async fn search<P>(&mut self, provider: &P, city: &str) -> &WeatherState
    where
        P: WeatherProvider + ?Sized,
    {
        let ticket = self.begin();
        let result = provider.fetch_weather(city).await;
        self.complete(ticket, result);
        &self.state
    }

    /// One entry per day of the current forecast, in the local time zone.
    pub fn daily_forecast(&self) -> DailyForecast {
        daily_forecast(self.state.forecast())
    }
}
