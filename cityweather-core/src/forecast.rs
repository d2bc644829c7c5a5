//! Reduction of the 3-hour forecast feed to one sample per day.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use crate::model::ForecastSample;

/// One representative sample per calendar day, ascending by timestamp.
pub type DailyForecast = Vec<ForecastSample>;

const PREFERRED_HOUR: u32 = 12;

/// Reduce `samples` to one per day, judging "noon" in the machine's local time zone.
pub fn daily_forecast(samples: &[ForecastSample]) -> DailyForecast {
    daily_forecast_in(samples, &Local)
}

/// Reduce `samples` to one per day, judging "noon" in `tz`.
///
/// Days are UTC calendar dates. Within a day the first sample whose hour in `tz`
/// is 12 wins; without one, the first sample of that day in input order.
pub fn daily_forecast_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> DailyForecast {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut groups: Vec<Vec<&ForecastSample>> = Vec::new();

    for sample in samples {
        let day = sample.dt.date_naive();
        let slot = *index.entry(day).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(sample);
    }

    let mut daily: DailyForecast = groups
        .into_iter()
        .filter_map(|group| {
            group
                .iter()
                .find(|s| s.dt.with_timezone(tz).hour() == PREFERRED_HOUR)
                .or_else(|| group.first())
                .map(|s| (*s).clone())
        })
        .collect();

    daily.sort_by_key(|s| s.dt);
    daily
}
