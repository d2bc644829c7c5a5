use std::fmt::Display;

use chrono::TimeZone;
use cityweather_core::{ConditionCategory, ForecastSample, WeatherCondition, WeatherState};

pub const LOADING: &str = "Loading...";

const PLACEHOLDER_CITY: &str = "City";

/// Full screen for one state: the "now" card followed by the daily cards.
pub fn render<Tz>(state: &WeatherState, daily: &[ForecastSample], days: usize, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = render_current(state);

    let forecast = render_forecast(daily, days, tz);
    if !forecast.is_empty() {
        out.push_str("\n\n");
        out.push_str(&forecast);
    }

    out
}

pub fn render_current(state: &WeatherState) -> String {
    let current = state.current();
    let mut lines = vec![current.map_or(PLACEHOLDER_CITY, |c| c.name.as_str()).to_string()];

    if state.loading {
        lines.push(LOADING.to_string());
    }
    if let Some(error) = &state.error {
        lines.push(error.clone());
    }

    if let Some(current) = current.filter(|_| !state.loading) {
        let condition = current.condition();
        lines.push(ConditionCategory::from_optional(condition).icon().to_string());
        lines.push(format!("🌡️ {}°C", current.main.temp));
        lines.push(format!("🌬️ {} m/s", current.wind.speed));
        lines.push(format!("💧 {}%", current.main.humidity));
        lines.push(format!("🌍 {}", description(condition)));
    }

    lines.join("\n")
}

/// Daily cards, at most `days` of them; empty when there is nothing to show.
pub fn render_forecast<Tz>(daily: &[ForecastSample], days: usize, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let cards: Vec<String> = daily
        .iter()
        .take(days)
        .map(|day| {
            let date = day.dt.with_timezone(tz).format("%a, %b %-d").to_string();
            let condition = day.condition();
            format!(
                "{date:<12} {icon} 🌡 {temp:>3}°C  {text}",
                icon = ConditionCategory::from_optional(condition).icon(),
                temp = round_half_up(day.main.temp),
                text = description(condition),
            )
        })
        .collect();

    if cards.is_empty() {
        return String::new();
    }

    format!("{}-Day Forecast\n{}", days, cards.join("\n"))
}

pub fn to_json(
    state: &WeatherState,
    daily: &[ForecastSample],
    days: usize,
) -> serde_json::Result<String> {
    let shown = &daily[..days.min(daily.len())];

    serde_json::to_string_pretty(&serde_json::json!({
        "phase": state.phase(),
        "loading": state.loading,
        "error": state.error,
        "current": state.current(),
        "forecast": state.forecast(),
        "daily": shown,
    }))
}

fn description(condition: Option<&WeatherCondition>) -> String {
    condition.map(|c| capitalize_words(&c.description)).unwrap_or_default()
}

/// Nearest integer; exact halves round towards positive infinity, so -2.5 shows as -2.
fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // `f64::round` takes negative ties away from zero.
    if value - rounded == 0.5 { (rounded + 1.0) as i64 } else { rounded as i64 }
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use cityweather_core::{CityWeather, WeatherReport, model::MainReadings, model::Wind};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).expect("valid timestamp")
    }

    fn condition(main: &str, description: &str) -> Vec<WeatherCondition> {
        vec![WeatherCondition { main: main.into(), description: description.into() }]
    }

    fn day(secs: i64, temp: f64, weather: Vec<WeatherCondition>) -> ForecastSample {
        ForecastSample {
            dt: ts(secs),
            main: MainReadings { temp, humidity: 50 },
            wind: Wind { speed: 1.0 },
            weather,
        }
    }

    fn success_state() -> WeatherState {
        WeatherState {
            loading: false,
            error: None,
            report: Some(WeatherReport {
                current: CityWeather {
                    name: "Berlin".into(),
                    dt: ts(1_705_320_000),
                    main: MainReadings { temp: 4.6, humidity: 76 },
                    wind: Wind { speed: 3.6 },
                    weather: condition("Clear", "clear sky"),
                },
                forecast: Vec::new(),
            }),
        }
    }

    #[test]
    fn current_card_shows_readings() {
        let out = render_current(&success_state());

        assert_eq!(out, "Berlin\n☀️\n🌡️ 4.6°C\n🌬️ 3.6 m/s\n💧 76%\n🌍 Clear Sky");
    }

    #[test]
    fn idle_state_shows_placeholder() {
        assert_eq!(render_current(&WeatherState::default()), "City");
    }

    #[test]
    fn loading_hides_previous_readings() {
        let mut state = success_state();
        state.loading = true;

        assert_eq!(render_current(&state), "Berlin\nLoading...");
    }

    #[test]
    fn error_shows_only_message() {
        let state = WeatherState {
            loading: false,
            error: Some("Failed to fetch forecast.".into()),
            report: None,
        };

        let out = render(&state, &[], 5, &Utc);

        assert_eq!(out, "City\nFailed to fetch forecast.");
    }

    #[test]
    fn forecast_cards_use_weekday_rounded_temp_and_capitalised_text() {
        // 2024-01-15 is a Monday.
        let daily = vec![
            day(1_705_320_000, 2.5, condition("Snow", "light snow")),
            day(1_705_406_400, -2.5, Vec::new()),
        ];

        let out = render_forecast(&daily, 5, &Utc);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "5-Day Forecast");
        assert!(lines[1].starts_with("Mon, Jan 15"));
        assert!(lines[1].contains("  3°C"));
        assert!(lines[1].ends_with("Light Snow"));
        assert!(lines[2].starts_with("Tue, Jan 16"));
        assert!(lines[2].contains(" -2°C"));
    }

    #[test]
    fn forecast_is_limited_to_requested_days() {
        let daily: Vec<_> =
            (0..6).map(|i| day(1_705_320_000 + i * 86_400, 1.0, Vec::new())).collect();

        let out = render_forecast(&daily, 5, &Utc);

        assert_eq!(out.lines().count(), 6);
    }

    #[test]
    fn empty_forecast_renders_nothing() {
        assert!(render_forecast(&[], 5, &Utc).is_empty());
        assert_eq!(render(&success_state(), &[], 5, &Utc), render_current(&success_state()));
    }

    #[test]
    fn json_output_contains_phase_and_daily() {
        let daily = vec![day(1_705_320_000, 1.0, Vec::new())];

        let out = to_json(&success_state(), &daily, 5).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");

        assert_eq!(value["phase"], "success");
        assert_eq!(value["current"]["name"], "Berlin");
        assert_eq!(value["daily"][0]["dt"], 1_705_320_000);
        assert!(value["forecast"].is_array(), "raw forecast is included: {out}");
    }

    #[test]
    fn json_output_keeps_unreduced_forecast() {
        let mut state = success_state();
        if let Some(report) = state.report.as_mut() {
            report.forecast =
                (0..3).map(|i| day(1_705_276_800 + i * 10_800, 1.0, Vec::new())).collect();
        }
        let daily = vec![state.forecast()[0].clone()];

        let out = to_json(&state, &daily, 5).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");

        assert_eq!(value["forecast"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["daily"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn round_half_up_only_moves_exact_ties() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(1.4), 1);
    }

    #[test]
    fn capitalize_words_handles_multiple_spaces() {
        assert_eq!(capitalize_words("overcast  clouds"), "Overcast  Clouds");
    }
}
