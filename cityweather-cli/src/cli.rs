use std::{io::Write, path::PathBuf, process::ExitCode};

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, Phase, Session, WeatherProvider, WeatherState, provider_from_config,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::info;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "cityweather",
    version,
    about = "Current weather and a 5-day forecast for any city"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the platform default.
    #[arg(long, global = true, env = "CITYWEATHER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Number of daily cards to show.
        #[arg(long)]
        days: Option<usize>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search cities interactively until an empty entry or Esc.
    Search {
        /// Number of daily cards to show.
        #[arg(long)]
        days: Option<usize>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure(self.config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, days, json } => {
                let config = load_config(self.config.as_ref())?;
                show(&config, city, days, json).await
            }
            Command::Search { days } => {
                let config = load_config(self.config.as_ref())?;
                search(&config, days).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn configure(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };
    // File contents only, so an exported OPENWEATHER_API_KEY is never written to disk.
    let mut config = Config::read_from(&path)?;

    let help = if config.api_key().is_some() {
        "Leave empty to keep the stored key"
    } else {
        "Get a free key at https://openweathermap.org/api"
    };
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()
        .context("Failed to read API key")?;

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    } else if config.api_key().is_none() {
        bail!("An API key is required.");
    }

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string());

    config.save_to(&path)?;
    info!(path = %path.display(), "configured");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(
    config: &Config,
    city: Option<String>,
    days: Option<usize>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let provider = provider_from_config(config)?;
    let city = city.unwrap_or_else(|| config.default_city().to_string());
    let days = days.unwrap_or_else(|| config.forecast_days());

    let mut session = Session::new();
    session.search(provider.as_ref(), &city).await;

    let daily = session.daily_forecast();
    if json {
        println!("{}", render::to_json(session.state(), &daily, days)?);
    } else {
        println!("{}", render::render(session.state(), &daily, days, &Local));
    }

    Ok(if search_failed(session.state()) { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// `show` exits non-zero when the search ended in an error.
fn search_failed(state: &WeatherState) -> bool {
    state.phase() == Phase::Error
}

async fn search(config: &Config, days: Option<usize>) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let days = days.unwrap_or_else(|| config.forecast_days());
    let mut session = Session::new();
    let mut city = config.default_city().to_string();

    // Start with the default city, then keep prompting.
    loop {
        run_search(&mut std::io::stdout(), &mut session, provider.as_ref(), &city, days).await?;

        let input = match Text::new("City:")
            .with_initial_value(&city)
            .with_help_message("Enter to search, empty or Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        };

        let input = input.trim();
        if input.is_empty() {
            break;
        }
        city = input.to_string();
    }

    Ok(())
}

/// One interactive search: announce loading, fetch, then render the settled state.
async fn run_search(
    out: &mut impl Write,
    session: &mut Session,
    provider: &dyn WeatherProvider,
    city: &str,
    days: usize,
) -> std::io::Result<()> {
    let ticket = session.begin();
    writeln!(out, "{}", render::LOADING)?;
    out.flush()?;

    let result = provider.fetch_weather(city).await;
    session.complete(ticket, result);

    writeln!(out, "{}\n", render::render(session.state(), &session.daily_forecast(), days, &Local))
}
