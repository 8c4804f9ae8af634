use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{
    Confirm, CustomType, CustomUserError, InquireError, Password, PasswordDisplayMode, Text,
    validator::Validation,
};
use weatherdash_core::{
    Config, ConfiguredGeolocator, Coordinates, Dashboard, UpdateOutcome, client_from_config,
};

use crate::terminal::TerminalSurface;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Log requests and responses (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional home location.
    Configure,

    /// Show current weather and the 5-day forecast.
    ///
    /// Without a city, uses --lat/--lon or the configured home location.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Prompt for cities repeatedly; blank input uses your location.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, lat, lon } => {
                let config = Config::load()?;
                let dashboard = build_dashboard(&config)?;

                let outcome = match (city, lat.zip(lon)) {
                    (Some(city), _) => dashboard.search(&city).await,
                    (None, Some((lat, lon))) => {
                        Some(dashboard.update(Coordinates::new(lat, lon).into()).await)
                    }
                    (None, None) => {
                        let geolocator = ConfiguredGeolocator::new(config.location.clone());
                        Some(dashboard.locate(&geolocator).await)
                    }
                };

                Ok(match outcome {
                    Some(UpdateOutcome::Rendered) => ExitCode::SUCCESS,
                    Some(_) => ExitCode::FAILURE,
                    None => {
                        eprintln!("Please enter a city name.");
                        ExitCode::FAILURE
                    }
                })
            }
            Command::Interactive => {
                let config = Config::load()?;
                interactive(&config).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn build_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let client = client_from_config(config)?;
    Ok(Dashboard::new(Arc::new(client), Arc::new(TerminalSurface::new())))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let wants_location = Confirm::new("Set a home location for lookups without a city?")
        .with_default(config.location.is_some())
        .prompt()?;

    if wants_location {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number")
            .with_validator(validate_latitude)
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number")
            .with_validator(validate_longitude)
            .prompt()?;

        let coordinates = Coordinates::new(latitude, longitude);
        config.set_location(coordinates);
    } else {
        config.location = None;
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

fn validate_in_range(value: f64, limit: f64) -> Validation {
    if (-limit..=limit).contains(&value) {
        Validation::Valid
    } else {
        Validation::Invalid(format!("Please enter a number between -{limit} and {limit}").into())
    }
}

fn validate_latitude(value: &f64) -> Result<Validation, CustomUserError> {
    Ok(validate_in_range(*value, 90.0))
}

fn validate_longitude(value: &f64) -> Result<Validation, CustomUserError> {
    Ok(validate_in_range(*value, 180.0))
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let dashboard = build_dashboard(config)?;
    let geolocator = ConfiguredGeolocator::new(config.location.clone());

    // Like a page load: try the user's location first.
    dashboard.locate(&geolocator).await;

    loop {
        let input = tokio::task::spawn_blocking(|| {
            Text::new("City:")
                .with_help_message("blank for your location, Esc to quit")
                .prompt()
        })
        .await?;

        match input {
            Ok(city) if city.trim().is_empty() => {
                dashboard.locate(&geolocator).await;
            }
            Ok(city) => {
                dashboard.search(&city).await;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
