//! Core library for the `weatherdash` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherSource` seam
//! - Forecast reduction and presentation (icons, themes, display fields)
//! - The `Dashboard` update cycle that ties a source to a display surface
//!
//! It is used by `weatherdash-cli`, but any front end implementing
//! `DisplaySurface` can drive it.

pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod presenter;
pub mod provider;

pub use config::{Config, LocationConfig};
pub use dashboard::{Dashboard, UpdateOutcome};
pub use display::DisplaySurface;
pub use error::{GeolocationError, WeatherError};
pub use geolocation::{ConfiguredGeolocator, Geolocator};
pub use model::{Coordinates, CurrentConditions, ForecastSeries, LocationRef};
pub use presenter::{DashboardView, Theme, WeatherIcon};
pub use provider::{WeatherSource, client_from_config, openweather::OpenWeatherClient};
