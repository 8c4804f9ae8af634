//! Turns raw OpenWeather payloads into display-ready fields.
//!
//! Nothing here performs I/O. Inputs are assumed to come from a successful
//! request pair; missing conditions fall back to [`Condition::default`].

use chrono::{DateTime, FixedOffset, Timelike};

use crate::model::{Condition, CurrentConditions, ForecastEntry, ForecastSeries};

/// Time component that marks the daily sample in `dt_txt`.
pub const NOON_MARKER: &str = "12:00:00";

/// Maximum number of daily summaries shown.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Hint character OpenWeather uses for night icons ("01n", "10n", ...).
const NIGHT_MARKER: char = 'n';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Haze,
    ClearDay,
    ClearNight,
    CloudsDay,
    CloudsNight,
    Uncertain,
}

impl WeatherIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "⛈️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Haze => "🌫️",
            Self::ClearDay => "☀️",
            Self::ClearNight => "🌙",
            Self::CloudsDay => "⛅",
            Self::CloudsNight => "☁️",
            Self::Uncertain => "🌤️",
        }
    }
}

/// Picks the icon for a condition code; `hint` decides the day/night variant.
pub fn icon(code: i32, hint: Option<&str>) -> WeatherIcon {
    let night = hint.is_some_and(|h| h.contains(NIGHT_MARKER));

    match code {
        200..300 => WeatherIcon::Thunderstorm,
        300..400 => WeatherIcon::Drizzle,
        500..600 => WeatherIcon::Rain,
        600..700 => WeatherIcon::Snow,
        700..800 => WeatherIcon::Haze,
        800 if night => WeatherIcon::ClearNight,
        800 => WeatherIcon::ClearDay,
        801.. if night => WeatherIcon::CloudsNight,
        801.. => WeatherIcon::CloudsDay,
        _ => WeatherIcon::Uncertain,
    }
}

fn condition_icon(condition: &Condition) -> WeatherIcon {
    icon(condition.id, condition.icon.as_deref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Night,
    Clear,
    Sunny,
    Rainy,
    Cloudy,
    /// No theme class; the surface keeps its default look.
    Neutral,
}

impl Theme {
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            Self::Night => Some("night"),
            Self::Clear => Some("clear"),
            Self::Sunny => Some("sunny"),
            Self::Rainy => Some("rainy"),
            Self::Cloudy => Some("cloudy"),
            Self::Neutral => None,
        }
    }
}

/// Checked in order; first rule with a matching keyword wins.
const THEME_RULES: &[(&[&str], Theme)] = &[
    (&["clear"], Theme::Clear),
    (&["sun"], Theme::Sunny),
    (&["rain", "drizzle", "thunder"], Theme::Rainy),
    (&["cloud"], Theme::Cloudy),
];

pub fn is_night_hour(hour: u32) -> bool {
    !(6..=20).contains(&hour)
}

/// Background theme from the condition category and the wall-clock hour.
pub fn theme(category: &str, hour: u32) -> Theme {
    if is_night_hour(hour) {
        return Theme::Night;
    }

    let category = category.to_lowercase();
    THEME_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| category.contains(k)))
        .map_or(Theme::Neutral, |(_, theme)| *theme)
}

/// Rounds halves towards positive infinity, so -2.5 becomes -2.
pub fn round_degrees(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub location: String,
    pub date: String,
    pub icon: WeatherIcon,
    pub temperature: i32,
    pub feels_like: i32,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub weekday: String,
    pub icon: WeatherIcon,
    pub temperature: i32,
    pub temp_min: i32,
    pub temp_max: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub current: CurrentView,
    pub forecast: Vec<ForecastDay>,
    pub theme: Theme,
}

/// Display fields for "now". The date shown is `now`, not the observation time.
pub fn project_current(current: &CurrentConditions, now: &DateTime<FixedOffset>) -> CurrentView {
    let fallback = Condition::default();
    let condition = current.primary().unwrap_or(&fallback);

    let location = match current.sys.country.as_deref() {
        Some(country) if !country.is_empty() => format!("{}, {}", current.name, country),
        _ => current.name.clone(),
    };

    CurrentView {
        location,
        date: now.format("%A, %B %-d, %Y").to_string(),
        icon: condition_icon(condition),
        temperature: round_degrees(current.main.temp),
        feels_like: round_degrees(current.main.feels_like),
        description: condition.description.clone(),
        humidity: current.main.humidity,
        wind_speed: current.wind.speed,
        pressure: current.main.pressure,
    }
}

fn summarize_day(entry: &ForecastEntry, offset: &FixedOffset) -> ForecastDay {
    let fallback = Condition::default();
    let condition = entry.primary().unwrap_or(&fallback);

    let weekday = DateTime::from_timestamp(entry.dt, 0)
        .map(|utc| utc.with_timezone(offset).format("%a").to_string())
        .unwrap_or_default();

    ForecastDay {
        weekday,
        icon: condition_icon(condition),
        temperature: round_degrees(entry.main.temp),
        temp_min: round_degrees(entry.main.temp_min),
        temp_max: round_degrees(entry.main.temp_max),
    }
}

/// One summary per day: the first [`MAX_FORECAST_DAYS`] noon entries, in series order.
///
/// Weekday names come from the epoch timestamp rendered in `offset`.
pub fn reduce_forecast(series: &ForecastSeries, offset: &FixedOffset) -> Vec<ForecastDay> {
    series
        .list
        .iter()
        .filter(|entry| entry.time_of_day() == NOON_MARKER)
        .take(MAX_FORECAST_DAYS)
        .map(|entry| summarize_day(entry, offset))
        .collect()
}

pub fn present(
    current: &CurrentConditions,
    forecast: &ForecastSeries,
    now: &DateTime<FixedOffset>,
) -> DashboardView {
    let category = current.primary().map_or("", |c| c.main.as_str());

    DashboardView {
        current: project_current(current, now),
        forecast: reduce_forecast(forecast, now.offset()),
        theme: theme(category, now.hour()),
    }
}
