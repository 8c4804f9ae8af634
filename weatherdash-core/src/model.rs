use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// What the user asked for: a free-text place or a position.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationRef {
    Place(String),
    Coordinates(Coordinates),
}

impl LocationRef {
    pub fn place(name: impl Into<String>) -> Self {
        LocationRef::Place(name.into())
    }

    /// Location part of the OpenWeather query string.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationRef::Place(name) => vec![("q", name.clone())],
            LocationRef::Coordinates(c) => {
                vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
            }
        }
    }
}

impl fmt::Display for LocationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationRef::Place(name) => f.write_str(name),
            LocationRef::Coordinates(c) => write!(f, "{:.4},{:.4}", c.latitude, c.longitude),
        }
    }
}

impl From<Coordinates> for LocationRef {
    fn from(c: Coordinates) -> Self {
        LocationRef::Coordinates(c)
    }
}

// Payload shapes below keep OpenWeather's field names.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i32,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    /// Day/night hint such as "10d" or "01n".
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    #[serde(default)]
    pub sys: CountryInfo,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    #[serde(default)]
    pub wind: Wind,
}

impl CurrentConditions {
    pub fn primary(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Epoch seconds.
    pub dt: i64,
    /// Provider-formatted "YYYY-MM-DD HH:MM:SS".
    pub dt_txt: String,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
}

impl ForecastEntry {
    pub fn primary(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Time-of-day part of `dt_txt`.
    pub fn time_of_day(&self) -> &str {
        self.dt_txt
            .rsplit_once(' ')
            .map_or(self.dt_txt.as_str(), |(_, time)| time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: Option<CityInfo>,
}
