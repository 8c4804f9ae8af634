use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    error::{Endpoint, WeatherError},
    model::{CurrentConditions, ForecastSeries, LocationRef},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Unit system requested from the API. Temperatures come back in °C, wind in m/s.
const UNITS: &str = "metric";

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        location: &LocationRef,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());

        let mut query = location.query_params();
        query.push(("appid", self.api_key.clone()));
        query.push(("units", UNITS.to_string()));

        debug!(%url, "sending OpenWeather request");

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        debug!(%status, "OpenWeather responded");

        if !status.is_success() {
            // An unreadable error body is treated like an empty one.
            let body = res.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_body(&body), "OpenWeather {endpoint} request failed");
            return Err(classify_failure(endpoint, status, &body));
        }

        let body = res.text().await?;
        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }
}

#[derive(Debug, Default, Deserialize)]
struct OwErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Maps a non-success response onto the error taxonomy.
fn classify_failure(endpoint: Endpoint, status: StatusCode, body: &str) -> WeatherError {
    match status {
        StatusCode::NOT_FOUND => WeatherError::LocationNotFound,
        StatusCode::UNAUTHORIZED => WeatherError::InvalidCredential,
        _ => {
            let parsed: OwErrorBody = serde_json::from_str(body).unwrap_or_default();
            let message = parsed
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());

            WeatherError::FetchFailed { endpoint, message }
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip_all, fields(location = %location), level = "debug")]
    async fn fetch_current(&self, location: &LocationRef) -> Result<CurrentConditions, WeatherError> {
        self.get(Endpoint::Current, location).await
    }

    #[instrument(skip_all, fields(location = %location), level = "debug")]
    async fn fetch_forecast(&self, location: &LocationRef) -> Result<ForecastSeries, WeatherError> {
        self.get(Endpoint::Forecast, location).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
