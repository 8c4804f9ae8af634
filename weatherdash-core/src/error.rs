use std::fmt;

use thiserror::Error;

/// Which OpenWeather endpoint a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Everything that can end a single weather update.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found. Please check the spelling and try again.")]
    LocationNotFound,

    #[error("API key issue. Please check your API key.")]
    InvalidCredential,

    #[error("Failed to fetch {endpoint} data: {message}")]
    FetchFailed { endpoint: Endpoint, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse OpenWeather {endpoint} JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    /// Message shown in the transient notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
            other => other.to_string(),
        }
    }
}

/// One-shot position lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Geolocation is not supported on this device")]
    Unsupported,
}

impl GeolocationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Unsupported => "Geolocation is not supported on this device.".to_string(),
            _ => "Unable to get your location. Please search for a city.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failed_names_the_endpoint() {
        let err = WeatherError::FetchFailed {
            endpoint: Endpoint::Forecast,
            message: "Internal error".into(),
        };
        assert_eq!(err.user_message(), "Failed to fetch forecast data: Internal error");

        let err = WeatherError::FetchFailed {
            endpoint: Endpoint::Current,
            message: "Unknown error".into(),
        };
        assert_eq!(err.user_message(), "Failed to fetch weather data: Unknown error");
    }

    #[test]
    fn distinct_messages_for_not_found_and_credential() {
        assert!(WeatherError::LocationNotFound.user_message().contains("City not found"));
        assert!(WeatherError::InvalidCredential.user_message().contains("API key"));
    }

    #[test]
    fn geolocation_failures_prompt_for_search() {
        for err in [
            GeolocationError::PermissionDenied,
            GeolocationError::Unavailable,
            GeolocationError::Timeout,
        ] {
            assert!(err.user_message().contains("Please search for a city"));
        }
        assert!(GeolocationError::Unsupported.user_message().contains("not supported"));
    }
}
