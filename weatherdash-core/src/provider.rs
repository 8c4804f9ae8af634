use crate::{
    Config,
    error::WeatherError,
    model::{CurrentConditions, ForecastSeries, LocationRef},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Source of the two payloads one dashboard update needs.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, location: &LocationRef) -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, location: &LocationRef) -> Result<ForecastSeries, WeatherError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key()?;

    let mut client = match config.request_timeout_secs {
        Some(secs) => OpenWeatherClient::with_timeout(api_key.to_owned(), Duration::from_secs(secs))?,
        None => OpenWeatherClient::new(api_key.to_owned()),
    };

    if let Some(base) = config.api_base.as_deref() {
        client = client.with_base_url(base);
    }

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn client_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = client_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `weatherdash configure`"));
    }

    #[test]
    fn client_from_config_uses_configured_base() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.api_base = Some("http://localhost:9999/data/2.5/".to_string());

        let client = client_from_config(&cfg).expect("client should build");
        assert_eq!(client.base_url(), "http://localhost:9999/data/2.5");
    }

    #[test]
    fn client_from_config_with_timeout() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.request_timeout_secs = Some(3);

        assert!(client_from_config(&cfg).is_ok());
    }
}
