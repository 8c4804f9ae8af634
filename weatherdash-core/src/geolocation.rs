use async_trait::async_trait;

use crate::{config::LocationConfig, error::GeolocationError, model::Coordinates};

/// One-shot position lookup.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Answers position lookups from the `[location]` config table.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocator {
    settings: Option<LocationConfig>,
}

impl ConfiguredGeolocator {
    pub fn new(settings: Option<LocationConfig>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let settings = self.settings.as_ref().ok_or(GeolocationError::Unsupported)?;

        if !settings.share {
            return Err(GeolocationError::PermissionDenied);
        }

        let coordinates = settings.coordinates();
        if !coordinates.is_valid() {
            tracing::warn!(?coordinates, "configured location is out of range");
            return Err(GeolocationError::Unavailable);
        }

        Ok(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(latitude: f64, longitude: f64, share: bool) -> Option<LocationConfig> {
        Some(LocationConfig { latitude, longitude, share })
    }

    #[tokio::test]
    async fn no_location_is_unsupported() {
        let geo = ConfiguredGeolocator::default();
        assert_eq!(geo.current_position().await, Err(GeolocationError::Unsupported));
    }

    #[tokio::test]
    async fn sharing_disabled_is_denied() {
        let geo = ConfiguredGeolocator::new(settings(51.5, -0.12, false));
        assert_eq!(geo.current_position().await, Err(GeolocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn out_of_range_is_unavailable() {
        let geo = ConfiguredGeolocator::new(settings(123.0, -0.12, true));
        assert_eq!(geo.current_position().await, Err(GeolocationError::Unavailable));
    }

    #[tokio::test]
    async fn returns_configured_coordinates() {
        let geo = ConfiguredGeolocator::new(settings(51.5, -0.12, true));
        assert_eq!(geo.current_position().await, Ok(Coordinates::new(51.5, -0.12)));
    }
}
