//! Geocoding module
//!
//! Provides address geocoding (primary keyed provider with a keyless
//! fallback) and IP geolocation for the user's origin.

pub mod google;
pub mod ip_location;
pub mod nominatim;
pub mod resolver;

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub use resolver::GeocodingResolver;

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Geocode an address to coordinates
    ///
    /// Returns the first match, `Ok(None)` when the provider found nothing,
    /// and `Err` when the request itself failed.
    fn geocode(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<Option<Coordinates>>> + Send;
}

/// Resolver wired to the configured providers
pub type DefaultResolver = GeocodingResolver<google::GoogleBackend, nominatim::NominatimBackend>;

/// Build the default resolver from config
///
/// The Google provider is only enabled when an API key is available.
pub fn get_resolver(config: &Config) -> Result<DefaultResolver> {
    let primary = match config.google_api_key() {
        Some(key) => Some(google::GoogleBackend::new(
            key,
            &config.geocoding.region,
            &config.geocoding.language,
        )?),
        None => None,
    };

    Ok(GeocodingResolver::new(
        primary,
        nominatim::NominatimBackend::new()?,
    ))
}

/// Get the IP location service
pub fn get_ip_locator() -> ip_location::IpLocator {
    ip_location::IpLocator::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_accept_short_field_names() {
        let parsed: Coordinates = serde_json::from_str(r#"{"lat": 37.5665, "lng": 126.978}"#).unwrap();
        assert_eq!(parsed, Coordinates::new(37.5665, 126.978));

        let json = serde_json::to_value(parsed).unwrap();
        assert_eq!(json["latitude"], 37.5665);
    }

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(37.5665, 126.978).validate().is_ok());
        assert!(Coordinates::new(90.0, -180.0).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, 180.5).validate().is_err());
    }
}
