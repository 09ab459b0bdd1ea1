//! Google Maps Geocoding backend
//!
//! Keyed primary provider. Requests are biased to the configured region and
//! language. Any status other than `OK` is treated as "no result" or an
//! error so the resolver can fall back.

use crate::constants::api::GOOGLE_GEOCODE_URL;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeoBackend};
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Google geocoding backend
#[derive(Debug, Clone)]
pub struct GoogleBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    region: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GoogleBackend {
    /// Create a backend against the public Google endpoint
    pub fn new(api_key: impl Into<String>, region: &str, language: &str) -> Result<Self> {
        Self::with_base_url(GOOGLE_GEOCODE_URL, api_key, region, language)
    }

    /// Create a backend against a custom endpoint (proxies, tests)
    pub fn with_base_url(
        base_url: &str,
        api_key: impl Into<String>,
        region: &str,
        language: &str,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Geocoding(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            region: region.to_string(),
            language: language.to_string(),
        })
    }

    fn search_url(&self, address: &str) -> String {
        format!(
            "{}/maps/api/geocode/json?address={}&key={}&region={}&language={}",
            self.base_url,
            urlencoding::encode(address),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.region),
            urlencoding::encode(&self.language),
        )
    }
}

impl GeoBackend for GoogleBackend {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let response = self
            .client
            .get(self.search_url(address))
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Google request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Google returned status: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Google response: {}", e)))?;

        match body.status.as_str() {
            "OK" => Ok(body
                .results
                .into_iter()
                .next()
                .map(|r| Coordinates::new(r.geometry.location.lat, r.geometry.location.lng))),
            "ZERO_RESULTS" => Ok(None),
            other => Err(Error::Geocoding(format!(
                "Google geocoding status {}{}",
                other,
                body.error_message
                    .map(|m| format!(": {}", m))
                    .unwrap_or_default()
            ))),
        }
    }
}
