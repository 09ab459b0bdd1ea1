//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Keyless fallback used when the primary provider is not configured or
//! comes back empty. Nominatim requires an identifying User-Agent and allows
//! at most one request per second, so requests through one backend (and its
//! clones) are spaced at least [`NOMINATIM_MIN_INTERVAL_MS`] apart.

use crate::constants::api::{NOMINATIM_MIN_INTERVAL_MS, NOMINATIM_URL};
use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeoBackend};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const USER_AGENT: &str = concat!("samguk-map/", env!("CARGO_PKG_VERSION"));

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    min_interval: Duration,
    /// When the previous request was sent
    last_request: Arc<Mutex<Option<Instant>>>,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

impl NominatimBackend {
    /// Create a backend against the public Nominatim instance
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Create a backend against a custom instance
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Geocoding(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            min_interval: Duration::from_millis(NOMINATIM_MIN_INTERVAL_MS),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Override the spacing between requests (self-hosted instances, tests)
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Wait until the next request is allowed, then claim the slot
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            tokio::time::sleep_until(previous + self.min_interval).await;
        }
        *last = Some(Instant::now());
    }

    /// Parse lat/lon strings to coordinates
    fn parse_coords(lat: &str, lon: &str) -> Result<Coordinates> {
        let latitude: f64 = lat
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid latitude: {}", lat)))?;
        let longitude: f64 = lon
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid longitude: {}", lon)))?;
        Ok(Coordinates::new(latitude, longitude))
    }
}

impl GeoBackend for NominatimBackend {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(address)
        );

        self.throttle().await;
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        match results.into_iter().next() {
            Some(result) => Self::parse_coords(&result.lat, &result.lon).map(Some),
            None => Ok(None),
        }
    }
}
