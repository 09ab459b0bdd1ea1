//! Approximate user origin from IP geolocation
//!
//! Stands in for a device position fix when ranking nearby stores from the
//! command line. Uses ip-api.com with a one-hour file cache.

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::api::IP_API_URL;
use crate::constants::cache::{ORIGIN_CACHE_FILE, ORIGIN_TTL_SECS};
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// A located origin with a human-readable place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub coordinates: Coordinates,
    pub place: String,
}

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedOrigin {
    origin: Origin,
    timestamp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl IpLocator {
    /// Create a locator caching under the user cache directory
    pub fn new() -> Self {
        let cache_path = dirs::cache_dir().map(|p| p.join(APP_DIR_NAME).join(ORIGIN_CACHE_FILE));
        Self {
            client: reqwest::Client::new(),
            endpoint: IP_API_URL.to_string(),
            cache_path,
        }
    }

    /// Create a locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: IP_API_URL.to_string(),
            cache_path: Some(cache_path),
        }
    }

    /// Create a locator without caching
    pub fn without_cache() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: IP_API_URL.to_string(),
            cache_path: None,
        }
    }

    /// Point the locator at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Current origin based on IP address
    pub async fn locate(&self) -> Result<Origin> {
        if let Some(cached) = self.load_cache() {
            return Ok(cached);
        }

        let origin = self.fetch_origin().await?;
        self.save_cache(&origin);
        Ok(origin)
    }

    async fn fetch_origin(&self) -> Result<Origin> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            Error::Geocoding(format!("Failed to parse IP location response: {}", e))
        })?;

        if data.status != "success" {
            return Err(Error::Geocoding("IP location lookup failed".to_string()));
        }

        let (Some(lat), Some(lon)) = (data.lat, data.lon) else {
            return Err(Error::Geocoding("No coordinates in IP location response".to_string()));
        };

        let place = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Origin {
            coordinates: Coordinates::new(lat, lon),
            place: if place.is_empty() {
                "Unknown Location".to_string()
            } else {
                place
            },
        })
    }

    fn load_cache(&self) -> Option<Origin> {
        let cache_path = self.cache_path.as_ref()?;
        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedOrigin = serde_json::from_str(&content).ok()?;

        (now_secs().saturating_sub(cached.timestamp) < ORIGIN_TTL_SECS).then_some(cached.origin)
    }

    fn save_cache(&self, origin: &Origin) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let cached = CachedOrigin {
            origin: origin.clone(),
            timestamp: now_secs(),
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}
