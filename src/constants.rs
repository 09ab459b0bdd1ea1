//! Centralized constants for the samguk-map crate
//!
//! Values shared by more than one module live here.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// Google Maps Geocoding API (keyed, primary provider)
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com";

    /// OpenStreetMap Nominatim geocoding API (keyless fallback)
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Minimum spacing between Nominatim requests (usage policy: 1 req/s)
    pub const NOMINATIM_MIN_INTERVAL_MS: u64 = 1000;

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// Store list endpoint, relative to the backend base URL
    pub const STORES_PATH: &str = "/api/user/store";

    /// Global occupation ratio endpoint, relative to the backend base URL
    pub const OCCUPATIONS_PATH: &str = "/api/user/occupations";

    /// Environment variable that overrides `api_keys.google`
    pub const GOOGLE_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
}

/// Cache settings
pub mod cache {
    /// Origin (IP location) cache duration in seconds (1 hour)
    pub const ORIGIN_TTL_SECS: u64 = 3600;

    /// Origin cache file name
    pub const ORIGIN_CACHE_FILE: &str = "origin_cache.json";
}
