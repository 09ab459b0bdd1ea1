//! Address resolution with provider fallback
//!
//! The primary provider is tried first when one is configured. If it is
//! missing, errors, or finds nothing, the fallback provider gets the same
//! trimmed address. Provider errors stop here: callers only ever see
//! `Some(coords)` or `None`.

use crate::geo::{Coordinates, GeoBackend};
use tracing::{debug, warn};

/// Geocoding resolver over a primary and a fallback backend
#[derive(Debug, Clone)]
pub struct GeocodingResolver<P, F> {
    primary: Option<P>,
    fallback: F,
}

impl<P: GeoBackend, F: GeoBackend> GeocodingResolver<P, F> {
    pub fn new(primary: Option<P>, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Whether a primary provider is configured
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Resolve an address to coordinates
    ///
    /// Blank addresses return `None` without touching any provider. Each
    /// call is independent: no caching and no retries.
    pub async fn resolve(&self, address: &str) -> Option<Coordinates> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }

        if let Some(primary) = &self.primary {
            if let Some(coords) = attempt(primary, address).await {
                return Some(coords);
            }
        }

        if let Some(coords) = attempt(&self.fallback, address).await {
            return Some(coords);
        }

        warn!(address, "Failed to geocode address");
        None
    }
}

async fn attempt<B: GeoBackend>(backend: &B, address: &str) -> Option<Coordinates> {
    match backend.geocode(address).await {
        Ok(Some(coords)) => {
            debug!(
                provider = backend.name(),
                address,
                latitude = coords.latitude,
                longitude = coords.longitude,
                "Geocoded"
            );
            Some(coords)
        }
        Ok(None) => {
            debug!(provider = backend.name(), address, "No geocoding result");
            None
        }
        Err(e) => {
            warn!(provider = backend.name(), address, error = %e, "Geocoding attempt failed");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory backend that records every address it is asked for
    #[derive(Debug, Default)]
    pub(crate) struct FakeBackend {
        known: HashMap<String, Coordinates>,
        failing: bool,
        pub(crate) queries: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        pub(crate) fn with(entries: &[(&str, Coordinates)]) -> Self {
            Self {
                known: entries
                    .iter()
                    .map(|(address, coords)| (address.to_string(), *coords))
                    .collect(),
                ..Self::default()
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        pub(crate) fn query_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    impl GeoBackend for FakeBackend {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
            self.queries.lock().unwrap().push(address.to_string());
            if self.failing {
                return Err(Error::Geocoding("provider unavailable".to_string()));
            }
            Ok(self.known.get(address).copied())
        }
    }

    /// Addresses the fallback of a fake-backed resolver was asked for, in order
    pub(crate) fn fallback_queries(
        resolver: &GeocodingResolver<FakeBackend, FakeBackend>,
    ) -> Vec<String> {
        resolver.fallback.queries.lock().unwrap().clone()
    }

    const CITY_HALL: Coordinates = Coordinates {
        latitude: 37.5663,
        longitude: 126.9779,
    };

    #[tokio::test]
    async fn test_blank_address_skips_providers() {
        let resolver = GeocodingResolver::new(Some(FakeBackend::default()), FakeBackend::default());

        assert_eq!(resolver.resolve("   ").await, None);
        assert_eq!(resolver.primary.as_ref().unwrap().query_count(), 0);
        assert_eq!(resolver.fallback.query_count(), 0);
    }

    #[tokio::test]
    async fn test_primary_hit_skips_fallback() {
        let resolver = GeocodingResolver::new(
            Some(FakeBackend::with(&[("city hall", CITY_HALL)])),
            FakeBackend::default(),
        );

        assert_eq!(resolver.resolve("  city hall ").await, Some(CITY_HALL));
        assert_eq!(resolver.fallback.query_count(), 0);
    }

    #[tokio::test]
    async fn test_primary_error_falls_back() {
        let resolver = GeocodingResolver::new(
            Some(FakeBackend::failing()),
            FakeBackend::with(&[("city hall", CITY_HALL)]),
        );

        assert_eq!(resolver.resolve("city hall").await, Some(CITY_HALL));
        assert_eq!(fallback_queries(&resolver), vec!["city hall".to_string()]);
    }

    #[tokio::test]
    async fn test_primary_empty_falls_back() {
        let resolver = GeocodingResolver::new(
            Some(FakeBackend::default()),
            FakeBackend::with(&[("city hall", CITY_HALL)]),
        );

        assert_eq!(resolver.resolve("city hall").await, Some(CITY_HALL));
        assert_eq!(resolver.primary.as_ref().unwrap().query_count(), 1);
    }

    #[tokio::test]
    async fn test_no_primary_uses_fallback() {
        let resolver: GeocodingResolver<FakeBackend, FakeBackend> =
            GeocodingResolver::new(None, FakeBackend::with(&[("city hall", CITY_HALL)]));

        assert!(!resolver.has_primary());
        assert_eq!(resolver.resolve("city hall").await, Some(CITY_HALL));
    }

    #[tokio::test]
    async fn test_both_exhausted_is_none() {
        let resolver = GeocodingResolver::new(Some(FakeBackend::failing()), FakeBackend::failing());

        assert_eq!(resolver.resolve("city hall").await, None);
        assert_eq!(resolver.fallback.query_count(), 1);
    }
}
