//! Resolution passes
//!
//! A pass takes an origin and a store list as plain inputs and produces a
//! fresh result set: every store that could be geocoded (in input order),
//! the nearest ones, and the ids that were skipped. Passes share nothing;
//! [`tracker::PassTracker`] decides which finished pass is current.

pub mod tracker;

use crate::geo::{Coordinates, GeoBackend, GeocodingResolver};
use crate::ranking::DistanceRanker;
use crate::store::{ResolvedStore, Store};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Stores that survived geocoding, plus the ones that did not
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBatch {
    pub resolved: Vec<ResolvedStore>,
    pub skipped: Vec<String>,
}

/// Geocode stores one at a time, in order
///
/// A store whose address cannot be resolved is left out and its id is
/// recorded in `skipped`; nothing else about the batch changes.
pub async fn resolve_stores<P: GeoBackend, F: GeoBackend>(
    resolver: &GeocodingResolver<P, F>,
    stores: &[Store],
) -> ResolvedBatch {
    let mut batch = ResolvedBatch::default();

    for store in stores {
        match resolver.resolve(&store.address).await {
            Some(coordinates) => batch
                .resolved
                .push(ResolvedStore::new(store.clone(), coordinates)),
            None => {
                debug!(store = %store.id, address = %store.address, "Skipping store");
                batch.skipped.push(store.id.clone());
            }
        }
    }

    batch
}

/// Output of one resolution pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassResult {
    pub origin: Coordinates,
    /// Every geocoded store, in input order
    pub resolved: Vec<ResolvedStore>,
    /// Closest stores, nearest first
    pub nearest: Vec<ResolvedStore>,
    /// Ids of stores whose address could not be geocoded
    pub skipped: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// One resolution pass over `(origin, stores)`
#[derive(Debug, Clone)]
pub struct ResolutionPass {
    origin: Coordinates,
    stores: Vec<Store>,
    ranker: DistanceRanker,
}

impl ResolutionPass {
    pub fn new(origin: Coordinates, stores: Vec<Store>) -> Self {
        Self {
            origin,
            stores,
            ranker: DistanceRanker::default(),
        }
    }

    /// Number of nearby stores to keep
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.ranker = DistanceRanker::new(limit);
        self
    }

    pub async fn run<P: GeoBackend, F: GeoBackend>(
        self,
        resolver: &GeocodingResolver<P, F>,
    ) -> PassResult {
        let batch = resolve_stores(resolver, &self.stores).await;
        let nearest = self.ranker.rank(self.origin, &batch.resolved);

        info!(
            stores = self.stores.len(),
            resolved = batch.resolved.len(),
            skipped = batch.skipped.len(),
            nearest = nearest.len(),
            "Resolution pass finished"
        );

        PassResult {
            origin: self.origin,
            resolved: batch.resolved,
            nearest,
            skipped: batch.skipped,
            completed_at: Utc::now(),
        }
    }
}
