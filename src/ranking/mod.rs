//! Nearest-store ranking
//!
//! Orders already-geocoded stores by great-circle distance from the user.
//! Stores without coordinates never reach this module; the pipeline drops
//! them first.

use crate::config::defaults::DEFAULT_LIMIT;
use crate::constants::geo::EARTH_RADIUS_KM;
use crate::geo::Coordinates;
use crate::store::ResolvedStore;

/// Great-circle distance in kilometers (haversine formula)
pub fn haversine_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let delta_lat = (p2.latitude - p1.latitude).to_radians();
    let delta_lng = (p2.longitude - p1.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// The `limit` stores closest to `origin`, nearest first
///
/// Returns annotated copies; the input slice is not touched. Equal
/// distances keep their input order.
pub fn rank(origin: Coordinates, stores: &[ResolvedStore], limit: usize) -> Vec<ResolvedStore> {
    let mut ranked: Vec<ResolvedStore> = stores
        .iter()
        .map(|store| ResolvedStore {
            distance_km: Some(haversine_km(origin, store.coordinates)),
            ..store.clone()
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| {
        let da = a.distance_km.unwrap_or(f64::INFINITY);
        let db = b.distance_km.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });
    ranked.truncate(limit);
    ranked
}

/// Ranker carrying its configured limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceRanker {
    limit: usize,
}

impl DistanceRanker {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn rank(&self, origin: Coordinates, stores: &[ResolvedStore]) -> Vec<ResolvedStore> {
        rank(origin, stores, self.limit)
    }
}

impl Default for DistanceRanker {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::store;
    use crate::territory::ratio::OccupationRatio;
    use crate::territory::Faction;
    use approx::assert_abs_diff_eq;

    /// Roughly 1.11 km per 0.01 degree of latitude
    fn north_of(origin: Coordinates, degrees: f64) -> Coordinates {
        Coordinates::new(origin.latitude + degrees, origin.longitude)
    }

    fn resolved(id: &str, at: Coordinates) -> ResolvedStore {
        ResolvedStore::new(store(id, "addr", None), at)
    }

    const SEOUL: Coordinates = Coordinates {
        latitude: 37.5665,
        longitude: 126.978,
    };

    #[test]
    fn test_haversine_known_distance() {
        let busan = Coordinates::new(35.1796, 129.0756);
        // Seoul - Busan is about 325 km as the crow flies
        let d = haversine_km(SEOUL, busan);
        assert!((d - 325.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn test_haversine_zero_and_symmetric() {
        let other = Coordinates::new(33.4996, 126.5312);
        assert_eq!(haversine_km(SEOUL, SEOUL), 0.0);
        assert_abs_diff_eq!(
            haversine_km(SEOUL, other),
            haversine_km(other, SEOUL),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0));
        assert_abs_diff_eq!(d, 111.195, epsilon = 0.01);
    }

    #[test]
    fn test_closer_store_ranks_first() {
        let stores = vec![
            resolved("far", north_of(SEOUL, 0.05)),
            resolved("near", north_of(SEOUL, 0.01)),
            resolved("mid", north_of(SEOUL, 0.03)),
        ];

        let ranked = rank(SEOUL, &stores, 4);
        let ids: Vec<&str> = ranked.iter().map(|s| s.id()).collect();

        assert_eq!(ids, vec!["near", "mid", "far"]);
        assert!(ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        // input untouched
        assert!(stores.iter().all(|s| s.distance_km.is_none()));
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        let spot = north_of(SEOUL, 0.02);
        let stores = vec![
            resolved("first", spot),
            resolved("closest", SEOUL),
            resolved("second", spot),
            resolved("third", spot),
        ];

        let ids: Vec<String> = rank(SEOUL, &stores, 10)
            .into_iter()
            .map(|s| s.store.id)
            .collect();
        assert_eq!(ids, vec!["closest", "first", "second", "third"]);
    }

    #[test]
    fn test_limit_truncates() {
        let stores: Vec<ResolvedStore> = (1..=6)
            .map(|i| resolved(&i.to_string(), north_of(SEOUL, i as f64 * 0.01)))
            .collect();

        assert_eq!(rank(SEOUL, &stores, 4).len(), 4);
        assert_eq!(rank(SEOUL, &stores[..2], 4).len(), 2);
        assert!(rank(SEOUL, &stores, 0).is_empty());
        assert!(rank(SEOUL, &[], 4).is_empty());
    }

    #[test]
    fn test_default_ranker_limit() {
        let ranker = DistanceRanker::default();
        assert_eq!(ranker.limit(), 4);

        let stores: Vec<ResolvedStore> = (1..=6)
            .map(|i| resolved(&i.to_string(), north_of(SEOUL, i as f64 * 0.01)))
            .collect();
        assert_eq!(ranker.rank(SEOUL, &stores).len(), 4);
        assert_eq!(DistanceRanker::new(2).rank(SEOUL, &stores).len(), 2);
    }

    #[test]
    fn test_ranked_stores_keep_faction() {
        // about 2 km and 5 km north
        let a = ResolvedStore::new(
            store("a", "addr a", Some(OccupationRatio::new(50.0, 30.0, 20.0))),
            north_of(SEOUL, 0.018),
        );
        let b = ResolvedStore::new(
            store("b", "addr b", Some(OccupationRatio::new(0.0, 0.0, 0.0))),
            north_of(SEOUL, 0.045),
        );

        let ranked = rank(SEOUL, &[b, a], 4);

        assert_eq!(ranked[0].id(), "a");
        assert_eq!(ranked[0].faction, Faction::Goguryeo);
        assert_eq!(ranked[1].id(), "b");
        assert_eq!(ranked[1].faction, Faction::Unoccupied);
        assert_abs_diff_eq!(ranked[0].distance_km.unwrap(), 2.0, epsilon = 0.05);
    }
}
