//! Store records as served by the backend, and their resolved form

pub mod source;

use crate::geo::Coordinates;
use crate::territory::ratio::{resolve_faction, RawRatioRecord};
use crate::territory::Faction;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

/// Kind of store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    Food,
    Drink,
    Cafe,
    /// Any kind the backend adds later
    #[serde(other)]
    Other,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Drink => write!(f, "drink"),
            Self::Cafe => write!(f, "cafe"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Read-only projection of a backend store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "store_id")]
    pub id: String,
    #[serde(rename = "store_name")]
    pub name: String,
    pub address: String,
    pub store_type: StoreType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<RawRatioRecord>,
    /// Controller name sent by some endpoints instead of a ratio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl Store {
    /// Controlling faction of this store
    ///
    /// The ratio decides when present. Without one, a recognisable `team`
    /// hint is used; anything else is unoccupied.
    pub fn faction(&self) -> Faction {
        if let Some(ratio) = &self.ratio {
            return resolve_faction(ratio);
        }

        match self.team.as_deref().map(Faction::from_str) {
            Some(Ok(faction)) => faction,
            Some(Err(_)) => {
                debug!(store = %self.id, team = ?self.team, "Unrecognised team hint");
                Faction::Unoccupied
            }
            None => Faction::Unoccupied,
        }
    }
}

/// Parse a store list record by record
///
/// A record that does not parse is dropped with a warning; the rest of the
/// list survives.
pub fn parse_stores(records: Vec<serde_json::Value>) -> Vec<Store> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Store>(record) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(index, error = %e, "Dropping malformed store record");
                None
            }
        })
        .collect()
}

/// `deserialize_with` adapter for store lists embedded in larger documents
pub fn deserialize_stores<'de, D>(deserializer: D) -> std::result::Result<Vec<Store>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let records = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(parse_stores(records))
}

/// A store placed on the map with its controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStore {
    #[serde(flatten)]
    pub store: Store,
    pub coordinates: Coordinates,
    pub faction: Faction,
    /// Great-circle distance from the user, set by ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl ResolvedStore {
    /// Attach coordinates to a store and resolve its faction
    pub fn new(store: Store, coordinates: Coordinates) -> Self {
        let faction = store.faction();
        Self {
            store,
            coordinates,
            faction,
            distance_km: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.store.id
    }
}
