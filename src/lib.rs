//! samguk-map: territory resolution for the three-kingdoms store map
//!
//! Stores on the map are contested by three kingdoms (Goguryeo, Baekjae and
//! Shinla). This crate turns backend data into what the map shows:
//!
//! - The controlling faction of each store, from its occupation ratio
//! - Store addresses geocoded to coordinates, with provider fallback
//! - The stores nearest to the user, by great-circle distance
//! - The global three-kingdom standing
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use samguk_map::territory::ratio::{resolve_faction, OccupationRatio, RawRatioRecord};
//! use samguk_map::territory::standing::compute_standing;
//! use samguk_map::territory::Faction;
//!
//! let raw: RawRatioRecord = OccupationRatio::new(20.0, 50.0, 30.0).into();
//! assert_eq!(resolve_faction(&raw), Faction::Baekjae);
//!
//! let standing = compute_standing(&OccupationRatio::new(34.0, 33.0, 33.0));
//! assert_eq!(standing.leader, Faction::Goguryeo);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod pipeline;
pub mod ranking;
pub mod server;
pub mod store;
pub mod territory;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{Coordinates, GeocodingResolver};
pub use pipeline::{PassResult, ResolutionPass};
pub use ranking::DistanceRanker;
pub use store::{ResolvedStore, Store};
pub use territory::Faction;
