//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::Coordinates;
use crate::pipeline::{PassResult, ResolutionPass};
use crate::server::state::AppState;
use crate::store::{deserialize_stores, Store};
use crate::territory::ratio::{resolve_faction, OccupationRatio, RawRatioRecord};
use crate::territory::standing::{compute_standing, GlobalStanding};
use crate::territory::Faction;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/faction", post(faction_handler))
        .route("/api/standing", post(standing_handler))
        .route("/api/nearby", post(nearby_handler))
        .route("/api/nearby/latest", get(latest_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    status: Option<StatusCode>,
}

impl ApiError {
    fn not_found(error: &str) -> Self {
        ApiError {
            error: error.to_string(),
            code: "NOT_FOUND".to_string(),
            status: Some(StatusCode::NOT_FOUND),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status.unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Geocoding(_) => "GEOCODING_ERROR",
            Error::Source(_) => "SOURCE_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status: None,
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Whether the keyed primary geocoder is enabled
    pub primary_geocoder: bool,
    /// Nearby stores returned when a request gives no limit
    pub default_limit: usize,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        primary_geocoder: state.resolver().has_primary(),
        default_limit: state.config.ranking.limit,
    })
}

/// Formats response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Faction resolution response
#[derive(Debug, Serialize, Deserialize)]
pub struct FactionResponse {
    pub faction: Faction,
    /// Korean display name
    pub label: String,
    /// Pin colour
    pub color: String,
}

impl From<Faction> for FactionResponse {
    fn from(faction: Faction) -> Self {
        Self {
            faction,
            label: faction.label().to_string(),
            color: faction.color().to_string(),
        }
    }
}

/// Resolve the controlling faction of a store ratio
///
/// POST /api/faction
async fn faction_handler(Json(raw): Json<RawRatioRecord>) -> Json<FactionResponse> {
    Json(resolve_faction(&raw).into())
}

/// Compute the three-kingdom standing for a global ratio
///
/// POST /api/standing
async fn standing_handler(Json(ratio): Json<OccupationRatio>) -> Json<GlobalStanding> {
    Json(compute_standing(&ratio))
}

/// Nearby request body
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Stores to place on the map; malformed entries are dropped
    #[serde(default, deserialize_with = "deserialize_stores")]
    pub stores: Vec<Store>,
    /// Maximum stores to return; config default when absent
    pub limit: Option<usize>,
}

/// Run a resolution pass for an origin and store list
///
/// POST /api/nearby
///
/// The caller always gets its own pass back. It only becomes the published
/// result if no newer pass started while it was running.
async fn nearby_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NearbyRequest>,
) -> Result<Json<PassResult>, ApiError> {
    let origin = Coordinates::new(req.lat, req.lng);
    origin.validate().map_err(ApiError::from)?;

    let limit = req.limit.unwrap_or(state.config.ranking.limit);
    let ticket = state.tracker().begin();

    let result = ResolutionPass::new(origin, req.stores)
        .with_limit(limit)
        .run(state.resolver())
        .await;

    if !state.tracker().publish(ticket, result.clone()).await {
        debug!(ticket = ticket.id(), "Pass superseded before it finished");
    }

    Ok(Json(result))
}

/// Latest published pass
///
/// GET /api/nearby/latest
async fn latest_handler(State(state): State<Arc<AppState>>) -> Result<Json<PassResult>, ApiError> {
    state
        .tracker()
        .latest()
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No nearby pass has completed yet"))
}
