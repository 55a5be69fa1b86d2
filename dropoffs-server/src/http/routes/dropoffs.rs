//! Drop-off lookup endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::db::DropoffRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::FeatureCollection;

/// Query string for `GET /data/dropoffs`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropoffParams {
    #[serde(default)]
    pub center_lat: String,
    #[serde(default)]
    pub center_lng: String,
}

/// GET /data/dropoffs?centerLat=..&centerLng=..
async fn nearby_dropoffs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DropoffParams>,
) -> Result<FeatureCollection, ApiError> {
    let collection = DropoffRepo::new(&state.pool, &state.query)
        .nearby_raw(&params.center_lat, &params.center_lng)
        .await?;
    Ok(collection)
}

/// Drop-off routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/data/dropoffs", get(nearby_dropoffs))
}
