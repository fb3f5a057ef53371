//! # Region Codes
//!
//! `GET /v1/regions` lists the region-code table the classifier uses, keyed
//! by `"<Province>[ <Subdivision>]"`. The codes double as the file names of
//! the per-region municipality files.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Region-code table response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegionCodes {
    /// `"Ontario Ottawa" -> "ON1"`, `"Nunavut" -> "NU"`, …
    pub regions: BTreeMap<String, String>,
}

/// Build the regions router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/regions", get(list_regions))
}

/// GET /v1/regions: Region-code table.
#[utoipa::path(
    get,
    path = "/v1/regions",
    responses(
        (status = 200, description = "Region codes keyed by province and subdivision", body = RegionCodes),
    ),
    tag = "regions"
)]
pub async fn list_regions(State(state): State<AppState>) -> Json<RegionCodes> {
    let regions = state
        .classifier
        .regions()
        .region_codes()
        .into_iter()
        .map(|(key, code)| (key, code.to_string()))
        .collect();
    Json(RegionCodes { regions })
}
