//! # OpenAPI Document Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document.
//! Serves it at `/openapi.json` and an interactive Scalar UI at `/docs`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::state::AppState;

/// Assembled OpenAPI document for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postal Code Lookup API",
        version = "0.1.0",
        description = "Validates Canadian postal codes and reports the province, subdivision, municipality, and special-purpose flags encoded in them.",
        license(name = "GPL-3.0-or-later")
    ),
    paths(
        crate::routes::postal_code::get_postal_code,
        crate::routes::validity::check_validity,
        crate::routes::regions::list_regions,
    ),
    components(schemas(
        pcl_core::PostalCode,
        crate::routes::validity::ValidityResponse,
        crate::routes::regions::RegionCodes,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "postal-code", description = "Postal code validation and classification"),
        (name = "regions", description = "Region-code table"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON document at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// Scalar API reference UI at `/docs`.
pub fn docs_router() -> Router {
    Scalar::with_url("/docs", ApiDoc::openapi()).into()
}

/// GET /openapi.json: Return the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
