//! # Postal Code Lookup
//!
//! `GET /v1/postal-code/{code}` validates the code, derives its region and
//! flags, and resolves the municipality through the configured backend.
//! The resolver call is bounded by `LOOKUP_TIMEOUT_MS`.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use pcl_core::PostalCode;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Build the postal code router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/postal-code/{code}", get(get_postal_code))
}

/// GET /v1/postal-code/{code}: Classify a postal code.
#[utoipa::path(
    get,
    path = "/v1/postal-code/{code}",
    params(
        ("code" = String, Path, description = "Canadian postal code, with or without the middle space", example = "K1A 0B1"),
    ),
    responses(
        (status = 200, description = "Postal code information", body = PostalCode),
        (status = 400, description = "Malformed postal code", body = ErrorBody),
        (status = 404, description = "No municipality recorded for the FSA", body = ErrorBody),
        (status = 503, description = "Municipality backend unavailable", body = ErrorBody),
        (status = 504, description = "Municipality lookup timed out", body = ErrorBody),
    ),
    tag = "postal-code"
)]
pub async fn get_postal_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PostalCode>, AppError> {
    let limit = state.config.lookup_timeout;
    let lookup = state.classifier.classify(&code, state.resolver.as_ref());

    match tokio::time::timeout(limit, lookup).await {
        Ok(result) => Ok(Json(result?)),
        Err(_) => Err(AppError::LookupTimeout(limit.as_millis())),
    }
}
