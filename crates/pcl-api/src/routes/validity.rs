//! # Validity Check
//!
//! `GET /v1/valid/{code}` answers whether a code matches the postal code
//! grammar. No region or municipality lookup is performed.

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use pcl_core::NormalizedCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Successful validity response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidityResponse {
    pub valid: bool,
    pub message: String,
}

/// Build the validity router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/valid/{code}", get(check_validity))
}

/// GET /v1/valid/{code}: Check a postal code's format.
#[utoipa::path(
    get,
    path = "/v1/valid/{code}",
    params(
        ("code" = String, Path, description = "Candidate postal code", example = "B2C9Z9"),
    ),
    responses(
        (status = 200, description = "The code is valid", body = ValidityResponse),
        (status = 400, description = "The code is not a Canadian postal code", body = ErrorBody),
    ),
    tag = "postal-code"
)]
pub async fn check_validity(Path(code): Path<String>) -> Result<Json<ValidityResponse>, AppError> {
    NormalizedCode::parse(&code)?;
    Ok(Json(ValidityResponse {
        valid: true,
        message: "Valid".to_string(),
    }))
}
