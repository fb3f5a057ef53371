//! # pcl-api: Axum API for Canadian Postal Code Lookup
//!
//! HTTP surface over [`pcl_core`]: validates postal codes, classifies them
//! against the region table, and resolves the municipality through a
//! pluggable backend (SQLite or per-region JSON files).
//!
//! ## API Surface
//!
//! | Route                     | Module                        | Purpose                  |
//! |---------------------------|-------------------------------|--------------------------|
//! | `/`                       | [`app`]                       | Liveness ("OK")          |
//! | `/health/readiness`       | [`app`]                       | Backend reachability     |
//! | `/v1/postal-code/{code}`  | [`routes::postal_code`]       | Full classification      |
//! | `/v1/valid/{code}`        | [`routes::validity`]          | Format check             |
//! | `/v1/regions`             | [`routes::regions`]           | Region-code table        |
//! | `/openapi.json`, `/docs`  | [`openapi`]                   | API documentation        |
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → Handler
//! ```

pub mod bootstrap;
pub mod db;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod regional_files;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::postal_code::router())
        .merge(routes::validity::router())
        .merge(routes::regions::router())
        .merge(openapi::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    api.merge(openapi::docs_router())
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "OK"
}

/// Readiness probe: 200 when the municipality backend can serve lookups.
///
/// The file backend is fully loaded at startup, so only SQLite is probed.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let Some(pool) = &state.db_pool else {
        return (StatusCode::OK, "ready");
    };

    match db::ping(pool).await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "not ready")
        }
    }
}
