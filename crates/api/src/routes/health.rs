//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;

/// Simple status response for liveness/readiness checks.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

impl StatusResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Liveness endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse::new("alive"))
}

/// Readiness endpoint.
///
/// Returns 200 OK if the plan database answers a ping. Also refreshes the
/// pool gauges so every readiness check doubles as a metrics sample.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    let unavailable = || {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusResponse::new("unavailable")),
        )
    };

    let Some(pool) = state.pool.as_ref() else {
        return Err(unavailable());
    };

    persistence::metrics::record_pool_metrics(pool);

    match persistence::db::ping(pool).await {
        Ok(()) => Ok(Json(StatusResponse::new("ready"))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            Err(unavailable())
        }
    }
}
