//! Plan editor catalog route.

use axum::{extract::State, routing::get, Json, Router};
use domain::models::{CatalogResponse, CatalogSnapshot};
use domain::services::{group_by_category, load_catalog_or_empty, resolve, to_category_responses};
use std::sync::Arc;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::middleware::metrics::record_catalog_load;

pub fn router() -> Router<AppState> {
    Router::new().route("/catalog", get(get_catalog))
}

/// Loads a fresh catalog snapshot, degrading to an empty one on failure.
pub(crate) async fn load_snapshot(state: &AppState) -> Arc<CatalogSnapshot> {
    let snapshot = load_catalog_or_empty(state.catalog_source.as_ref()).await;
    record_catalog_load(snapshot.is_available());
    Arc::new(snapshot)
}

/// Assignable features grouped by category, plus the blocked remainder.
///
/// GET /api/admin/v1/plan-editor/catalog
#[axum::debug_handler(state = AppState)]
async fn get_catalog(
    State(state): State<AppState>,
    admin: AdminAuth,
) -> Result<Json<CatalogResponse>, ApiError> {
    let snapshot = load_snapshot(&state).await;
    let resolution = resolve(&snapshot);

    info!(
        admin_id = %admin.admin_id,
        assignable = resolution.assignable.len(),
        blocked = resolution.blocked.len(),
        catalog_available = snapshot.is_available(),
        "Plan editor catalog served"
    );

    let categories = to_category_responses(group_by_category(resolution.assignable));

    Ok(Json(CatalogResponse {
        catalog_available: snapshot.is_available(),
        categories,
        blocked: resolution.blocked,
    }))
}
