//! Live dashboard widgets served from the in-memory status cache.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use hopelink_core::workflow::{EntityType, StatusBreakdown};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /dashboard/statuses
///
/// One breakdown per entity type. Reads never touch the database; the cache
/// is patched by change events and resynced periodically.
pub async fn status_overview(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut data: Vec<StatusBreakdown> = Vec::with_capacity(EntityType::ALL.len());
    for entity_type in EntityType::ALL {
        data.push(state.status_cache.breakdown(entity_type).await);
    }
    Ok(Json(DataResponse { data }))
}
