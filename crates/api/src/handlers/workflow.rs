//! Stateless workflow queries: stage tables, status lookup, legal
//! transitions and per-status counts.
//!
//! Clients render badges and progress bars from these instead of carrying
//! their own copy of the stage tables.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use hopelink_core::workflow::{EntityType, Stage, StatusBreakdown, TerminalStatus};
use hopelink_db::repositories::StatusRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::status::{self, TransitionsResponse, WorkflowView};
use crate::query::{StatusParam, TransitionQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// Full stage table for one entity type.
#[derive(Debug, Serialize)]
pub struct StageTable {
    pub entity_type: EntityType,
    pub stages: &'static [Stage],
    pub exceptions: &'static [TerminalStatus],
}

/// Lookup result echoing the raw input.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub entity_type: EntityType,
    pub status: Option<String>,
    #[serde(flatten)]
    pub workflow: WorkflowView,
}

/// GET /workflow/{entity_type}/stages
pub async fn get_stages(Path(entity_type): Path<String>) -> AppResult<impl IntoResponse> {
    let entity_type = status::parse_entity_type(&entity_type)?;
    Ok(Json(DataResponse {
        data: StageTable {
            entity_type,
            stages: entity_type.stages(),
            exceptions: entity_type.exceptions(),
        },
    }))
}

/// GET /workflow/{entity_type}/lookup?status=
///
/// Never fails for an unknown status; the view reports `recognized: false`.
pub async fn lookup_status(
    Path(entity_type): Path<String>,
    Query(params): Query<StatusParam>,
) -> AppResult<impl IntoResponse> {
    let entity_type = status::parse_entity_type(&entity_type)?;
    let workflow = WorkflowView::of(entity_type, params.status.as_deref());
    Ok(Json(DataResponse {
        data: LookupResponse {
            entity_type,
            status: params.status,
            workflow,
        },
    }))
}

/// GET /workflow/{entity_type}/transitions?status=&actor=
pub async fn list_transitions(
    Path(entity_type): Path<String>,
    Query(params): Query<TransitionQuery>,
) -> AppResult<impl IntoResponse> {
    let entity_type = status::parse_entity_type(&entity_type)?;
    let actor = status::parse_actor(params.actor.as_deref())?;
    Ok(Json(DataResponse {
        data: TransitionsResponse::build(entity_type, params.status, actor),
    }))
}

/// GET /workflow/{entity_type}/breakdown
///
/// Counted in the database; `/dashboard/statuses` serves the cached view.
pub async fn get_breakdown(
    State(state): State<AppState>,
    Path(entity_type): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entity_type = status::parse_entity_type(&entity_type)?;
    let rows = StatusRepo::count_by_status(&state.pool, entity_type).await?;
    let breakdown = StatusBreakdown::from_counts(
        entity_type,
        rows.iter().map(|(status, count)| (Some(status.as_str()), *count)),
    );
    Ok(Json(DataResponse { data: breakdown }))
}
