//! Handlers for recipient requests and their workflow status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hopelink_core::display::name_or_unknown;
use hopelink_core::error::CoreError;
use hopelink_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use hopelink_core::types::DbId;
use hopelink_core::validation::{
    validate_one_of, validate_required, MAX_TITLE_LEN, VALID_URGENCIES,
};
use hopelink_core::workflow::EntityType;
use hopelink_db::models::request::{CreateRequest, Request};
use hopelink_db::models::ListFilter;
use hopelink_db::repositories::RequestRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::status::{self, UpdateStatusRequest, WorkflowView};
use crate::middleware::actor::DeclaredActor;
use crate::query::{ActorParam, StatusListParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

const ENTITY: EntityType = EntityType::Request;

/// A request with placeholders filled in and its workflow position.
#[derive(Debug, Serialize)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: Request,
    pub recipient_display: String,
    pub workflow: WorkflowView,
}

impl From<Request> for RequestView {
    fn from(request: Request) -> Self {
        Self {
            recipient_display: name_or_unknown(request.recipient_name.as_deref()),
            workflow: WorkflowView::of(ENTITY, Some(request.status.as_str())),
            request,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /requests
// ---------------------------------------------------------------------------

pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<StatusListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ListFilter {
        statuses: status::status_filter(ENTITY, params.status.as_deref())?,
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let rows = RequestRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = rows.len(), "Listed requests");

    Ok(Json(PageResponse {
        data: rows.into_iter().map(RequestView::from).collect(),
        limit: filter.limit,
        offset: filter.offset,
    }))
}

// ---------------------------------------------------------------------------
// POST /requests
// ---------------------------------------------------------------------------

pub async fn create_request(
    State(state): State<AppState>,
    DeclaredActor(actor): DeclaredActor,
    Json(body): Json<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    validate_required("title", &body.title, MAX_TITLE_LEN)?;
    if let Some(urgency) = body.urgency.as_deref() {
        validate_one_of("urgency", urgency, VALID_URGENCIES)?;
    }

    let request = RequestRepo::create(&state.pool, &body, actor).await?;
    tracing::info!(id = request.id, actor = %actor, "Request created");
    status::publish_created(&state, ENTITY, request.id, actor, request.created_at);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RequestView::from(request),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /requests/{id}
// ---------------------------------------------------------------------------

pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Request",
                id,
            })
        })?;
    Ok(Json(DataResponse {
        data: RequestView::from(request),
    }))
}

// ---------------------------------------------------------------------------
// Workflow status
// ---------------------------------------------------------------------------

pub async fn request_transitions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ActorParam>,
) -> AppResult<impl IntoResponse> {
    let actor = status::parse_actor(params.actor.as_deref())?;
    let data = status::transitions_for(&state, ENTITY, id, actor).await?;
    Ok(Json(DataResponse { data }))
}

pub async fn update_request_status(
    State(state): State<AppState>,
    DeclaredActor(actor): DeclaredActor,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let data = status::update_status(&state, ENTITY, id, actor, &body).await?;
    Ok(Json(DataResponse { data }))
}

pub async fn request_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = status::history(&state, ENTITY, id).await?;
    Ok(Json(DataResponse { data }))
}
