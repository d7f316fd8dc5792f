//! Handlers for deliveries and their workflow status.
//!
//! A delivery carries one claim (a donation matched to a request) and is
//! created once per pair; a second delivery for the same pair is a 409.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hopelink_core::display::name_or_unknown;
use hopelink_core::error::CoreError;
use hopelink_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use hopelink_core::types::DbId;
use hopelink_core::workflow::EntityType;
use hopelink_db::models::delivery::{CreateDelivery, Delivery};
use hopelink_db::models::ListFilter;
use hopelink_db::repositories::{DeliveryRepo, RequestRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::status::{self, UpdateStatusRequest, WorkflowView};
use crate::middleware::actor::DeclaredActor;
use crate::query::{ActorParam, StatusListParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

const ENTITY: EntityType = EntityType::Delivery;

/// A delivery with placeholders filled in and its workflow position.
#[derive(Debug, Serialize)]
pub struct DeliveryView {
    #[serde(flatten)]
    pub delivery: Delivery,
    pub volunteer_display: String,
    pub workflow: WorkflowView,
}

impl From<Delivery> for DeliveryView {
    fn from(delivery: Delivery) -> Self {
        Self {
            volunteer_display: name_or_unknown(delivery.volunteer_name.as_deref()),
            workflow: WorkflowView::of(ENTITY, Some(delivery.status.as_str())),
            delivery,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /deliveries
// ---------------------------------------------------------------------------

pub async fn list_deliveries(
    State(state): State<AppState>,
    Query(params): Query<StatusListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ListFilter {
        statuses: status::status_filter(ENTITY, params.status.as_deref())?,
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let rows = DeliveryRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = rows.len(), "Listed deliveries");

    Ok(Json(PageResponse {
        data: rows.into_iter().map(DeliveryView::from).collect(),
        limit: filter.limit,
        offset: filter.offset,
    }))
}

// ---------------------------------------------------------------------------
// POST /deliveries
// ---------------------------------------------------------------------------

pub async fn create_delivery(
    State(state): State<AppState>,
    DeclaredActor(actor): DeclaredActor,
    Json(body): Json<CreateDelivery>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, body.request_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Request",
                id: body.request_id,
            })
        })?;
    if let Some(matched) = request.donation_id {
        if matched != body.donation_id {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Request {} is matched to donation {matched}, not {}",
                request.id, body.donation_id
            ))));
        }
    }

    let delivery = DeliveryRepo::create(&state.pool, &body, actor).await?;
    tracing::info!(
        id = delivery.id,
        donation_id = delivery.donation_id,
        request_id = delivery.request_id,
        actor = %actor,
        "Delivery created"
    );
    status::publish_created(&state, ENTITY, delivery.id, actor, delivery.created_at);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DeliveryView::from(delivery),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /deliveries/{id}
// ---------------------------------------------------------------------------

pub async fn get_delivery(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let delivery = DeliveryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Delivery",
                id,
            })
        })?;
    Ok(Json(DataResponse {
        data: DeliveryView::from(delivery),
    }))
}

// ---------------------------------------------------------------------------
// Workflow status
// ---------------------------------------------------------------------------

pub async fn delivery_transitions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ActorParam>,
) -> AppResult<impl IntoResponse> {
    let actor = status::parse_actor(params.actor.as_deref())?;
    let data = status::transitions_for(&state, ENTITY, id, actor).await?;
    Ok(Json(DataResponse { data }))
}

pub async fn update_delivery_status(
    State(state): State<AppState>,
    DeclaredActor(actor): DeclaredActor,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let data = status::update_status(&state, ENTITY, id, actor, &body).await?;
    Ok(Json(DataResponse { data }))
}

pub async fn delivery_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = status::history(&state, ENTITY, id).await?;
    Ok(Json(DataResponse { data }))
}
