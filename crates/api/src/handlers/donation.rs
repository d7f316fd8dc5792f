//! Handlers for donations and their workflow status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hopelink_core::display::{name_or_unknown, or_not_provided};
use hopelink_core::error::CoreError;
use hopelink_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use hopelink_core::types::DbId;
use hopelink_core::validation::{validate_positive, validate_required, MAX_TITLE_LEN};
use hopelink_core::workflow::EntityType;
use hopelink_db::models::donation::{CreateDonation, Donation};
use hopelink_db::models::ListFilter;
use hopelink_db::repositories::{DonationRepo, RequestRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::request::RequestView;
use crate::handlers::status::{self, UpdateStatusRequest, WorkflowView};
use crate::middleware::actor::DeclaredActor;
use crate::query::{ActorParam, StatusListParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

const ENTITY: EntityType = EntityType::Donation;

/// A donation with placeholders filled in and its workflow position.
#[derive(Debug, Serialize)]
pub struct DonationView {
    #[serde(flatten)]
    pub donation: Donation,
    pub donor_display: String,
    pub pickup_display: String,
    pub workflow: WorkflowView,
}

impl From<Donation> for DonationView {
    fn from(donation: Donation) -> Self {
        Self {
            donor_display: name_or_unknown(donation.donor_name.as_deref()),
            pickup_display: or_not_provided(donation.pickup_address.as_deref()),
            workflow: WorkflowView::of(ENTITY, Some(donation.status.as_str())),
            donation,
        }
    }
}

async fn ensure_donation_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Donation> {
    DonationRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// GET /donations
// ---------------------------------------------------------------------------

pub async fn list_donations(
    State(state): State<AppState>,
    Query(params): Query<StatusListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ListFilter {
        statuses: status::status_filter(ENTITY, params.status.as_deref())?,
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let rows = DonationRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = rows.len(), "Listed donations");

    Ok(Json(PageResponse {
        data: rows.into_iter().map(DonationView::from).collect(),
        limit: filter.limit,
        offset: filter.offset,
    }))
}

// ---------------------------------------------------------------------------
// POST /donations
// ---------------------------------------------------------------------------

pub async fn create_donation(
    State(state): State<AppState>,
    DeclaredActor(actor): DeclaredActor,
    Json(body): Json<CreateDonation>,
) -> AppResult<impl IntoResponse> {
    validate_required("title", &body.title, MAX_TITLE_LEN)?;
    if let Some(quantity) = body.quantity {
        validate_positive("quantity", quantity)?;
    }

    let donation = DonationRepo::create(&state.pool, &body, actor).await?;
    tracing::info!(id = donation.id, actor = %actor, "Donation created");
    status::publish_created(&state, ENTITY, donation.id, actor, donation.created_at);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DonationView::from(donation),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /donations/{id}
// ---------------------------------------------------------------------------

pub async fn get_donation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let donation = ensure_donation_exists(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: DonationView::from(donation),
    }))
}

// ---------------------------------------------------------------------------
// GET /donations/{id}/requests
// ---------------------------------------------------------------------------

/// Requests matched to one donation.
pub async fn list_donation_requests(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_donation_exists(&state.pool, id).await?;
    let rows = RequestRepo::list_by_donation(&state.pool, id).await?;
    let data: Vec<RequestView> = rows.into_iter().map(RequestView::from).collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Workflow status
// ---------------------------------------------------------------------------

pub async fn donation_transitions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ActorParam>,
) -> AppResult<impl IntoResponse> {
    let actor = status::parse_actor(params.actor.as_deref())?;
    let data = status::transitions_for(&state, ENTITY, id, actor).await?;
    Ok(Json(DataResponse { data }))
}

pub async fn update_donation_status(
    State(state): State<AppState>,
    DeclaredActor(actor): DeclaredActor,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let data = status::update_status(&state, ENTITY, id, actor, &body).await?;
    Ok(Json(DataResponse { data }))
}

pub async fn donation_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = status::history(&state, ENTITY, id).await?;
    Ok(Json(DataResponse { data }))
}
