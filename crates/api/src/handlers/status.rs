//! Workflow-status plumbing shared by the donation, request and delivery
//! handlers.
//!
//! Every status write in the service goes through [`update_status`]: load
//! the current value, check it against the transition rules, write it with
//! compare-and-set, then publish a change event.

use hopelink_core::error::CoreError;
use hopelink_core::types::{DbId, Timestamp};
use hopelink_core::validation::{validate_max_len, MAX_NOTE_LEN};
use hopelink_core::workflow::{
    allowed_transitions, lookup, progress_for, validate_transition, Actor, EntityType, Progress,
    StatusView, TransitionOption,
};
use hopelink_db::models::status_change::StatusChange;
use hopelink_db::repositories::{StatusChangeRepo, StatusRepo, StatusWrite};
use hopelink_events::ChangeEvent;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `PUT /{entities}/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target stage id, alias or terminal exception.
    pub status: String,
    pub note: Option<String>,
}

/// Resolved status plus progress, attached to every entity view.
#[derive(Debug, Serialize)]
pub struct WorkflowView {
    pub view: StatusView,
    /// `None` for terminal exceptions.
    pub progress: Option<Progress>,
}

impl WorkflowView {
    pub fn of(entity_type: EntityType, status: Option<&str>) -> Self {
        let view = lookup(entity_type, status);
        Self {
            progress: progress_for(entity_type, &view),
            view,
        }
    }
}

/// Transitions legal for one actor from one status.
#[derive(Debug, Serialize)]
pub struct TransitionsResponse {
    pub entity_type: EntityType,
    pub current: Option<String>,
    pub actor: Actor,
    pub view: StatusView,
    pub transitions: Vec<TransitionOption>,
}

impl TransitionsResponse {
    pub fn build(entity_type: EntityType, current: Option<String>, actor: Actor) -> Self {
        let view = lookup(entity_type, current.as_deref());
        let transitions = allowed_transitions(entity_type, current.as_deref(), actor);
        Self {
            entity_type,
            current,
            actor,
            view,
            transitions,
        }
    }
}

/// Result of a successful status write.
#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub change: StatusChange,
    pub workflow: WorkflowView,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse an `{entity_type}` path segment; unknown values are a 400.
pub fn parse_entity_type(raw: &str) -> AppResult<EntityType> {
    Ok(raw.parse::<EntityType>()?)
}

/// Parse a required `?actor=` query value.
pub fn parse_actor(raw: Option<&str>) -> AppResult<Actor> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("actor query parameter is required".to_string()))?;
    Ok(raw.parse::<Actor>()?)
}

/// Expand a `?status=` filter into every raw value stored for it.
///
/// A stage expands to its id plus aliases, so `?status=scheduled` and
/// `?status=assigned` select the same deliveries. An unknown value is a
/// validation error rather than an empty result.
pub fn status_filter(entity_type: EntityType, raw: Option<&str>) -> AppResult<Option<Vec<String>>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let values = match lookup(entity_type, Some(raw)) {
        StatusView::Stage {
            recognized: false, ..
        } => {
            return Err(CoreError::Validation(format!(
                "Invalid {entity_type} status filter '{raw}'. Must be one of: {}",
                entity_type.valid_statuses().join(", ")
            ))
            .into());
        }
        StatusView::Stage { stage, .. } => std::iter::once(stage.id)
            .chain(stage.aliases.iter().copied())
            .map(str::to_string)
            .collect(),
        StatusView::Terminal { exception } => vec![exception.id().to_string()],
    };
    Ok(Some(values))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Load the raw status of one row, or 404.
pub async fn current_status(
    state: &AppState,
    entity_type: EntityType,
    id: DbId,
) -> AppResult<String> {
    StatusRepo::current_status(&state.pool, entity_type, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: entity_type.label(),
                id,
            })
        })
}

/// Transitions the given actor may apply to one row right now.
pub async fn transitions_for(
    state: &AppState,
    entity_type: EntityType,
    id: DbId,
    actor: Actor,
) -> AppResult<TransitionsResponse> {
    let current = current_status(state, entity_type, id).await?;
    Ok(TransitionsResponse::build(entity_type, Some(current), actor))
}

/// Status history of one row, oldest first.
pub async fn history(
    state: &AppState,
    entity_type: EntityType,
    id: DbId,
) -> AppResult<Vec<StatusChange>> {
    current_status(state, entity_type, id).await?;
    let changes = StatusChangeRepo::list_for_entity(&state.pool, entity_type, id).await?;
    Ok(changes)
}

/// Validate and apply a status change, then notify subscribers.
///
/// The write only succeeds if the row still holds the status the
/// transition was validated against; otherwise the caller gets a 409 and
/// nothing is written.
pub async fn update_status(
    state: &AppState,
    entity_type: EntityType,
    id: DbId,
    actor: Actor,
    body: &UpdateStatusRequest,
) -> AppResult<StatusUpdated> {
    let note = body
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    validate_max_len("note", note, MAX_NOTE_LEN)?;

    let current = current_status(state, entity_type, id).await?;
    let target = validate_transition(entity_type, Some(current.as_str()), &body.status, actor)?;

    let write = StatusRepo::compare_and_set(
        &state.pool,
        entity_type,
        id,
        &current,
        target,
        actor,
        note,
    )
    .await?;

    match write {
        StatusWrite::Applied(change) => {
            tracing::info!(
                entity_type = %entity_type,
                entity_id = id,
                from = %current,
                to = target,
                actor = %actor,
                "Status updated"
            );
            // Stamped with the commit time so consumers order changes to
            // one row the way they were written, whatever order they are
            // published in.
            state.event_bus.publish(
                ChangeEvent::status_changed(entity_type, id, current, target, actor)
                    .at(change.changed_at),
            );
            Ok(StatusUpdated {
                change,
                workflow: WorkflowView::of(entity_type, Some(target)),
            })
        }
        StatusWrite::Stale { current: now } => {
            tracing::warn!(
                entity_type = %entity_type,
                entity_id = id,
                expected = %current,
                current = %now,
                "Rejected status update after concurrent change"
            );
            Err(CoreError::Conflict(format!(
                "{} {id} changed from '{current}' to '{now}' while this update was in flight",
                entity_type.label()
            ))
            .into())
        }
        StatusWrite::NotFound => Err(CoreError::NotFound {
            entity: entity_type.label(),
            id,
        }
        .into()),
    }
}

/// Publish the creation of a new row, stamped with its `created_at`.
pub fn publish_created(
    state: &AppState,
    entity_type: EntityType,
    id: DbId,
    actor: Actor,
    created_at: Timestamp,
) {
    state.event_bus.publish(
        ChangeEvent::created(entity_type, id, entity_type.initial_stage().id, actor)
            .at(created_at),
    );
}
