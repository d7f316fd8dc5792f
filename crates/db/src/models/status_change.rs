//! Workflow status history rows.

use hopelink_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One status write recorded in `status_changes`.
///
/// `from_status` is `None` for the row written when the entity is created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusChange {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub from_status: Option<String>,
    pub to_status: String,
    pub actor: String,
    pub note: Option<String>,
    pub changed_at: Timestamp,
}

/// Values needed to record a status write.
#[derive(Debug, Clone)]
pub struct NewStatusChange<'a> {
    pub entity_type: &'a str,
    pub entity_id: DbId,
    pub from_status: Option<&'a str>,
    pub to_status: &'a str,
    pub actor: &'a str,
    pub note: Option<&'a str>,
}
