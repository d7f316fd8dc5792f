//! Repository for the append-only `status_changes` history.

use hopelink_core::types::DbId;
use hopelink_core::workflow::EntityType;
use sqlx::{PgExecutor, PgPool};

use crate::models::status_change::{NewStatusChange, StatusChange};

const COLUMNS: &str =
    "id, entity_type, entity_id, from_status, to_status, actor, note, changed_at";

pub struct StatusChangeRepo;

impl StatusChangeRepo {
    /// Record a status write. Pass `&mut *tx` to join an open transaction.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        change: &NewStatusChange<'_>,
    ) -> Result<StatusChange, sqlx::Error> {
        let query = format!(
            "INSERT INTO status_changes
                (entity_type, entity_id, from_status, to_status, actor, note)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusChange>(&query)
            .bind(change.entity_type)
            .bind(change.entity_id)
            .bind(change.from_status)
            .bind(change.to_status)
            .bind(change.actor)
            .bind(change.note)
            .fetch_one(executor)
            .await
    }

    /// History of one entity, oldest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: EntityType,
        entity_id: DbId,
    ) -> Result<Vec<StatusChange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM status_changes
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY changed_at, id"
        );
        sqlx::query_as::<_, StatusChange>(&query)
            .bind(entity_type.as_str())
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }
}
