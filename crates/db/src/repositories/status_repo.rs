//! Workflow status reads and writes shared by every status-bearing table.
//!
//! Table names come from [`EntityType::table`], never from user input.

use hopelink_core::types::{DbId, Timestamp};
use hopelink_core::workflow::{Actor, EntityType};
use sqlx::PgPool;

use crate::models::status_change::{NewStatusChange, StatusChange};
use crate::repositories::StatusChangeRepo;

/// Outcome of a compare-and-set status write.
#[derive(Debug)]
pub enum StatusWrite {
    /// The row held the expected status and was updated.
    Applied(StatusChange),
    /// Another writer changed the status first; `current` is the new value.
    Stale { current: String },
    /// No row with the given id exists.
    NotFound,
}

/// Every `(id, status)` pair of one table, read at `taken_at`.
#[derive(Debug)]
pub struct StatusSnapshot {
    /// Start of the reading transaction on the database clock, the same
    /// clock that stamps `status_changes.changed_at`.
    pub taken_at: Timestamp,
    pub rows: Vec<(DbId, String)>,
}

pub struct StatusRepo;

impl StatusRepo {
    /// Read the raw `status` column of one row.
    pub async fn current_status(
        pool: &PgPool,
        entity_type: EntityType,
        id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!("SELECT status FROM {} WHERE id = $1", entity_type.table());
        let row: Option<(String,)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(status,)| status))
    }

    /// Set `status = new_status` only if it still equals `expected`, and
    /// append the history row in the same transaction.
    pub async fn compare_and_set(
        pool: &PgPool,
        entity_type: EntityType,
        id: DbId,
        expected: &str,
        new_status: &str,
        actor: Actor,
        note: Option<&str>,
    ) -> Result<StatusWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE {} SET status = $3 WHERE id = $1 AND status = $2 RETURNING id",
            entity_type.table()
        );
        let updated: Option<(DbId,)> = sqlx::query_as(&query)
            .bind(id)
            .bind(expected)
            .bind(new_status)
            .fetch_optional(&mut *tx)
            .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(match Self::current_status(pool, entity_type, id).await? {
                Some(current) => {
                    tracing::debug!(
                        entity_type = %entity_type,
                        entity_id = id,
                        expected,
                        current = %current,
                        "Status write lost a race"
                    );
                    StatusWrite::Stale { current }
                }
                None => StatusWrite::NotFound,
            });
        }

        let change = StatusChangeRepo::insert(
            &mut *tx,
            &NewStatusChange {
                entity_type: entity_type.as_str(),
                entity_id: id,
                from_status: Some(expected),
                to_status: new_status,
                actor: actor.as_str(),
                note,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(StatusWrite::Applied(change))
    }

    /// Read every `(id, status)` pair in the table, used to seed and
    /// resync the status cache.
    pub async fn snapshot(
        pool: &PgPool,
        entity_type: EntityType,
    ) -> Result<StatusSnapshot, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let (taken_at,): (Timestamp,) = sqlx::query_as("SELECT now()")
            .fetch_one(&mut *tx)
            .await?;
        let query = format!("SELECT id, status FROM {} ORDER BY id", entity_type.table());
        let rows = sqlx::query_as(&query).fetch_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(StatusSnapshot { taken_at, rows })
    }

    /// Row counts grouped by raw status value.
    pub async fn count_by_status(
        pool: &PgPool,
        entity_type: EntityType,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        let query = format!(
            "SELECT status, COUNT(*) FROM {} GROUP BY status ORDER BY status",
            entity_type.table()
        );
        sqlx::query_as(&query).fetch_all(pool).await
    }
}
